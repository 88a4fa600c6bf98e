//! 配置校验模块
//!
//! 校验规则：
//! - file sink 的 path 非空
//! - remote sink 的 destination 非空
//! - udp:// / tcp:// 目标必须是 host:port
//!
//! 重复的 sink 不是错误：注册时按身份去重。

use contracts::{ContractError, LoggerBlueprint, SinkConfig};

/// 校验 LoggerBlueprint 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(blueprint: &LoggerBlueprint) -> Result<(), ContractError> {
    for (idx, sink) in blueprint.sinks.iter().enumerate() {
        validate_sink(idx, sink)?;
    }
    Ok(())
}

fn validate_sink(idx: usize, sink: &SinkConfig) -> Result<(), ContractError> {
    match sink {
        SinkConfig::Console => Ok(()),
        SinkConfig::File { path, .. } => {
            if path.is_empty() {
                return Err(ContractError::config_validation(
                    format!("sinks[{}].path", idx),
                    "file path cannot be empty",
                ));
            }
            Ok(())
        }
        SinkConfig::Remote { destination } => validate_destination(idx, destination),
    }
}

/// 校验远程目标地址
fn validate_destination(idx: usize, destination: &str) -> Result<(), ContractError> {
    let field = format!("sinks[{}].destination", idx);

    if destination.is_empty() {
        return Err(ContractError::config_validation(
            field,
            "remote destination cannot be empty",
        ));
    }

    let socket_addr = destination
        .strip_prefix("udp://")
        .or_else(|| destination.strip_prefix("tcp://"));

    if let Some(addr) = socket_addr {
        let valid = addr
            .rsplit_once(':')
            .is_some_and(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok());
        if !valid {
            return Err(ContractError::config_validation(
                field,
                format!("expected host:port, got '{}'", addr),
            ));
        }
    }

    Ok(())
}
