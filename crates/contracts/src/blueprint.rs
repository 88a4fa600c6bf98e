//! LoggerBlueprint - Config Loader 输出
//!
//! 描述完整的日志配置：设备信息、输出路由。

use serde::{Deserialize, Serialize};

use crate::{DeviceInfo, SinkIdentity};

/// 配置版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// 完整的日志配置蓝图
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggerBlueprint {
    /// 配置版本
    #[serde(default)]
    pub version: ConfigVersion,

    /// 设备信息 (可选，用于文件头)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceInfo>,

    /// 输出路由配置 (控制台总是预先注册)
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

/// Sink 输出配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkConfig {
    /// 控制台输出
    Console,

    /// 文件输出
    File {
        /// 文件路径 (精确字符串比较，不做规范化)
        path: String,

        /// 新建文件时是否写入设备信息头
        #[serde(default = "default_with_header")]
        with_header: bool,
    },

    /// 远程输出 (udp:// / tcp:// / file://)
    Remote {
        /// 目标地址
        destination: String,
    },
}

fn default_with_header() -> bool {
    true
}

impl SinkConfig {
    /// 构建后 sink 的身份
    pub fn identity(&self) -> SinkIdentity {
        match self {
            Self::Console => SinkIdentity::Console,
            Self::File { path, .. } => SinkIdentity::File(path.clone()),
            Self::Remote { destination } => SinkIdentity::Remote(destination.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_config_tagged_toml() {
        let content = r#"
[device]
os_version = "14"
app_version = "2.0.1"
device_model = "Pixel 8"

[[sinks]]
kind = "file"
path = "/tmp/app.log"

[[sinks]]
kind = "file"
path = "/tmp/raw.log"
with_header = false

[[sinks]]
kind = "remote"
destination = "udp://127.0.0.1:9999"
"#;
        let bp: LoggerBlueprint = toml::from_str(content).unwrap();
        assert_eq!(bp.version, ConfigVersion::V1);
        assert_eq!(bp.device.as_ref().unwrap().device_model, "Pixel 8");
        assert_eq!(
            bp.sinks[0],
            SinkConfig::File {
                path: "/tmp/app.log".into(),
                with_header: true
            }
        );
        assert!(matches!(
            bp.sinks[1],
            SinkConfig::File {
                with_header: false,
                ..
            }
        ));
        assert_eq!(
            bp.sinks[2].identity(),
            SinkIdentity::Remote("udp://127.0.0.1:9999".into())
        );
    }

    #[test]
    fn test_sink_config_json_console() {
        let bp: LoggerBlueprint =
            serde_json::from_str(r#"{ "sinks": [{ "kind": "console" }] }"#).unwrap();
        assert!(bp.device.is_none());
        assert_eq!(bp.sinks, vec![SinkConfig::Console]);
        assert_eq!(bp.sinks[0].identity(), SinkIdentity::Console);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result: Result<LoggerBlueprint, _> =
            serde_json::from_str(r#"{ "sinks": [{ "kind": "syslog" }] }"#);
        assert!(result.is_err());
    }
}
