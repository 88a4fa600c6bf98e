//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{LoggerBlueprint, SinkConfig};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::commands::validate::registered_identities;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    device: Option<DeviceBlock>,
    sinks: Vec<SinkInfo>,
    registered: Vec<String>,
}

#[derive(Serialize)]
struct DeviceBlock {
    device_model: String,
    os_version: String,
    app_version: String,
}

#[derive(Serialize)]
struct SinkInfo {
    kind: String,
    identity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<bool>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&blueprint);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint);
    }

    Ok(())
}

fn build_config_info(blueprint: &LoggerBlueprint) -> ConfigInfo {
    let device = blueprint.device.as_ref().map(|d| DeviceBlock {
        device_model: d.device_model.clone(),
        os_version: d.os_version.clone(),
        app_version: d.app_version.clone(),
    });

    let sinks = blueprint
        .sinks
        .iter()
        .map(|s| {
            let identity = s.identity();
            SinkInfo {
                kind: identity.kind().to_string(),
                identity: identity.to_string(),
                header: match s {
                    SinkConfig::File { with_header, .. } => Some(*with_header),
                    _ => None,
                },
            }
        })
        .collect();

    ConfigInfo {
        version: format!("{:?}", blueprint.version),
        device,
        sinks,
        registered: registered_identities(blueprint)
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

fn print_config_info(blueprint: &LoggerBlueprint) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                    plogs Configuration                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    // Device
    println!("📱 Device");
    match &blueprint.device {
        Some(device) => {
            println!("   ├─ Model: {}", device.device_model);
            println!("   ├─ OS Version: {}", device.os_version);
            println!("   └─ App Version: {}", device.app_version);
        }
        None => {
            println!("   └─ (none, files start without a header)");
        }
    }

    // Sinks
    println!("\n📤 Sinks configured ({})", blueprint.sinks.len());
    for (i, sink) in blueprint.sinks.iter().enumerate() {
        let is_last = i == blueprint.sinks.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        println!("   {} {}", prefix, sink.identity());
    }

    // Registration order
    let registered = registered_identities(blueprint);
    println!("\n🧭 Registered ({})", registered.len());
    for (i, identity) in registered.iter().enumerate() {
        let is_last = i == registered.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        println!("   {} {}", prefix, identity);
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::DeviceInfo;

    #[test]
    fn test_build_config_info() {
        let bp = LoggerBlueprint {
            version: Default::default(),
            device: Some(DeviceInfo::new("1.0", "2.0", "Pixel")),
            sinks: vec![
                SinkConfig::File {
                    path: "/a".into(),
                    with_header: false,
                },
                SinkConfig::Remote {
                    destination: "tcp://h:1".into(),
                },
            ],
        };

        let info = build_config_info(&bp);
        assert_eq!(info.device.as_ref().unwrap().device_model, "Pixel");
        assert_eq!(info.sinks[0].kind, "file");
        assert_eq!(info.sinks[0].header, Some(false));
        assert_eq!(info.sinks[1].identity, "remote:tcp://h:1");
        assert_eq!(info.registered, vec!["console", "file:/a", "remote:tcp://h:1"]);
    }
}
