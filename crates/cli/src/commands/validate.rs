//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{LoggerBlueprint, SinkIdentity};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    has_device: bool,
    sink_count: usize,
    registered_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    has_device: blueprint.device.is_some(),
                    sink_count: blueprint.sinks.len(),
                    registered_count: registered_identities(&blueprint).len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Identities that would survive registration, console first
pub(crate) fn registered_identities(blueprint: &LoggerBlueprint) -> Vec<SinkIdentity> {
    let mut registered = vec![SinkIdentity::Console];
    for config in &blueprint.sinks {
        let identity = config.identity();
        if !registered.iter().any(|r| r.is_duplicate_of(&identity)) {
            registered.push(identity);
        }
    }
    registered
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &LoggerBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.sinks.is_empty() {
        warnings.push("No sinks configured - lines go to the console only".to_string());
    }

    let mut registered = vec![SinkIdentity::Console];
    for (idx, config) in blueprint.sinks.iter().enumerate() {
        let identity = config.identity();
        let existing = registered
            .iter()
            .find(|r| r.is_duplicate_of(&identity))
            .cloned();

        match existing {
            None => registered.push(identity),
            Some(SinkIdentity::Console) => {
                warnings.push(format!(
                    "sinks[{idx}]: console is always registered, entry ignored"
                ));
            }
            Some(existing) if matches!(existing, SinkIdentity::Remote(_)) && existing != identity => {
                warnings.push(format!(
                    "sinks[{idx}]: only one remote sink is kept, '{identity}' ignored in favor of '{existing}'"
                ));
            }
            Some(existing) => {
                warnings.push(format!("sinks[{idx}]: duplicate of '{existing}', ignored"));
            }
        }
    }

    if blueprint.device.is_none()
        && blueprint
            .sinks
            .iter()
            .any(|s| matches!(s, contracts::SinkConfig::File { with_header: true, .. }))
    {
        warnings.push("No [device] block - new files will start without a header".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Device header: {}", if summary.has_device { "yes" } else { "no" });
            println!("  Sinks configured: {}", summary.sink_count);
            println!("  Sinks registered: {}", summary.registered_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{DeviceInfo, SinkConfig};

    fn blueprint(sinks: Vec<SinkConfig>) -> LoggerBlueprint {
        LoggerBlueprint {
            version: Default::default(),
            device: Some(DeviceInfo::new("1.0", "2.0", "Pixel")),
            sinks,
        }
    }

    fn file(path: &str) -> SinkConfig {
        SinkConfig::File {
            path: path.into(),
            with_header: true,
        }
    }

    fn remote(destination: &str) -> SinkConfig {
        SinkConfig::Remote {
            destination: destination.into(),
        }
    }

    #[test]
    fn test_registered_identities_dedup() {
        let bp = blueprint(vec![
            SinkConfig::Console,
            file("/a"),
            file("/a"),
            file("/b"),
            remote("udp://h:1"),
            remote("udp://h:2"),
        ]);
        assert_eq!(
            registered_identities(&bp),
            vec![
                SinkIdentity::Console,
                SinkIdentity::File("/a".into()),
                SinkIdentity::File("/b".into()),
                SinkIdentity::Remote("udp://h:1".into()),
            ]
        );
    }

    #[test]
    fn test_warnings_for_duplicates() {
        let bp = blueprint(vec![
            SinkConfig::Console,
            file("/a"),
            file("/a"),
            remote("udp://h:1"),
            remote("udp://h:2"),
        ]);
        let warnings = collect_warnings(&bp);
        assert_eq!(warnings.len(), 3, "got: {warnings:?}");
        assert!(warnings[0].contains("console is always registered"));
        assert!(warnings[1].contains("duplicate of 'file:/a'"));
        assert!(warnings[2].contains("only one remote sink is kept"));
    }

    #[test]
    fn test_warning_for_missing_device() {
        let mut bp = blueprint(vec![file("/a")]);
        bp.device = None;
        let warnings = collect_warnings(&bp);
        assert!(warnings.iter().any(|w| w.contains("without a header")));
    }

    #[test]
    fn test_warning_for_no_sinks() {
        let warnings = collect_warnings(&blueprint(Vec::new()));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("console only"));
    }
}
