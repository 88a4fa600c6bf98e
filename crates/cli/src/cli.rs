//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// plogs - fan log lines out to console, file, and remote sinks
#[derive(Parser, Debug)]
#[command(
    name = "plogs",
    author,
    version,
    about = "Fan log lines out to console, file, and remote sinks",
    long_about = "Routes each input line to the console plus every configured sink.\n\n\
                  File sinks are created on first write and start with a device header; \n\
                  equivalent sinks are registered only once."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "PLOGS_VERBOSE")]
    pub verbose: u8,

    /// Suppress diagnostics except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Diagnostic log format (always written to stderr)
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "PLOGS_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch lines to the configured sinks
    Log(LogArgs),

    /// Validate configuration file without dispatching
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `log` command
#[derive(Parser, Debug, Clone)]
pub struct LogArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "PLOGS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Extra file sink (repeatable)
    #[arg(long = "file", value_name = "PATH")]
    pub files: Vec<String>,

    /// Extra remote sink destination
    #[arg(long, value_name = "DESTINATION")]
    pub remote: Option<String>,

    /// Only write to the console and the file sink with this path
    #[arg(long, value_name = "PATH")]
    pub only_file: Option<String>,

    /// Override device OS version
    #[arg(long, env = "PLOGS_OS_VERSION")]
    pub os_version: Option<String>,

    /// Override host application version
    #[arg(long, env = "PLOGS_APP_VERSION")]
    pub app_version: Option<String>,

    /// Override device model
    #[arg(long, env = "PLOGS_DEVICE_MODEL")]
    pub device_model: Option<String>,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "PLOGS_METRICS_PORT")]
    pub metrics_port: u16,

    /// Lines to dispatch; read from stdin when omitted
    pub lines: Vec<String>,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "plogs.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "plogs.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
