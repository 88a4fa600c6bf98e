//! `log` command implementation.

use anyhow::{Context, Result};
use contracts::{DeviceInfo, LoggerBlueprint, SinkConfig};
use dispatcher::{create_dispatcher, Dispatcher};
use observability::DispatchSummary;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::cli::LogArgs;

/// Execute the `log` command
pub async fn run_log(args: &LogArgs) -> Result<()> {
    let blueprint = build_blueprint(args)?;

    info!(
        sinks = blueprint.sinks.len(),
        device = blueprint.device.is_some(),
        "Configuration loaded"
    );

    let dispatcher = create_dispatcher(blueprint);

    let lines_in = if args.lines.is_empty() {
        dispatch_stdin(&dispatcher, args.only_file.as_deref()).await?
    } else {
        for line in &args.lines {
            dispatch(&dispatcher, args.only_file.as_deref(), line).await;
        }
        args.lines.len() as u64
    };

    dispatcher.flush().await;

    let summary = summarize(&dispatcher, lines_in);
    summary.record();
    eprint!("{}", summary);

    Ok(())
}

/// Merge config file, CLI sinks, and device overrides
fn build_blueprint(args: &LogArgs) -> Result<LoggerBlueprint> {
    let mut blueprint = match &args.config {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            config_loader::ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => LoggerBlueprint::default(),
    };

    for path in &args.files {
        blueprint.sinks.push(SinkConfig::File {
            path: path.clone(),
            with_header: true,
        });
    }
    if let Some(destination) = &args.remote {
        blueprint.sinks.push(SinkConfig::Remote {
            destination: destination.clone(),
        });
    }

    blueprint.device = merge_device(blueprint.device.take(), args);
    Ok(blueprint)
}

/// Apply per-field device overrides on top of the configured device block
fn merge_device(configured: Option<DeviceInfo>, args: &LogArgs) -> Option<DeviceInfo> {
    let overridden =
        args.os_version.is_some() || args.app_version.is_some() || args.device_model.is_some();
    if !overridden {
        return configured;
    }

    let mut device = configured.unwrap_or_default();
    if let Some(os) = &args.os_version {
        device.os_version = os.clone();
    }
    if let Some(app) = &args.app_version {
        device.app_version = app.clone();
    }
    if let Some(model) = &args.device_model {
        device.device_model = model.clone();
    }
    Some(device)
}

async fn dispatch(dispatcher: &Dispatcher, only_file: Option<&str>, line: &str) {
    match only_file {
        Some(path) => dispatcher.log_to_file_and_console_only(path, line).await,
        None => dispatcher.log(line).await,
    }
}

async fn dispatch_stdin(dispatcher: &Dispatcher, only_file: Option<&str>) -> Result<u64> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut count = 0;

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        dispatch(dispatcher, only_file, &line).await;
        count += 1;
    }

    Ok(count)
}

fn summarize(dispatcher: &Dispatcher, lines_in: u64) -> DispatchSummary {
    let mut summary = DispatchSummary::new(lines_in);
    for (sink, metrics) in dispatcher.metrics() {
        summary.push(sink, metrics.write_count, metrics.dropped_count);
    }
    summary
}
