//! Info command: version and the settings a run would use.

use clap::Args;
use owo_colors::OwoColorize;
use reading_level_core::config::{Config, ConfigSources};
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Debug, Serialize)]
struct Info {
    name: &'static str,
    version: &'static str,
    settings: Settings,
}

/// Effective values after every config layer is merged.
#[derive(Debug, Serialize)]
struct Settings {
    config_file: Option<String>,
    log_level: &'static str,
    max_input_bytes: Option<u64>,
    exclude: Vec<String>,
    top: usize,
}

impl Settings {
    fn resolve(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(ToString::to_string),
            log_level: config.log_level.as_str(),
            max_input_bytes: config.input_limit(),
            exclude: config.exclude.clone().unwrap_or_default(),
            top: config.top(),
        }
    }
}

/// Print the package version and effective settings.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let info = Info {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        settings: Settings::resolve(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let s = &info.settings;
    println!("{} {}", info.name.bold(), info.version.green());
    println!();
    println!("{}", "Settings".bold().underline());
    match s.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none (defaults)".yellow()),
    }
    println!("{}: {}", "Log level".dimmed(), s.log_level);
    match s.max_input_bytes {
        Some(limit) => println!("{}: {limit} bytes", "Max input".dimmed()),
        None => println!("{}: {}", "Max input".dimmed(), "unlimited".yellow()),
    }
    println!("{}: {}", "Ranking size".dimmed(), s.top);
    if !s.exclude.is_empty() {
        println!("{}: {}", "Exclude".dimmed(), s.exclude.join(", "));
    }
    Ok(())
}
