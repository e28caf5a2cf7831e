//! Config command implementation.

use colored::Colorize;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::RespiraError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be read, written, or
/// serialized.
pub fn config(cmd: ConfigCommands, format: OutputFormat) -> Result<String, RespiraError> {
    match cmd {
        ConfigCommands::Show => show(format),
        ConfigCommands::Init { force } => init(force),
        ConfigCommands::Path => {
            let paths = Paths::new()?;
            Ok(paths.config_file.display().to_string())
        }
    }
}

fn show(format: OutputFormat) -> Result<String, RespiraError> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => to_json(&config),
        OutputFormat::Pretty => {
            let mut output = Vec::new();
            output.push("Configuration".bold().to_string());
            output.push(format!("  Technique: {}", config.session.technique));
            output.push(format!("  Duration:  {}", config.session.duration));
            output.push(format!(
                "  Sound:     {}",
                if config.session.sound { "on" } else { "off" }
            ));
            output.push(format!(
                "  Cue tone:  {:.2} Hz, {} ms, gain {:.2}",
                config.audio.frequency_hz, config.audio.length_ms, config.audio.gain
            ));
            Ok(output.join("\n"))
        }
    }
}

fn init(force: bool) -> Result<String, RespiraError> {
    let paths = Paths::new()?;

    if paths.config_file.exists() && !force {
        return Err(RespiraError::Config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            paths.config_file.display()
        )));
    }

    paths.ensure_dirs()?;
    Config::default().save_to_path(&paths.config_file)?;

    Ok(format!(
        "Wrote default config to {}",
        paths.config_file.display()
    ))
}
