use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::core::SessionDuration;
use crate::session::TechniqueId;

#[derive(Parser)]
#[command(name = "respira")]
#[command(about = "Guided breathing exercises for your terminal")]
#[command(long_about = "respira - Guided breathing exercises for your terminal

Run timed breathing sessions with visual pacing and an optional audio cue
at each phase transition.

QUICK START:
  respira start                     Start a session with your defaults
  respira start -t box -d 2m        Two minutes of box breathing
  respira tui                       Full-screen interactive mode
  respira techniques                Show the technique catalog

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  respira <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

/// Session length choices.
///
/// The session either stops automatically after the chosen time or runs
/// open-ended until stopped manually.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurationChoice {
    /// 30 seconds
    #[value(name = "30s")]
    ThirtySeconds,
    /// 2 minutes
    #[value(name = "2m")]
    TwoMinutes,
    /// 5 minutes
    #[value(name = "5m")]
    FiveMinutes,
    /// Until stopped manually
    #[value(name = "open")]
    Open,
}

impl From<DurationChoice> for SessionDuration {
    fn from(choice: DurationChoice) -> Self {
        match choice {
            DurationChoice::ThirtySeconds => Self::Finite(std::time::Duration::from_secs(30)),
            DurationChoice::TwoMinutes => Self::Finite(std::time::Duration::from_secs(120)),
            DurationChoice::FiveMinutes => Self::Finite(std::time::Duration::from_secs(300)),
            DurationChoice::Open => Self::Unbounded,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a breathing session in the terminal
    ///
    /// Prints each phase instruction as the session advances and renders a
    /// progress bar for timed sessions. Press q, Esc, or Ctrl-C to stop.
    ///
    /// # Examples
    ///
    ///   respira start
    ///   respira start --technique box --duration 2m
    ///   respira start -t 4-7-8 -d open --no-sound
    #[command(alias = "s")]
    Start(SessionArgs),

    /// Open the full-screen interactive interface
    ///
    /// Shows a configuration view for picking technique, duration, and
    /// sound, and an active-session view with the animated breathing circle.
    Tui(SessionArgs),

    /// List the breathing technique catalog
    ///
    /// Shows each technique's name, description, and phase sequence.
    ///
    /// # Examples
    ///
    ///   respira techniques
    ///   respira techniques -o json
    #[command(alias = "list")]
    Techniques,

    /// Show or initialize the configuration file
    Config(ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// # Examples
    ///
    ///   respira completions zsh > ~/.zsh/completions/_respira
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Session settings shared by `start` and `tui`.
///
/// Anything not given falls back to the config file, then to built-in
/// defaults (simple technique, 30 seconds, sound on).
#[derive(Args, Debug, Default)]
pub struct SessionArgs {
    /// Breathing technique
    #[arg(short, long, value_enum)]
    pub technique: Option<TechniqueId>,

    /// Session length
    #[arg(short, long, value_enum)]
    pub duration: Option<DurationChoice>,

    /// Force the cue tone on
    #[arg(long, conflicts_with = "no_sound")]
    pub sound: bool,

    /// Disable the cue tone
    #[arg(long)]
    pub no_sound: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the active configuration
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_assertions() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_duration_choice_mapping() {
        assert_eq!(
            SessionDuration::from(DurationChoice::ThirtySeconds).seconds(),
            Some(30)
        );
        assert_eq!(
            SessionDuration::from(DurationChoice::TwoMinutes).seconds(),
            Some(120)
        );
        assert_eq!(
            SessionDuration::from(DurationChoice::FiveMinutes).seconds(),
            Some(300)
        );
        assert_eq!(SessionDuration::from(DurationChoice::Open).seconds(), None);
    }

    #[test]
    fn test_parse_start_args() {
        let cli = Cli::try_parse_from([
            "respira", "start", "-t", "4-7-8", "-d", "2m", "--no-sound",
        ])
        .unwrap();

        match cli.command {
            Commands::Start(args) => {
                assert_eq!(args.technique, Some(TechniqueId::FourSevenEight));
                assert_eq!(args.duration, Some(DurationChoice::TwoMinutes));
                assert!(args.no_sound);
                assert!(!args.sound);
            }
            _ => panic!("expected start command"),
        }
    }

    #[test]
    fn test_sound_flags_conflict() {
        assert!(Cli::try_parse_from(["respira", "start", "--sound", "--no-sound"]).is_err());
    }
}
