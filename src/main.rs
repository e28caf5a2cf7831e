use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use respira::cli::args::{Cli, Commands};
use respira::cli::commands::{self, SessionSettings};
use respira::config::Config;
use respira::error::RespiraError;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), RespiraError> {
    // Logging goes to stderr so it never mixes with command output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let format = cli.output;

    let output = match cli.command {
        Commands::Start(args) => {
            commands::start(SessionSettings::resolve(&args, &config), &config, format)?
        }
        Commands::Tui(args) => {
            respira::tui::run(SessionSettings::resolve(&args, &config), &config)?;
            String::new()
        }
        Commands::Techniques => commands::techniques(format)?,
        Commands::Config(args) => commands::config(args.command, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
