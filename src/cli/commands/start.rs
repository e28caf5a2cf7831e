//! Inline session runner.
//!
//! Runs a breathing session directly in the terminal: each phase instruction
//! is printed as the session advances, and timed sessions render a progress
//! bar on the bottom line. Raw mode is enabled so a single keypress (q, Esc,
//! or Ctrl-C) stops the session; it is always restored on the way out.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use colored::Colorize;
use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};

use crate::cli::args::OutputFormat;
use crate::cli::commands::{build_cue, SessionSettings};
use crate::config::Config;
use crate::core::format_duration_mmss;
use crate::error::RespiraError;
use crate::output::{format_summary, render_progress_bar};
use crate::session::{SessionEngine, SessionEvent, SessionSummary};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const PROGRESS_BAR_WIDTH: usize = 30;

/// Execute the start command.
///
/// # Errors
///
/// Returns an error if the terminal cannot be put into raw mode or written
/// to, or if summary formatting fails.
pub fn start(
    settings: SessionSettings,
    config: &Config,
    format: OutputFormat,
) -> Result<String, RespiraError> {
    let cue = build_cue(settings.sound, config);
    let mut engine = SessionEngine::new(
        settings.technique,
        settings.duration,
        settings.sound,
        cue,
    );

    enable_raw_mode()
        .map_err(|e| RespiraError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let result = run_session(&mut engine);

    // Terminal restore happens on every exit path, including errors.
    disable_raw_mode().ok();
    println!();

    match result? {
        Some(summary) => format_summary(&summary, format),
        None => Ok(String::new()),
    }
}

fn run_session(engine: &mut SessionEngine) -> Result<Option<SessionSummary>, RespiraError> {
    let mut stdout = io::stdout();
    let started = Instant::now();

    write!(
        stdout,
        "{}  press q to stop\r\n",
        engine.technique().technique().name.cyan().bold()
    )?;
    engine.start(started);
    print_instruction(&mut stdout, engine, started)?;

    loop {
        if event::poll(POLL_INTERVAL)
            .map_err(|e| RespiraError::Terminal(format!("Event poll failed: {e}")))?
        {
            if let Event::Key(key) = event::read()
                .map_err(|e| RespiraError::Terminal(format!("Event read failed: {e}")))?
            {
                let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c');
                if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(engine.stop(Instant::now()));
                }
            }
        }

        for event in engine.tick(Instant::now()) {
            match event {
                SessionEvent::PhaseStarted { .. } => {
                    print_instruction(&mut stdout, engine, started)?;
                }
                SessionEvent::ProgressSampled(progress) => {
                    print_progress(&mut stdout, progress)?;
                }
                SessionEvent::Stopped(summary) => return Ok(Some(summary)),
            }
        }
    }
}

/// Print the current instruction on its own line, replacing any progress bar
/// occupying the bottom line.
fn print_instruction(
    stdout: &mut impl Write,
    engine: &SessionEngine,
    started: Instant,
) -> Result<(), RespiraError> {
    let elapsed = format_duration_mmss(started.elapsed());
    execute!(stdout, Clear(ClearType::CurrentLine), MoveToColumn(0))?;
    write!(
        stdout,
        "{}  {}\r\n",
        elapsed.dimmed(),
        engine.view().instruction.bold()
    )?;
    stdout.flush()?;
    Ok(())
}

/// Redraw the progress bar in place on the bottom line.
fn print_progress(stdout: &mut impl Write, progress: f64) -> Result<(), RespiraError> {
    execute!(stdout, MoveToColumn(0))?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = (progress * 100.0).round() as u32;
    write!(
        stdout,
        "{} {percent:>3}%",
        render_progress_bar(progress, PROGRESS_BAR_WIDTH)
    )?;
    stdout.flush()?;
    Ok(())
}
