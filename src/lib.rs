//! respira - Guided breathing exercises for your terminal
//!
//! This crate provides a breathing session engine (technique catalog, a
//! deadline-driven session state machine, and an audio cue emitter) together
//! with a CLI and a ratatui-based full-screen interface.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod output;
pub mod session;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::RespiraError;
pub use session::{SessionEngine, SessionView, TechniqueId};
