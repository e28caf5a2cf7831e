//! Breathing session engine.
//!
//! The pieces that drive a guided breathing exercise:
//! - Technique catalog: the fixed set of breathing patterns
//! - Session engine: deadline-driven state machine with start/stop/tick
//! - Session view: the observable state the presentation layer binds to

pub mod catalog;
pub mod engine;
pub mod view;

pub use catalog::{all_techniques, Phase, Technique, TechniqueId, VisualTarget};
pub use engine::{SessionEngine, SessionEvent, SessionState, SessionSummary};
pub use view::SessionView;
