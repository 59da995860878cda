//! Focused Brew - a focus timer daemon
//!
//! This library provides the timer engine (plain countdown and self-advancing
//! Pomodoro sessions) and the HTTP surface that lets widgets drive it.

pub mod config;
pub mod state;
pub mod timer;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerState};
pub use timer::{fill_ratio, format_time, TimerEngine};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
