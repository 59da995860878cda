//! State management module
//!
//! This module contains the published timer state and the server-wide
//! application state.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::{Phase, TimerState};
