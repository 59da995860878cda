//! Timer core
//!
//! Pure helpers, the Pomodoro session policy, the countdown state machine
//! and the engine that drives it once per second.

pub mod countdown;
pub mod engine;
pub mod format;
pub mod policy;
pub mod settings;

// Re-export main types
pub use countdown::{Countdown, TickOutcome};
pub use engine::{TimerEngine, TimerEvent, TICK_PERIOD};
pub use format::{fill_ratio, format_time};
pub use policy::PomodoroSession;
pub use settings::{
    normalize_field_value, ClockSettings, DraftField, DraftSettings, PomodoroSettings, Settings,
    TimerMode,
};
