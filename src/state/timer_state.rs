//! Published timer state

use serde::{Deserialize, Serialize};

use crate::timer::{fill_ratio, format_time, PomodoroSession, TimerMode};

/// Coarse countdown phase derived from remaining time and the running flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Paused,
    Running,
}

impl Phase {
    pub fn derive(remaining_seconds: u64, is_running: bool) -> Self {
        match (remaining_seconds, is_running) {
            (0, _) => Phase::Idle,
            (_, true) => Phase::Running,
            (_, false) => Phase::Paused,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Paused => "paused",
            Phase::Running => "running",
        }
    }
}

/// Point-in-time view of the engine handed to consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: TimerMode,
    pub pomodoro_session: PomodoroSession,
    pub session_count: u32,
    /// Committed plain-countdown duration
    pub hours: u32,
    pub minutes: u32,
    pub total_seconds: u64,
    pub remaining_seconds: u64,
    pub is_running: bool,
    pub phase: Phase,
    /// `remaining_seconds` as `HH:MM:SS`
    pub display: String,
    pub fill_ratio: f64,
}

impl TimerState {
    /// Create a state with derived fields filled in
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mode: TimerMode,
        pomodoro_session: PomodoroSession,
        session_count: u32,
        hours: u32,
        minutes: u32,
        total_seconds: u64,
        remaining_seconds: u64,
        is_running: bool,
    ) -> Self {
        Self {
            mode,
            pomodoro_session,
            session_count,
            hours,
            minutes,
            total_seconds,
            remaining_seconds,
            is_running,
            phase: Phase::derive(remaining_seconds, is_running),
            display: format_time(remaining_seconds),
            fill_ratio: fill_ratio(total_seconds, remaining_seconds),
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(TimerMode::Default, PomodoroSession::Work, 1, 0, 0, 0, 0, false)
    }
}
