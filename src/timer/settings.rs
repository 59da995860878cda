//! Timer configuration and the settings input boundary

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which duration policy governs the countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Plain countdown from a configured hours/minutes duration
    #[default]
    Default,
    /// Self-advancing work/break cycle
    Pomodoro,
}

/// Plain countdown duration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSettings {
    pub hours: u32,
    pub minutes: u32,
}

impl ClockSettings {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self {
            hours: DraftField::Hours.clamp(hours),
            minutes: DraftField::Minutes.clamp(minutes),
        }
    }

    /// Duration in seconds
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60
    }
}

/// Pomodoro durations (minutes) and long-break cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroSettings {
    pub work_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    pub sessions_before_long_break: u32,
}

impl PomodoroSettings {
    pub fn new(work: u32, short_break: u32, long_break: u32, sessions_before_long_break: u32) -> Self {
        Self {
            work_minutes: DraftField::WorkMinutes.clamp(work),
            short_break_minutes: DraftField::ShortBreakMinutes.clamp(short_break),
            long_break_minutes: DraftField::LongBreakMinutes.clamp(long_break),
            sessions_before_long_break: DraftField::SessionsBeforeLongBreak
                .clamp(sessions_before_long_break),
        }
    }
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            sessions_before_long_break: 4,
        }
    }
}

/// Full configuration for both modes.
///
/// The engine keeps one committed copy and one draft copy of this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub clock: ClockSettings,
    pub pomodoro: PomodoroSettings,
}

impl Settings {
    /// View of the settings that belong to `mode`
    pub fn for_mode(&self, mode: TimerMode) -> DraftSettings {
        match mode {
            TimerMode::Default => DraftSettings::Default(self.clock),
            TimerMode::Pomodoro => DraftSettings::Pomodoro(self.pomodoro),
        }
    }

    /// Store an already-normalized value into the named field
    pub fn set_field(&mut self, field: DraftField, value: u32) {
        let value = field.clamp(value);
        match field {
            DraftField::Hours => self.clock.hours = value,
            DraftField::Minutes => self.clock.minutes = value,
            DraftField::WorkMinutes => self.pomodoro.work_minutes = value,
            DraftField::ShortBreakMinutes => self.pomodoro.short_break_minutes = value,
            DraftField::LongBreakMinutes => self.pomodoro.long_break_minutes = value,
            DraftField::SessionsBeforeLongBreak => {
                self.pomodoro.sessions_before_long_break = value
            }
        }
    }
}

/// Settings of a single mode, tagged by that mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DraftSettings {
    Default(ClockSettings),
    Pomodoro(PomodoroSettings),
}

/// Editable configuration fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Hours,
    Minutes,
    #[serde(alias = "workMinutes")]
    WorkMinutes,
    #[serde(alias = "shortBreakMinutes")]
    ShortBreakMinutes,
    #[serde(alias = "longBreakMinutes")]
    LongBreakMinutes,
    #[serde(alias = "sessionsBeforeLongBreak")]
    SessionsBeforeLongBreak,
}

impl DraftField {
    /// Mode whose configuration this field belongs to
    pub fn mode(&self) -> TimerMode {
        match self {
            DraftField::Hours | DraftField::Minutes => TimerMode::Default,
            _ => TimerMode::Pomodoro,
        }
    }

    /// Inclusive range of accepted values
    pub fn range(&self) -> (u32, u32) {
        match self {
            DraftField::Hours => (0, 23),
            DraftField::Minutes => (0, 59),
            DraftField::WorkMinutes
            | DraftField::ShortBreakMinutes
            | DraftField::LongBreakMinutes => (1, 1440),
            DraftField::SessionsBeforeLongBreak => (2, 100),
        }
    }

    pub fn clamp(&self, value: u32) -> u32 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }
}

/// Turn an arbitrary JSON value into a valid value for `field`.
///
/// Integers are clamped, fractional numbers truncated, numeric strings parsed.
/// Anything else (negatives, garbage text, null, bool, arrays, objects)
/// collapses to the field's minimum.
pub fn normalize_field_value(field: DraftField, raw: &Value) -> u32 {
    let (min, max) = field.range();

    let number = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() && n >= 0.0 => {
            let truncated = n.trunc();
            if truncated >= f64::from(max) {
                max
            } else {
                (truncated as u32).max(min)
            }
        }
        _ => min,
    }
}
