//! Pomodoro session policy

use serde::{Deserialize, Serialize};

use super::settings::PomodoroSettings;

/// Kind of the current Pomodoro interval
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PomodoroSession {
    #[default]
    Work,
    Break,
}

/// True when the break following work session `session_count` is a long one.
///
/// A cadence below 1 is treated as 1.
pub fn is_long_break(session_count: u32, settings: &PomodoroSettings) -> bool {
    let every = settings.sessions_before_long_break.max(1);
    session_count % every == 0
}

/// Length of `session` at `session_count`, in minutes (never less than 1)
pub fn session_minutes(
    session: PomodoroSession,
    session_count: u32,
    settings: &PomodoroSettings,
) -> u32 {
    let minutes = match session {
        PomodoroSession::Work => settings.work_minutes,
        PomodoroSession::Break if is_long_break(session_count, settings) => {
            settings.long_break_minutes
        }
        PomodoroSession::Break => settings.short_break_minutes,
    };
    minutes.max(1)
}

/// Length of `session` at `session_count`, in seconds
pub fn session_seconds(
    session: PomodoroSession,
    session_count: u32,
    settings: &PomodoroSettings,
) -> u64 {
    u64::from(session_minutes(session, session_count, settings)) * 60
}

/// Session that follows `current`, with its ordinal.
///
/// Work is followed by a break at the same ordinal; a break is followed by
/// the next work session.
pub fn next_session(current: PomodoroSession, session_count: u32) -> (PomodoroSession, u32) {
    match current {
        PomodoroSession::Work => (PomodoroSession::Break, session_count),
        PomodoroSession::Break => (PomodoroSession::Work, session_count.saturating_add(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> PomodoroSettings {
        PomodoroSettings {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            sessions_before_long_break: 4,
        }
    }

    #[test]
    fn work_is_followed_by_break_at_same_count() {
        assert_eq!(next_session(PomodoroSession::Work, 3), (PomodoroSession::Break, 3));
    }

    #[test]
    fn break_is_followed_by_next_work_session() {
        assert_eq!(next_session(PomodoroSession::Break, 3), (PomodoroSession::Work, 4));
    }

    #[test]
    fn every_fourth_break_is_long() {
        let settings = classic();
        assert_eq!(session_minutes(PomodoroSession::Break, 1, &settings), 5);
        assert_eq!(session_minutes(PomodoroSession::Break, 3, &settings), 5);
        assert_eq!(session_minutes(PomodoroSession::Break, 4, &settings), 15);
        assert_eq!(session_minutes(PomodoroSession::Break, 8, &settings), 15);
        assert_eq!(session_seconds(PomodoroSession::Work, 4, &settings), 1500);
    }

    #[test]
    fn zero_cadence_behaves_like_one() {
        let settings = PomodoroSettings {
            sessions_before_long_break: 0,
            ..classic()
        };
        assert!(is_long_break(1, &settings));
        assert_eq!(session_minutes(PomodoroSession::Break, 7, &settings), 15);
    }

    #[test]
    fn zero_durations_are_raised_to_one_minute() {
        let settings = PomodoroSettings {
            work_minutes: 0,
            short_break_minutes: 0,
            long_break_minutes: 0,
            sessions_before_long_break: 4,
        };
        assert_eq!(session_seconds(PomodoroSession::Work, 1, &settings), 60);
        assert_eq!(session_seconds(PomodoroSession::Break, 1, &settings), 60);
    }
}
