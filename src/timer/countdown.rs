//! Countdown state machine
//!
//! `Countdown` holds every piece of timer state and implements each command as
//! a synchronous transition. It knows nothing about wall-clock time: the engine
//! calls [`Countdown::tick`] once per elapsed second while it is running.

use super::{
    policy::{self, PomodoroSession},
    settings::{DraftField, DraftSettings, Settings, TimerMode},
};
use crate::state::{Phase, TimerState};

/// Result of delivering one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown was not running, nothing changed
    Ignored,
    /// One second elapsed, time remains
    Continued,
    /// Plain countdown reached zero and stopped
    Completed,
    /// Pomodoro session ended and the next one started
    SessionAdvanced {
        session: PomodoroSession,
        session_count: u32,
        total_seconds: u64,
    },
}

#[derive(Debug, Clone)]
pub struct Countdown {
    mode: TimerMode,
    committed: Settings,
    draft: Settings,
    total_seconds: u64,
    remaining_seconds: u64,
    is_running: bool,
    session_count: u32,
    pomodoro_session: PomodoroSession,
}

impl Countdown {
    /// Create an idle countdown with zero duration
    pub fn new(mode: TimerMode, settings: Settings) -> Self {
        Self {
            mode,
            committed: settings,
            draft: settings,
            total_seconds: 0,
            remaining_seconds: 0,
            is_running: false,
            session_count: 1,
            pomodoro_session: PomodoroSession::Work,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn pomodoro_session(&self) -> PomodoroSession {
        self.pomodoro_session
    }

    pub fn session_count(&self) -> u32 {
        self.session_count
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn phase(&self) -> Phase {
        Phase::derive(self.remaining_seconds, self.is_running)
    }

    pub fn committed(&self) -> &Settings {
        &self.committed
    }

    /// Uncommitted settings for the active mode
    pub fn draft(&self) -> DraftSettings {
        self.draft.for_mode(self.mode)
    }

    pub fn snapshot(&self) -> TimerState {
        TimerState::new(
            self.mode,
            self.pomodoro_session,
            self.session_count,
            self.committed.clock.hours,
            self.committed.clock.minutes,
            self.total_seconds,
            self.remaining_seconds,
            self.is_running,
        )
    }

    /// Start or resume.
    ///
    /// An idle countdown is seeded first: from the committed clock duration in
    /// Default mode, from the current session's length in Pomodoro mode.
    /// Returns whether the countdown is running afterwards.
    pub fn start(&mut self) -> bool {
        if self.remaining_seconds == 0 {
            let seed = match self.mode {
                TimerMode::Default => self.committed.clock.total_seconds(),
                TimerMode::Pomodoro => policy::session_seconds(
                    self.pomodoro_session,
                    self.session_count,
                    &self.committed.pomodoro,
                ),
            };
            if seed > 0 {
                self.seed(seed);
            }
        }

        if self.remaining_seconds > 0 {
            self.is_running = true;
        }
        self.is_running
    }

    /// Stop ticking without losing remaining time. Returns whether anything changed.
    pub fn pause(&mut self) -> bool {
        let was_running = self.is_running;
        self.is_running = false;
        was_running
    }

    /// Drop back to idle with zero duration.
    ///
    /// Committed clock settings are kept so the next start reseeds from them.
    pub fn reset(&mut self) {
        self.is_running = false;
        self.total_seconds = 0;
        self.remaining_seconds = 0;
        if self.mode == TimerMode::Pomodoro {
            self.pomodoro_session = PomodoroSession::Work;
            self.session_count = 1;
        }
    }

    /// Commit the draft for the active mode.
    ///
    /// Default mode resizes the countdown to the new duration in place.
    /// Pomodoro mode throws away the current session and starts work session 1.
    /// Returns whether the countdown is running afterwards.
    pub fn apply_settings(&mut self) -> bool {
        match self.mode {
            TimerMode::Default => {
                self.committed.clock = self.draft.clock;
                self.seed(self.committed.clock.total_seconds());
                if self.remaining_seconds == 0 {
                    self.is_running = false;
                }
            }
            TimerMode::Pomodoro => {
                self.committed.pomodoro = self.draft.pomodoro;
                self.pomodoro_session = PomodoroSession::Work;
                self.session_count = 1;
                self.seed(policy::session_seconds(
                    PomodoroSession::Work,
                    1,
                    &self.committed.pomodoro,
                ));
                self.is_running = true;
            }
        }
        self.is_running
    }

    pub fn set_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
    }

    pub fn set_draft_field(&mut self, field: DraftField, value: u32) {
        self.draft.set_field(field, value);
    }

    /// Discard uncommitted edits
    pub fn cancel_draft(&mut self) {
        self.draft = self.committed;
    }

    /// Advance by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running || self.remaining_seconds == 0 {
            return TickOutcome::Ignored;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds > 0 {
            return TickOutcome::Continued;
        }

        self.is_running = false;
        match self.mode {
            TimerMode::Default => TickOutcome::Completed,
            TimerMode::Pomodoro => {
                let (session, session_count) =
                    policy::next_session(self.pomodoro_session, self.session_count);
                self.pomodoro_session = session;
                self.session_count = session_count;
                let total_seconds =
                    policy::session_seconds(session, session_count, &self.committed.pomodoro);
                self.seed(total_seconds);
                self.is_running = true;
                TickOutcome::SessionAdvanced {
                    session,
                    session_count,
                    total_seconds,
                }
            }
        }
    }

    fn seed(&mut self, seconds: u64) {
        self.total_seconds = seconds;
        self.remaining_seconds = seconds;
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(TimerMode::Default, Settings::default())
    }
}
