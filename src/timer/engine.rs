//! Timer engine: the countdown plus its once-per-second tick source

use std::{
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::Duration,
};
use serde::{Deserialize, Serialize};
use tokio::{
    runtime::Handle,
    sync::{broadcast, watch},
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, error, info};

use super::{
    countdown::{Countdown, TickOutcome},
    policy::PomodoroSession,
    settings::{DraftField, DraftSettings, Settings, TimerMode},
};
use crate::state::TimerState;

/// Interval between ticks while the countdown is running
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Discrete transitions, for consumers that care about edges rather than state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    Started { total_seconds: u64, remaining_seconds: u64 },
    Paused { remaining_seconds: u64 },
    Reset,
    Completed,
    SessionAdvanced {
        session: PomodoroSession,
        session_count: u32,
        total_seconds: u64,
    },
    SettingsApplied { mode: TimerMode },
    ModeChanged { mode: TimerMode },
}

/// Handle to the spawned tick task. Dropping it cancels the task.
#[derive(Debug)]
struct TickSource {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Drop for TickSource {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Debug)]
struct EngineState {
    countdown: Countdown,
    ticker: Option<TickSource>,
    generation: u64,
}

impl EngineState {
    fn cancel_tick_source(&mut self) {
        if let Some(source) = self.ticker.take() {
            debug!("Cancelling tick source #{}", source.generation);
        }
    }
}

#[derive(Debug)]
struct EngineInner {
    state: Mutex<EngineState>,
    /// Latest state for watchers
    updates_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    _updates_rx: watch::Receiver<TimerState>,
    events_tx: broadcast::Sender<TimerEvent>,
    /// Runtime the engine was created on, used to spawn tick sources
    runtime: Option<Handle>,
}

impl EngineInner {
    fn lock(&self) -> Result<MutexGuard<'_, EngineState>, String> {
        self.state
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Push the latest state to watchers if it differs from what they last saw.
    /// Called with the state lock held so watchers never observe updates out
    /// of order.
    fn publish(&self, state: &EngineState) -> TimerState {
        let snapshot = state.countdown.snapshot();
        let changed = self.updates_tx.send_if_modified(|current| {
            if *current == snapshot {
                return false;
            }
            *current = snapshot.clone();
            true
        });
        if !changed {
            debug!("Timer state unchanged, watchers not notified");
        }
        snapshot
    }

    /// Runtime to spawn tick sources on: the one captured at creation, else
    /// the caller's.
    fn runtime(&self) -> Result<Handle, String> {
        match &self.runtime {
            Some(handle) => Ok(handle.clone()),
            None => Handle::try_current()
                .map_err(|e| format!("No tokio runtime to drive the timer: {}", e)),
        }
    }

    fn emit(&self, event: TimerEvent) {
        if self.events_tx.send(event).is_err() {
            debug!("No event subscribers");
        }
    }

    /// Deliver one tick from source `generation`. Returns whether that source
    /// should keep ticking.
    fn on_tick(&self, generation: u64) -> bool {
        let mut state = match self.lock() {
            Ok(state) => state,
            Err(e) => {
                error!("Dropping tick: {}", e);
                return false;
            }
        };

        let current = state.ticker.as_ref().map(|source| source.generation);
        if current != Some(generation) {
            debug!("Ignoring tick from stale source #{}", generation);
            return false;
        }

        match state.countdown.tick() {
            TickOutcome::Ignored => {
                state.cancel_tick_source();
                false
            }
            TickOutcome::Continued => {
                debug!("Tick: {}s remaining", state.countdown.remaining_seconds());
                self.publish(&state);
                true
            }
            TickOutcome::Completed => {
                info!("Countdown finished");
                state.cancel_tick_source();
                self.publish(&state);
                self.emit(TimerEvent::Completed);
                false
            }
            TickOutcome::SessionAdvanced {
                session,
                session_count,
                total_seconds,
            } => {
                info!(
                    "Pomodoro advanced to {:?} session {} ({}s)",
                    session, session_count, total_seconds
                );
                self.publish(&state);
                self.emit(TimerEvent::SessionAdvanced {
                    session,
                    session_count,
                    total_seconds,
                });
                true
            }
        }
    }
}

async fn tick_source_task(engine: Weak<EngineInner>, generation: u64) {
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

    loop {
        interval.tick().await;

        let Some(inner) = engine.upgrade() else {
            debug!("Engine dropped, tick source #{} exiting", generation);
            break;
        };
        if !inner.on_tick(generation) {
            break;
        }
    }
}

/// Shared handle to the timer.
///
/// All commands are synchronous state transitions. Entering Running spawns
/// the tick source on a tokio runtime (the one the engine was created on, or
/// else the caller's); every way out of Running cancels it before returning.
/// `start` and `apply_settings` fail without changing anything when no
/// runtime is available.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    inner: Arc<EngineInner>,
}

impl TimerEngine {
    /// Create an idle engine with the given committed settings
    pub fn new(mode: TimerMode, settings: Settings) -> Self {
        let countdown = Countdown::new(mode, settings);
        let (updates_tx, updates_rx) = watch::channel(countdown.snapshot());
        let (events_tx, _) = broadcast::channel(64);

        Self {
            inner: Arc::new(EngineInner {
                state: Mutex::new(EngineState {
                    countdown,
                    ticker: None,
                    generation: 0,
                }),
                updates_tx,
                _updates_rx: updates_rx,
                events_tx,
                runtime: Handle::try_current().ok(),
            }),
        }
    }

    /// Current state
    pub fn snapshot(&self) -> Result<TimerState, String> {
        Ok(self.inner.lock()?.countdown.snapshot())
    }

    /// Draft settings for the active mode
    pub fn draft(&self) -> Result<DraftSettings, String> {
        Ok(self.inner.lock()?.countdown.draft())
    }

    /// Watch the latest state
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.inner.updates_tx.subscribe()
    }

    /// Receive discrete transition events
    pub fn events(&self) -> broadcast::Receiver<TimerEvent> {
        self.inner.events_tx.subscribe()
    }

    /// Whether a tick source is currently scheduled
    pub fn has_tick_source(&self) -> bool {
        self.inner
            .lock()
            .map(|state| state.ticker.is_some())
            .unwrap_or(false)
    }

    /// Start or resume. Errors if no tokio runtime is available.
    pub fn start(&self) -> Result<TimerState, String> {
        let runtime = self.inner.runtime()?;
        let mut state = self.inner.lock()?;

        if state.countdown.start() {
            self.spawn_tick_source(&mut state, &runtime);
            info!(
                "Timer started: {}s of {}s",
                state.countdown.remaining_seconds(),
                state.countdown.total_seconds()
            );
            self.inner.emit(TimerEvent::Started {
                total_seconds: state.countdown.total_seconds(),
                remaining_seconds: state.countdown.remaining_seconds(),
            });
        } else {
            debug!("Start ignored, no duration configured");
        }

        Ok(self.inner.publish(&state))
    }

    pub fn pause(&self) -> Result<TimerState, String> {
        let mut state = self.inner.lock()?;

        if state.countdown.pause() {
            state.cancel_tick_source();
            info!("Timer paused at {}s", state.countdown.remaining_seconds());
            self.inner.emit(TimerEvent::Paused {
                remaining_seconds: state.countdown.remaining_seconds(),
            });
        }

        Ok(self.inner.publish(&state))
    }

    pub fn reset(&self) -> Result<TimerState, String> {
        let mut state = self.inner.lock()?;

        state.cancel_tick_source();
        state.countdown.reset();
        info!("Timer reset");
        self.inner.emit(TimerEvent::Reset);

        Ok(self.inner.publish(&state))
    }

    /// Commit the draft for the active mode. Errors if no tokio runtime is
    /// available.
    pub fn apply_settings(&self) -> Result<TimerState, String> {
        let runtime = self.inner.runtime()?;
        let mut state = self.inner.lock()?;

        let mode = state.countdown.mode();
        if state.countdown.apply_settings() {
            self.spawn_tick_source(&mut state, &runtime);
        } else {
            state.cancel_tick_source();
        }
        info!("Applied {:?} settings: {:?}", mode, state.countdown.draft());
        self.inner.emit(TimerEvent::SettingsApplied { mode });

        Ok(self.inner.publish(&state))
    }

    pub fn set_mode(&self, mode: TimerMode) -> Result<TimerState, String> {
        let mut state = self.inner.lock()?;

        if state.countdown.mode() != mode {
            state.countdown.set_mode(mode);
            info!("Mode set to {:?}", mode);
            self.inner.emit(TimerEvent::ModeChanged { mode });
        }

        Ok(self.inner.publish(&state))
    }

    /// Stage a value for `field`. The value is clamped into the field's range.
    pub fn set_draft_field(&self, field: DraftField, value: u32) -> Result<DraftSettings, String> {
        let mut state = self.inner.lock()?;

        state.countdown.set_draft_field(field, value);
        debug!("Draft {:?} ({:?} mode) set to {}", field, field.mode(), value);

        Ok(state.countdown.draft())
    }

    /// Throw away staged edits
    pub fn cancel_draft(&self) -> Result<DraftSettings, String> {
        let mut state = self.inner.lock()?;

        state.countdown.cancel_draft();
        debug!("Draft discarded");

        Ok(state.countdown.draft())
    }

    /// Stop the tick source for good. Any tick already in flight is discarded.
    pub fn shutdown(&self) -> Result<(), String> {
        let mut state = self.inner.lock()?;

        state.cancel_tick_source();
        state.countdown.pause();
        info!("Timer engine shut down");
        Ok(())
    }

    /// Replace any running tick source with a fresh one
    fn spawn_tick_source(&self, state: &mut EngineState, runtime: &Handle) {
        state.cancel_tick_source();

        state.generation += 1;
        let generation = state.generation;
        let handle = runtime.spawn(tick_source_task(Arc::downgrade(&self.inner), generation));
        debug!("Spawned tick source #{}", generation);

        state.ticker = Some(TickSource { generation, handle });
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerMode::Default, Settings::default())
    }
}
