//! Session announcer background task

use tokio::sync::broadcast::{error::RecvError, Receiver};
use tracing::{debug, info, warn};

use crate::timer::{format_time, PomodoroSession, TimerEvent};

/// Human-readable line for events worth announcing
pub fn announcement(event: &TimerEvent) -> Option<String> {
    match event {
        TimerEvent::Started { total_seconds, remaining_seconds } => Some(format!(
            "Focus timer running, {} left of {}",
            format_time(*remaining_seconds),
            format_time(*total_seconds)
        )),
        TimerEvent::Completed => Some("Time's up!".to_string()),
        TimerEvent::SessionAdvanced {
            session: PomodoroSession::Break,
            session_count,
            total_seconds,
        } => Some(format!(
            "Work session {} done, take a {} break",
            session_count,
            format_time(*total_seconds)
        )),
        TimerEvent::SessionAdvanced {
            session: PomodoroSession::Work,
            session_count,
            ..
        } => Some(format!("Break over, starting work session {}", session_count)),
        TimerEvent::Paused { .. }
        | TimerEvent::Reset
        | TimerEvent::SettingsApplied { .. }
        | TimerEvent::ModeChanged { .. } => None,
    }
}

/// Background task that reports timer transitions until the engine goes away
pub async fn session_announcer_task(mut events: Receiver<TimerEvent>) {
    info!("Starting session announcer task");

    loop {
        match events.recv().await {
            Ok(event) => {
                debug!("Announcer received event: {:?}", event);
                if let Some(line) = announcement(&event) {
                    info!("{}", line);
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Session announcer lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                debug!("Timer event channel closed, announcer exiting");
                break;
            }
        }
    }
}
