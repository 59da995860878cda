//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::TimerState,
    timer::{DraftField, DraftSettings, TimerMode},
};

/// API response structure for timer command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Phase after the command: idle, paused or running
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a response whose status mirrors the timer phase
    pub fn new(message: String, timer: TimerState) -> Self {
        Self {
            status: timer.phase.as_str().to_string(),
            message,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Status response with server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Draft settings for the active mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftResponse {
    pub timestamp: DateTime<Utc>,
    pub draft: DraftSettings,
}

impl DraftResponse {
    pub fn new(draft: DraftSettings) -> Self {
        Self {
            timestamp: Utc::now(),
            draft,
        }
    }
}

/// Body of PUT /mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeRequest {
    pub mode: TimerMode,
}

/// Body of PUT /draft. `value` is raw client input, normalized server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftFieldRequest {
    pub field: DraftField,
    pub value: serde_json::Value,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
