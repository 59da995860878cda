//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod session_announcer;

// Re-export main functions
pub use session_announcer::session_announcer_task;
