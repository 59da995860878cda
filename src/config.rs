//! Configuration and CLI argument handling

use clap::Parser;

use crate::timer::{ClockSettings, PomodoroSettings, Settings, TimerMode};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "focused-brew")]
#[command(about = "A focus timer daemon with plain countdown and Pomodoro session cycling")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Mode the timer starts in
    #[arg(long, value_enum, default_value = "default")]
    pub mode: TimerMode,

    /// Plain countdown hours (0-23)
    #[arg(long, default_value = "0")]
    pub hours: u32,

    /// Plain countdown minutes (0-59)
    #[arg(long, default_value = "0")]
    pub minutes: u32,

    /// Pomodoro work session length in minutes
    #[arg(long, default_value = "25")]
    pub work: u32,

    /// Pomodoro short break length in minutes
    #[arg(long, default_value = "5")]
    pub short_break: u32,

    /// Pomodoro long break length in minutes
    #[arg(long, default_value = "15")]
    pub long_break: u32,

    /// Work sessions before a long break (at least 2)
    #[arg(long, default_value = "4")]
    pub long_break_every: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial committed timer settings, clamped into valid ranges
    pub fn timer_settings(&self) -> Settings {
        Settings {
            clock: ClockSettings::new(self.hours, self.minutes),
            pomodoro: PomodoroSettings::new(
                self.work,
                self.short_break,
                self.long_break,
                self.long_break_every,
            ),
        }
    }
}
