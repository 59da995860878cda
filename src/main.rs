//! Focused Brew - a focus timer daemon
//!
//! This is the main entry point for the focused-brew application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use focused_brew::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::session_announcer_task,
    timer::TimerEngine,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focused_brew={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focused-brew server v{}", env!("CARGO_PKG_VERSION"));
    let settings = config.timer_settings();
    info!(
        "Configuration: host={}, port={}, mode={:?}, clock={}h{}m, pomodoro={}/{}/{}min every {}",
        config.host,
        config.port,
        config.mode,
        settings.clock.hours,
        settings.clock.minutes,
        settings.pomodoro.work_minutes,
        settings.pomodoro.short_break_minutes,
        settings.pomodoro.long_break_minutes,
        settings.pomodoro.sessions_before_long_break
    );

    let engine = TimerEngine::new(config.mode, settings);

    // Log session transitions in the background
    tokio::spawn(session_announcer_task(engine.events()));

    let state = Arc::new(AppState::new(config.port, config.host.clone(), engine.clone()));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /start  - Start or resume the timer");
    info!("  POST   /pause  - Pause the timer");
    info!("  POST   /reset  - Reset the timer");
    info!("  POST   /apply  - Apply draft settings");
    info!("  PUT    /mode   - Switch mode (default, pomodoro)");
    info!("  GET    /draft  - Show draft settings");
    info!("  PUT    /draft  - Stage a settings field");
    info!("  DELETE /draft  - Discard draft settings");
    info!("  GET    /status - Current timer state");
    info!("  GET    /events - Timer state stream (SSE)");
    info!("  GET    /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = engine.shutdown() {
        tracing::error!("Failed to stop timer engine: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
