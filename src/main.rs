//! Countdown Deck - a local multi-timer service
//!
//! This is the main entry point for the countdown-deck binary.

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use countdown_deck::{
    api::create_router,
    config::{Config, NotifierKind},
    services::{DesktopNotifier, LogNotifier, Notifier},
    state::AppState,
    tasks::{clock_task, completion_dispatch_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_deck={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-deck v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, max_timers={}, notifier={:?}, sound={}",
          config.host, config.port, config.max_timers, config.notifier, config.sound);

    let notifier: Arc<dyn Notifier> = match config.notifier {
        NotifierKind::Desktop => Arc::new(DesktopNotifier::new(config.sound)),
        NotifierKind::Log => Arc::new(LogNotifier),
    };

    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.max_timers));

    // Probe once; a denial is only an advisory
    state.set_permission(notifier.request_permission().await);

    let cancel = CancellationToken::new();

    // Subscribe before the clock can produce a completion
    let completion_rx = state.subscribe_completions();
    let dispatch = tokio::spawn(completion_dispatch_task(
        Arc::clone(&state),
        completion_rx,
        notifier,
        cancel.clone(),
    ));
    let clock = tokio::spawn(clock_task(Arc::clone(&state), config.tick_period(), cancel.clone()));

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timers                - List timers");
    info!("  POST /timers                - Add a timer ({{\"duration\": \"90\"}} or {{\"preset\": 300}})");
    info!("  POST /timers/:id/start      - Start a timer");
    info!("  POST /timers/:id/pause      - Pause a timer");
    info!("  POST /timers/:id/reset      - Zero a timer");
    info!("  POST /timers/reset-all      - Remove every timer");
    info!("  GET  /presets               - Preset durations");
    info!("  GET  /status                - Timers, notifier and server status");
    info!("  GET  /health                - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown signal received, stopping clock");
    cancel.cancel();
    let _ = tokio::join!(clock, dispatch);

    info!("Server shutdown complete");
    Ok(())
}
