//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the ClubMate application.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard owns the background file writer; the caller must keep
/// it alive for the lifetime of the process or file output stops.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "clubmate.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log admission decisions with structured data
pub fn log_admission(user_id: &str, target: &str, target_id: i64, outcome: &str) {
    info!(
        user_id = user_id,
        target = target,
        target_id = target_id,
        outcome = outcome,
        "Admission decision"
    );
}

/// Log admin authoring actions
pub fn log_admin_action(action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log assistant exchanges
pub fn log_assistant_exchange(session_id: &str, prompt_chars: usize, reply_chars: usize) {
    debug!(
        session_id = session_id,
        prompt_chars = prompt_chars,
        reply_chars = reply_chars,
        "Assistant exchange completed"
    );
}

/// Log side-effect failures that do not fail the admission
pub fn log_side_effect_failure(effect: &str, error: &str) {
    warn!(
        effect = effect,
        error = error,
        "Side effect failed; admission unaffected"
    );
}
