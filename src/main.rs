//! ClubMate Admission Service
//!
//! Main application entry point: loads configuration, connects to the
//! store, and runs an interactive assistant session on stdin/stdout.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

use clubmate::{
    config::Settings,
    database::{connection::create_pool, DatabaseService, PoolConfig},
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard keeps the file writer alive
    let _logging_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", clubmate::info());

    // Initialize database connection
    info!("Connecting to database...");
    let pool = create_pool(&PoolConfig::from(&settings.database)).await?;

    // Run database migrations
    clubmate::database::run_migrations(&pool).await?;

    // Initialize services
    info!("Initializing services...");
    let database = DatabaseService::new(pool);
    let services = ServiceFactory::new(database, settings)?;

    services.health_check().await?;
    info!("ClubMate admission service is ready");

    run_assistant_loop(&services).await?;

    info!("ClubMate admission service has been shut down.");
    Ok(())
}

/// Relay stdin turns to a grounded assistant session until EOF.
///
/// Completion failures surface as a retryable notice; the session and its
/// history are preserved across them.
async fn run_assistant_loop(services: &ServiceFactory) -> anyhow::Result<()> {
    let mut session = services.assistant.start_session().await?;
    info!(session_id = %session.id, "Assistant session ready; type a question or Ctrl-D to exit");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(b"> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if !text.is_empty() {
            match services.assistant.send_message(&mut session, text).await {
                Ok(reply) => {
                    stdout.write_all(reply.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                }
                Err(e) => {
                    error!(error = %e, "Assistant exchange failed");
                    let notice = e
                        .user_notice()
                        .unwrap_or_else(|| "Something went wrong. Please try again.".to_string());
                    stdout.write_all(notice.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                }
            }
        }

        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    Ok(())
}
