//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own, without demo data seeding.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST server
//! (with OpenAPI/Swagger UI). The workspace's main `medibook-run` binary adds
//! startup configuration and optional demo seeding.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use medibook_core::{BookingService, MemoryStore};

/// Main entry point for the MediBook REST API server.
///
/// Starts the REST API server on the configured address (default:
/// 0.0.0.0:3000) with HTTP endpoints for registration, the doctor directory
/// and appointment lifecycle operations.
///
/// # Environment Variables
/// - `MEDIBOOK_REST_ADDR`: Server address (default: "0.0.0.0:3000")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MEDIBOOK_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting MediBook REST API on {}", addr);

    let service = Arc::new(BookingService::new(MemoryStore::new()));
    let app = router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
