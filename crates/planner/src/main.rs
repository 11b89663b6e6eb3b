//! Planner HTTP server.
//!
//! Usage: `planner-server [config.json]`. Without a config file the
//! defaults from [`ServerConfig`] are used.

use std::env;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use planner::calendar::SemesterCalendar;
use planner::config::ServerConfig;
use planner::db::PlannerDb;
use planner::server::create_router;
use planner::types::PlannerState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            ServerConfig::load_from_file(Path::new(&path)).map_err(|e| anyhow::anyhow!(e))?
        }
        None => ServerConfig::default(),
    };

    let calendar = match &config.calendar_path {
        Some(path) => {
            info!("Loading semester calendar from {}", path.display());
            SemesterCalendar::load_from_file(path)?
        }
        None => SemesterCalendar::default(),
    };

    let db = PlannerDb::new(&config.database_path)?;
    let state = Arc::new(PlannerState::new(calendar, db));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.address, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Planner server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
