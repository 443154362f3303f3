use std::env;
use std::error::Error;
use std::path::Path;

use crew_planner::api::{AppState, create_router};
use crew_planner::config::{ConfigLoader, PlanningConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error + Send + Sync>> {
    init_tracing()?;

    let config = load_config()?;
    let state = AppState::from_config(config)?;
    let app = create_router(state);

    let addr = env::var("CREW_PLANNER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!(address = %addr, "Crew planner listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() -> Result<(), Box<dyn Error + Send + Sync>> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new("info")?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init()
}

/// Uses `CREW_PLANNER_CONFIG` when set, then the bundled defaults directory,
/// then the built-in defaults.
fn load_config() -> Result<PlanningConfig, Box<dyn Error + Send + Sync>> {
    if let Ok(dir) = env::var("CREW_PLANNER_CONFIG") {
        return Ok(ConfigLoader::load(&dir)?.into_config());
    }
    if Path::new(DEFAULT_CONFIG_DIR).is_dir() {
        return Ok(ConfigLoader::load(DEFAULT_CONFIG_DIR)?.into_config());
    }
    info!("No configuration directory found, using built-in defaults");
    Ok(PlanningConfig::default())
}
