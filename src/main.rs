use std::error::Error;

use api::common::app_state::AppConfig;
use tracing::{info, warn};

mod telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file, if present.
    let dotenv = dotenvy::dotenv();

    telemetry::init()?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => warn!("no .env file found, using process environment"),
        Err(e) => return Err(e.into()),
    }

    // Missing GEMINI_API_KEY stops the process here.
    let config = AppConfig::from_env()?;

    api::start(config).await?;

    Ok(())
}
