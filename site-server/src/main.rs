use anyhow::Result;
use tracing::{info, warn};

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use data::repositories::memory::MemoryStore;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let jwt = JwtService::new(&settings.jwt_secret, settings.jwt_ttl_seconds);
    let state = match &settings.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            run_migrations(&pool).await?;
            AppState::postgres(pool, jwt, settings.session_cookie_secure)
        }
        None => {
            warn!("DATABASE_URL not set, data lives in memory only");
            AppState::in_memory(MemoryStore::new(), jwt, settings.session_cookie_secure)
        }
    };

    info!(addr = %settings.http_addr, "starting site server");
    server::run_http(&settings, state).await
}
