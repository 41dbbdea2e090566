use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sghss::api::{api_router, ApiContext};
use sghss::auth::TokenSigner;
use sghss::config::{Config, APP_NAME, APP_VERSION};
use sghss::db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sghss=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        app = APP_NAME,
        version = APP_VERSION,
        database = %config.database_path.display(),
        "starting"
    );

    let db = Database::open(&config.database_path)?;
    let tokens = TokenSigner::new(&config.token_secret, config.token_expiry_secs);
    let app = api_router(ApiContext::new(db, tokens));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
