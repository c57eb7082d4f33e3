use rinkbook::server::{
    config::Config,
    error::Error,
    model::{app::AppState, auth::OAuthProviders},
    router, startup,
    util::time::RinkClock,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(config).await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn serve(config: Config) -> Result<(), Error> {
    let http_client = startup::build_http_client()?;
    let providers = OAuthProviders::from_config(&config)?;
    let session = startup::connect_to_session(&config).await?;
    let db = startup::connect_to_database(&config).await?;

    if providers.enabled().is_empty() {
        tracing::warn!("No OAuth providers configured, only testing login is available");
    }
    if config.testing {
        tracing::warn!("Testing mode is on, anyone can log in through /testing/api/login");
    }

    let state = AppState::new(
        db,
        http_client,
        providers,
        RinkClock::system(config.timezone),
        config.max_bookings_per_day,
        config.testing,
    );

    let app = router::routes().with_state(state).layer(session);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    tracing::info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
