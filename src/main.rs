use clickereen_api::{config::Config, seed, states::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env();
    let state = AppState::new(config.jwt_secret.clone());
    seed::seed(&state);

    let app = clickereen_api::app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    info!("Clickereen API running on http://{}", addr);
    info!("Environment: {}", config.environment);
    info!("  GET    /health                      - Health check");
    info!("  POST   /api/auth/register|login     - Accounts");
    info!("  GET    /api/posts                   - Feed (paginated)");
    info!("  GET    /api/notifications           - Notifications (auth)");
    info!("  GET    /api/livestreams             - Livestreams");
    info!("  GET    /api/analytics/overview      - Analytics (auth)");

    axum::serve(listener, app).await.unwrap();
}
