use mock_server::{MockConfig, DEFAULT_APP_ID, DEFAULT_APP_KEY};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mock_server=info,tower_http=info")))
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let config = MockConfig {
        app_id: std::env::var("MOCK_APP_ID").unwrap_or_else(|_| DEFAULT_APP_ID.to_string()),
        app_key: std::env::var("MOCK_APP_KEY").unwrap_or_else(|_| DEFAULT_APP_KEY.to_string()),
    };
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, app_id = %config.app_id, "mock food database listening");
    mock_server::run_with(listener, config).await
}
