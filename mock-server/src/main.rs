use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let origin = std::env::var("CORS_ORIGIN").unwrap_or_else(|_| mock_server::DEFAULT_CORS_ORIGIN.to_string());
    let app = mock_server::layered(mock_server::app(), &origin).map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("invalid CORS_ORIGIN `{origin}`: {e}"))
    })?;
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, %origin, "listening");
    axum::serve(listener, app).await
}
