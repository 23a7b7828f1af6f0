use std::net::SocketAddr;

use models::Settings;

use crate::{router::create_router, state::AppState};

/// Run the API server
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rates_api=debug,tower_http=debug,axum=trace".into()),
        )
        .init();

    let addr = format!("{}:{}", settings.host, settings.port).parse::<SocketAddr>()?;
    tracing::info!(
        "Tax percent: {}%, CORS headers: {:?}",
        settings.tax_percent,
        settings.cors_headers
    );

    let app = create_router(AppState::shared(settings));

    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
