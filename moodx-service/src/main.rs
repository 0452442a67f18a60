use moodx::Config;
use moodx_service::{AppState, build_router, init_tracing};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Nothing runs without the API key.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("❌ {e}. Set GROQ_API_KEY in the environment or a .env file.");
            std::process::exit(1);
        }
    };
    info!(model = %config.model, endpoint = %config.endpoint, "Configuration loaded");

    let app = build_router(AppState::from_config(&config));
    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    let addr = listener.local_addr()?;

    info!("MoodX Machina running on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /health     - Health check");
    info!("  POST /recommend  - Analyze mood and generate recommendations");
    info!("  POST /parse      - Parse raw completion text");

    axum::serve(listener, app).await?;

    Ok(())
}
