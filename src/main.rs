use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use student_ledger_backend::app::app::App;

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,student_ledger_backend=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .init();

    info!("🚀 Starting Student Ledger Backend");

    match dotenv() {
        Ok(_) => info!("✅ Loaded environment from .env"),
        Err(e) => warn!("⚠️ No .env file loaded: {} (falling back to process env)", e),
    }

    let app = App::new().await;
    app.start().await;
}
