use crm_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and JWT_SECRET
    let _ = dotenvy::dotenv();
    crm_api::init_tracing();

    let config = AppConfig::from_env()?;
    crm_api::app::serve(config).await
}
