use cep_weather::{AppConfig, logging, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    logging::init(&config)?;

    tracing::info!(
        "cep-weather v{} (lookup: {}, weather: {}, timeout: {}s)",
        cep_weather::VERSION,
        config.viacep_base_url,
        config.weather_base_url,
        config.http_timeout_seconds
    );

    web::run(config).await
}
