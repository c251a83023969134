use anyhow::Context;
use shelf_kernel::settings::Settings;

const SERVICE_ENV: &str = "SHELF_SERVICE";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load SHELF settings")?;
    shelf_telemetry::init(&settings.telemetry)?;

    let service = std::env::var(SERVICE_ENV).unwrap_or_else(|_| "books".to_string());

    shelf_app::app::serve(&settings, &service).await
}
