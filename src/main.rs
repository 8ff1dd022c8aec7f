use anyhow::Context;
use bookshop_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load BookShop settings")?;
    bookshop_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        seed = settings.database.seed_path.as_deref().unwrap_or("bundled sample"),
        "bookshop-app bootstrap starting"
    );

    bookshop_app::run(settings).await
}
