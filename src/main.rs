use anyhow::Context;
use libris_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load LIBRIS settings")?;

    libris_app::run(settings).await
}
