use anyhow::Context;
use clap::{Parser, Subcommand};

use libris_kernel::settings::Settings;

#[derive(Parser)]
#[command(name = "libris", about = "Library catalog server", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the catalog HTTP server
    Serve,
    /// Load the layered configuration and print the effective values
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load LIBRIS settings")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => libris_app::run(settings).await,
        Command::CheckConfig => {
            println!("environment: {:?}", settings.environment);
            println!(
                "server: {}:{} (timeout {}ms)",
                settings.server.host, settings.server.port, settings.server.request_timeout_ms
            );
            println!("store: seed={}", settings.store.seed);
            println!(
                "telemetry: format={:?} filter={}",
                settings.telemetry.log_format, settings.telemetry.log_filter
            );
            Ok(())
        }
    }
}
