use anyhow::{Context, Result};
use line_gemini_bot::{config, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Builds the log filter from `RUST_LOG` or the configured level. Accepts full
/// directive lists such as `line_gemini_bot=debug,tower_http=info`.
fn log_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .with_context(|| format!("Invalid log filter '{}'", directives))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials are checked here; nothing is served without them.
    let settings = match config::load().await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let directives =
        std::env::var("RUST_LOG").unwrap_or_else(|_| settings.server.logs.level.clone());
    let filter = match log_filter(&directives) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!(log_filter = %directives, "LINE Gemini bot starting");

    server::run(settings).await?;

    Ok(())
}
