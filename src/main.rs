use anyhow::{Context, Result};
use qa_server::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Fails on anything that is not a plain level name.
fn parse_log_level(level: &str) -> Result<LevelFilter> {
    level.parse::<LevelFilter>().map_err(|_| {
        anyhow::anyhow!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        )
    })
}

/// JSON logs on stdout. `RUST_LOG` wins over `server.logs.level`.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Tracing is not up yet, so startup failures go to stderr
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());
    if let Err(e) = parse_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    init_tracing(&log_level);

    info!(
        "QA server starting: model {} via {:?}, log level {}",
        config.model.name, config.model.provider, log_level
    );

    server::run(config)
        .await
        .context("QA server terminated with an error")?;

    Ok(())
}
