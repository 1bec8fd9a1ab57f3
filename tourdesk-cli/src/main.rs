use anyhow::Context;
use std::io::Read;
use tourdesk_cli::{run_quote, Config, QuoteRequest};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Request from a file argument, or stdin when none is given
    let input = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Reading quote request from {}", path);
            std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let request: QuoteRequest = serde_json::from_str(&input).context("Malformed quote request")?;
    let response = run_quote(&request, &config)?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
