//! Settlers match driver.
//!
//! Hosts one match and reads JSON requests from stdin, one per line, writing
//! one JSON response per line to stdout. Logs go to stderr.
//!
//! Configuration comes from the environment:
//! - `SETTLERS_CONFIG`: path to a JSON match config
//! - `SETTLERS_SEED`: seed, overriding the config file
//! - `SETTLERS_COLORS`: comma separated colors, overriding the config file
//! - `RUST_LOG`: log filter, `info` by default

use anyhow::Context;
use settlers_core::MatchConfig;
use std::io::{BufRead, Write};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod protocol;
mod session;

use protocol::{Request, Response};
use session::Session;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config()?;
    info!(seed = config.seed, colors = ?config.colors, "Starting settlers match...");

    let mut session = Session::new(config)?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    write_response(&mut stdout, &session.created())?;

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => session.handle(request)?,
            Err(e) => {
                error!("Unreadable request: {}", e);
                Response::Error {
                    message: format!("Invalid request: {}", e),
                }
            }
        };
        write_response(&mut stdout, &response)?;
    }

    info!(actions = session.history.len(), "input closed");
    Ok(())
}

fn write_response(out: &mut impl Write, response: &Response) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, response)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Config file first, then environment overrides
fn load_config() -> anyhow::Result<MatchConfig> {
    let mut config = match std::env::var("SETTLERS_CONFIG") {
        Ok(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", path))?
        }
        Err(_) => MatchConfig::default(),
    };

    if let Ok(seed) = std::env::var("SETTLERS_SEED") {
        config.seed = seed
            .trim()
            .parse()
            .with_context(|| format!("SETTLERS_SEED is not a number: {}", seed))?;
    }
    if let Ok(colors) = std::env::var("SETTLERS_COLORS") {
        config.colors = MatchConfig::parse_colors(&colors)
            .map_err(|name| anyhow::anyhow!("SETTLERS_COLORS has unknown color {}", name))?;
    }

    Ok(config)
}
