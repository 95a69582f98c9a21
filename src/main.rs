//! GoStream i18n console
//!
//! Reads commands from stdin and resolves keys against the configured
//! dictionaries. Type `:quit` to exit.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gostream_i18n::config::{Config, DictionarySource};
use gostream_i18n::console::{Console, Outcome};
use gostream_i18n::{Catalog, I18n};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gostream_i18n=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    let catalog = match &config.dictionaries {
        DictionarySource::Bundled => Catalog::bundled(),
        DictionarySource::Directory(dir) => Arc::new(
            Catalog::load_dir(dir)
                .with_context(|| format!("Failed to load dictionaries from {}", dir.display()))?,
        ),
    };
    let locales: Vec<String> = catalog.locales().iter().map(|l| l.to_string()).collect();
    info!("Dictionaries available: {:?}", locales);

    let i18n = I18n::new(catalog, config.default_locale.clone());

    // Log every locale change from a separate task
    let mut changes = i18n.locale().watch();
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let locale = changes.borrow_and_update().clone();
            info!("Locale changed to '{}'", locale);
        }
    });

    let console = Console::new(i18n);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                match console.handle_line(&line) {
                    Outcome::Print(text) => {
                        stdout.write_all(text.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;
                    }
                    Outcome::Silent => {}
                    Outcome::Quit => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    info!("Bye");
    Ok(())
}
