use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vstrips::catalog::AirwayCatalog;
use vstrips::commands::{HELP, Input, parse_line};
use vstrips::config::Config;
use vstrips::feed::{FeedDocument, FlightFeed, HttpFeed, StaticFeed};
use vstrips::session::Session;
use vstrips::store::FileStore;

#[derive(Parser, Debug)]
#[command(author, version, about = "Oceanic flight progress strip board", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(long, value_name = "FILE")]
    config: Option<Utf8PathBuf>,
    /// Lane state file (overrides config)
    #[arg(long, value_name = "FILE")]
    store: Option<Utf8PathBuf>,
    /// Airway catalog JSON (overrides config)
    #[arg(long, value_name = "FILE")]
    catalog: Option<Utf8PathBuf>,
    /// Flight data feed URL (overrides config)
    #[arg(long, value_name = "URL")]
    feed_url: Option<String>,
    /// Read flights from a saved feed document instead of the network
    #[arg(long, value_name = "FILE")]
    feed_file: Option<Utf8PathBuf>,
    /// Never contact the feed; every added callsign gets a placeholder strip
    #[arg(long)]
    offline: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }
    if let Some(url) = cli.feed_url {
        config.feed_url = url;
    }
    if let Some(file) = cli.feed_file {
        config.feed_file = Some(file);
    }

    let catalog = match &config.catalog_path {
        Some(path) => AirwayCatalog::load(path)?,
        None => AirwayCatalog::new(),
    };
    let feed: Box<dyn FlightFeed> = if cli.offline {
        Box::new(StaticFeed::new(FeedDocument::default()))
    } else if let Some(file) = &config.feed_file {
        Box::new(StaticFeed::load(file)?)
    } else {
        Box::new(HttpFeed::new(config.feed_url.clone(), config.feed_timeout())?)
    };
    let store = FileStore::open(&config.store_path)?;
    tracing::info!(store = %config.store_path, mode = config.mode.as_str(), "board opened");

    let mut session =
        Session::open(config.mode, catalog, store, feed).with_geometry(config.geometry);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        let input = match parse_line(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{}", err);
                continue;
            }
        };
        match input {
            Input::Command(command) => {
                // Feed failures and bad edits are reported; the board stays as it was.
                if let Err(err) = session.execute(command) {
                    eprintln!("{:#}", err);
                }
            }
            Input::Show => {
                let json = serde_json::to_string_pretty(&session.board().strip_layouts())?;
                writeln!(stdout, "{}", json)?;
            }
            Input::Help => writeln!(stdout, "{}", HELP)?,
            Input::Quit => break,
        }
        stdout.flush()?;
    }
    Ok(())
}
