//! acctweb main entry point

use acctweb_api::start_server;
use acctweb_config::Config;
use acctweb_core::{Book, ProviderRef, SampleProvider, YamlFileProvider};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "acctweb")]
#[command(author = "acctweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Vendor and customer account listings over HTTP", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Data file path (overrides data.path in the configuration)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn load_config(path: &PathBuf) -> anyhow::Result<(Config, bool)> {
    if !path.exists() {
        return Ok((Config::default(), false));
    }
    match Config::load(path) {
        Ok(config) => Ok((config, true)),
        Err(e) => {
            eprintln!("{}", e.to_details());
            Err(e).with_context(|| format!("Failed to load configuration from {}", path.display()))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (mut config, from_file) = load_config(&args.config)?;
    if let Some(data) = args.data {
        config.data.path = Some(data);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    if from_file {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }

    let provider: ProviderRef = match &config.data.path {
        Some(path) => Arc::new(YamlFileProvider::new(path.clone())),
        None => Arc::new(SampleProvider),
    };

    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut book = Book::new(provider);
        if let Err(e) = book.load().await {
            log::error!("Failed to load book: {}", e);
            for suggestion in e.to_details().suggestions {
                log::error!("  hint: {}", suggestion);
            }
            return Err(anyhow::Error::new(e).context("Initial load failed"));
        }

        let book = Arc::new(RwLock::new(book));
        start_server(config, book).await.context("Server error")
    })
}
