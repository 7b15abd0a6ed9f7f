use std::{io, path::PathBuf};

use anyhow::Result;
use bank_desk::{
    bin_utils::Service,
    config::{self, BankConfig},
};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(version, about = "In-memory checking account desk")]
struct Args {
    /// Bank settings in TOML, defaults are used when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // stdout belongs to the menu
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "bank_desk=warn".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let args = Args::parse();
    let config = match args.config {
        Some(path) => config::load(path)?,
        None => BankConfig::default(),
    };

    let stdin = io::stdin();
    let service = Service {
        input: stdin.lock(),
        output: &mut io::stdout(),
        config,
    };
    service.run()
}
