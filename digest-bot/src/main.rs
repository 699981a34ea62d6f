//! Binary for the WhatsApp group summarizer relay.

use anyhow::Result;
use clap::Parser;
use digest_bot::{load_config, run_relay, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { port } => {
            let config = load_config(port)?;
            run_relay(config).await
        }
    }
}
