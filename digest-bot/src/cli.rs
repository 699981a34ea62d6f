//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::RelayConfig;

#[derive(Parser)]
#[command(name = "digest-bot")]
#[command(about = "WhatsApp group summarizer relay", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the webhook (config from env; --port overrides PORT).
    Run {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Load RelayConfig from environment. If `port` is provided it overrides PORT.
pub fn load_config(port: Option<u16>) -> Result<RelayConfig> {
    RelayConfig::load(port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_port() {
        let cli = Cli::try_parse_from(["digest-bot", "run", "--port", "9000"]).unwrap();
        match cli.command {
            Commands::Run { port } => assert_eq!(port, Some(9000)),
        }
    }

    #[test]
    fn test_parse_run_without_port() {
        let cli = Cli::try_parse_from(["digest-bot", "run"]).unwrap();
        match cli.command {
            Commands::Run { port } => assert_eq!(port, None),
        }
    }
}
