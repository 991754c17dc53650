use clap::Parser;
use std::net::SocketAddr;

use crate::config::Config;
use crate::constants::{APP_DESCRIPTION, APP_NAME};

/// A journaling backend with AI mood analysis
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Socket address to listen on (overrides UNDERTONE_ADDR)
    #[clap(short = 'b', long)]
    pub bind: Option<SocketAddr>,

    /// SQLite database path, or :memory: (overrides UNDERTONE_DB)
    #[clap(long)]
    pub db: Option<String>,

    /// Print verbose output
    #[clap(short = 'v', long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }

    /// Folds command line overrides into a loaded configuration.
    ///
    /// Flags beat environment variables; absent flags leave the loaded
    /// values untouched.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(db) = &self.db {
            config.db_path = db.clone();
        }
    }
}
