use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use dotenvy::dotenv;
use serde::Deserialize;

const ENV_PREFIX: &str = "CONTACTS_";

/// Terminal client for a contacts REST backend
#[derive(Debug, Default, Parser)]
#[command(name = "contact-manager", version, about)]
pub struct Cli {
    /// Base URL of the contacts backend
    #[arg(long)]
    pub api_url: Option<String>,

    /// Number of contacts shown per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// File that receives the application log
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Configuration for the application
#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Backend base URL, `/contacts` is appended to it
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_log_file() -> PathBuf {
    PathBuf::from("contact-manager.log")
}

impl Config {
    /// Load configuration from `CONTACTS_*` environment variables
    pub fn load() -> Result<Self> {
        let config = envy::prefixed(ENV_PREFIX).from_env::<Config>()?;
        Ok(config)
    }

    /// Command line arguments win over the environment
    pub fn apply(mut self, cli: Cli) -> Result<Self> {
        if let Some(api_url) = cli.api_url {
            self.api_url = api_url;
        }
        if let Some(page_size) = cli.page_size {
            self.page_size = page_size;
        }
        if let Some(log_file) = cli.log_file {
            self.log_file = log_file;
        }

        if self.page_size == 0 {
            bail!("page size must be at least 1");
        }

        Ok(self)
    }
}

/// Load `.env`, the environment and the command line into one configuration
pub fn init(cli: Cli) -> Result<Config> {
    // Load .env file if it exists
    dotenv().ok();

    Config::load()?.apply(cli)
}
