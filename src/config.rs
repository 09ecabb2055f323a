//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::olx::client::{search_url, BASE_URL};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the CSV export.
pub const CSV_FILE_NAME: &str = "olx_car_covers.csv";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Search query used to build the URL
    #[serde(default = "default_query")]
    pub query: String,

    /// Explicit page URL; overrides the query
    #[serde(default)]
    pub url: Option<String>,

    /// Rendered HTML saved by a browser; read instead of fetching the URL
    #[serde(default)]
    pub html_snapshot: Option<PathBuf>,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Base delay before the request in milliseconds
    #[serde(default)]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value)
    #[serde(default)]
    pub delay_jitter_ms: u64,

    /// Fixed wait after the page loads, in milliseconds
    #[serde(default)]
    pub settle_ms: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Directory the CSV export is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Whether to write the CSV export at all
    #[serde(default = "default_save_csv")]
    pub save_csv: bool,
}

fn default_query() -> String {
    "car cover".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("Output")
}

fn default_save_csv() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            query: default_query(),
            url: None,
            html_snapshot: None,
            proxy: None,
            delay_ms: 0,
            delay_jitter_ms: 0,
            settle_ms: 0,
            format: OutputFormat::Table,
            output_dir: default_output_dir(),
            save_csv: default_save_csv(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("olx-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("OLX_URL") {
            if !url.is_empty() {
                self.url = Some(url);
            }
        }

        if let Ok(proxy) = std::env::var("OLX_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("OLX_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        self
    }

    /// Returns the page to scrape: the explicit URL, or a search URL for the query.
    pub fn target_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => search_url(BASE_URL, &self.query),
        }
    }

    /// Returns the path of the CSV export.
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(CSV_FILE_NAME)
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
