//! olx-crawler - OLX car cover listing scraper
//!
//! Scrapes one OLX search page, keeps the genuine car covers and exports them.

use anyhow::Result;
use clap::{Parser, Subcommand};
use olx_crawler::commands::{confirm, ScrapeCommand};
use olx_crawler::config::{Config, OutputFormat};
use olx_crawler::filters;
use olx_crawler::format::Formatter;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "olx-crawler",
    version,
    about = "Scrape OLX search results for car cover listings",
    long_about = "Scrapes an OLX search results page, filters out unrelated ads, and exports the remaining car cover listings to CSV."
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "OLX_PROXY")]
    proxy: Option<String>,

    /// Delay before the request in milliseconds
    #[arg(long, global = true, env = "OLX_DELAY")]
    delay: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a search results page
    #[command(alias = "s")]
    Scrape {
        /// Search query
        query: Option<String>,

        /// Page URL to scrape instead of a search for the query
        #[arg(long)]
        url: Option<String>,

        /// Read a saved HTML page instead of fetching
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,

        /// Directory for the CSV export
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not write the CSV export
        #[arg(long)]
        no_save: bool,

        /// Show filtered out items without asking
        #[arg(long, conflicts_with = "hide_filtered")]
        show_filtered: bool,

        /// Never show filtered out items
        #[arg(long)]
        hide_filtered: bool,
    },

    /// Check whether a title and price count as a car cover listing
    #[command(alias = "c")]
    Classify {
        /// Listing title
        title: String,

        /// Displayed price, e.g. "₹ 1,200"
        #[arg(default_value = "Not specified")]
        price: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Scrape { query, url, html, output, no_save, show_filtered, hide_filtered } => {
            if let Some(query) = query {
                config.query = query;
            }
            if url.is_some() {
                config.url = url;
            }
            if html.is_some() {
                config.html_snapshot = html;
            }
            if let Some(dir) = output {
                config.output_dir = dir;
            }
            if no_save {
                config.save_csv = false;
            }

            let format = config.format;
            let save_csv = config.save_csv;
            let cmd = ScrapeCommand::new(config);

            let report = cmd.execute().await;
            println!("{}", cmd.render(&report));

            match cmd.save(&report)? {
                Some(path) => println!("\nOutput saved to: {}", path.display()),
                None if save_csv => println!("\nNo data available to write to CSV."),
                None => {}
            }

            let show = if show_filtered {
                true
            } else if hide_filtered || format != OutputFormat::Table {
                false
            } else if std::io::stdin().is_terminal() {
                println!();
                confirm(
                    std::io::stdin().lock(),
                    std::io::stdout(),
                    "Do you want to see filtered out items?",
                )?
            } else {
                false
            };

            if show {
                println!("\n{}", Formatter::new(format).filtered_preview(&report.filtered_out));
            }
        }

        Commands::Classify { title, price } => {
            let verdict = if filters::classify(&title, &price) { "relevant" } else { "filtered" };
            println!("{}", verdict);
        }
    }

    Ok(())
}
