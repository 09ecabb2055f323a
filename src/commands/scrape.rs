//! Scrape command implementation.

use crate::config::Config;
use crate::export;
use crate::filters;
use crate::format::Formatter;
use crate::olx::{Extractor, OlxClient, PageSource, ScrapeReport, SnapshotSource};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Fetches one search page, extracts listings, and classifies them.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the scrape against OLX, or against a saved snapshot if one is configured.
    ///
    /// Page-level failures are logged and produce an empty report.
    pub async fn execute(&self) -> ScrapeReport {
        let source: Box<dyn PageSource> = match &self.config.html_snapshot {
            Some(path) => Box::new(SnapshotSource::new(path)),
            None => match OlxClient::new(&self.config) {
                Ok(client) => Box::new(client),
                Err(e) => {
                    error!("Failed to create HTTP client: {:#}", e);
                    return ScrapeReport::empty(self.config.target_url());
                }
            },
        };

        self.execute_with_source(source.as_ref()).await
    }

    /// Runs the scrape with a provided page source (for testing).
    pub async fn execute_with_source(&self, source: &dyn PageSource) -> ScrapeReport {
        let url = self.config.target_url();

        match source.fetch(&url).await {
            Ok(html) => Self::scrape_html(&url, &html),
            Err(e) => {
                error!("Error during scraping: {:#}", e);
                ScrapeReport::empty(url)
            }
        }
    }

    /// Extracts and classifies listings from already-loaded HTML.
    pub fn scrape_html(url: &str, html: &str) -> ScrapeReport {
        let extraction = Extractor::new().extract(html);

        match extraction.strategy {
            Some(strategy) => {
                info!("Found {} total listings ({} strategy)", extraction.candidates(), strategy)
            }
            None => warn!("No listings found on {}; the page layout may have changed", url),
        }

        let strategy = extraction.strategy;
        let candidates = extraction.candidates();
        let skipped = extraction.skipped();
        let classified = filters::partition(extraction.into_listings());

        info!("Extracted {} relevant car cover listings", classified.relevant.len());
        info!(
            "Filtered out {} unrelated and {} invalid listings",
            classified.filtered_out.len(),
            skipped
        );

        ScrapeReport {
            url: url.to_string(),
            strategy,
            candidates,
            skipped,
            relevant: classified.relevant,
            filtered_out: classified.filtered_out,
        }
    }

    /// Renders the relevant listings in the configured format.
    pub fn render(&self, report: &ScrapeReport) -> String {
        Formatter::new(self.config.format).format_report(report)
    }

    /// Writes the relevant listings to the CSV export, if enabled.
    pub fn save(&self, report: &ScrapeReport) -> Result<Option<PathBuf>> {
        if !self.config.save_csv {
            return Ok(None);
        }

        export::save_csv(&report.relevant, &self.config.csv_path())
    }
}

/// Asks a yes/no question; only a bare "y" or "Y" counts as yes.
///
/// Only the line ending is stripped, so surrounding spaces make the answer a no.
pub fn confirm<R: BufRead, W: Write>(mut input: R, mut output: W, question: &str) -> Result<bool> {
    write!(output, "{} (y/n): ", question).context("Failed to write prompt")?;
    output.flush().context("Failed to write prompt")?;

    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read answer")?;

    Ok(line.trim_end_matches(['\r', '\n']).eq_ignore_ascii_case("y"))
}
