//! Output formatting for listings (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::export;
use crate::olx::{Listing, ScrapeReport};

/// Number of filtered-out listings shown in the preview.
pub const PREVIEW_LIMIT: usize = 10;

const BANNER_WIDTH: usize = 120;
const PREVIEW_WIDTH: usize = 100;

/// Formats listings for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a whole scrape run; JSON gets the full report, others the relevant listings.
    pub fn format_report(&self, report: &ScrapeReport) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
            }
            _ => self.format_listings(&report.relevant),
        }
    }

    /// Formats relevant listings.
    pub fn format_listings(&self, listings: &[Listing]) -> String {
        if listings.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_listings(listings),
                _ => "No relevant car cover listings found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_listings(listings),
            OutputFormat::Table => self.table_listings(listings),
            OutputFormat::Markdown => self.markdown_listings(listings),
            OutputFormat::Csv => self.csv_listings(listings),
        }
    }

    /// Formats the filtered-out listings: the first few, then a count of the rest.
    pub fn filtered_preview(&self, filtered: &[Listing]) -> String {
        if filtered.is_empty() {
            return "No items were filtered out.".to_string();
        }

        let rule = "-".repeat(PREVIEW_WIDTH);
        let mut lines = vec![rule.clone(), "FILTERED OUT (Irrelevant Items)".to_string(), rule.clone()];

        for (i, listing) in filtered.iter().take(PREVIEW_LIMIT).enumerate() {
            lines.push(format!("{}. {} - {}", i + 1, clip(&listing.title, 70), listing.price));
        }

        if filtered.len() > PREVIEW_LIMIT {
            lines.push(format!("... and {} more filtered items", filtered.len() - PREVIEW_LIMIT));
        }

        lines.push(rule);
        lines.join("\n")
    }

    // JSON formatting

    fn json_listings(&self, listings: &[Listing]) -> String {
        serde_json::to_string_pretty(listings).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_listings(&self, listings: &[Listing]) -> String {
        let headers = ["#", "Title", "Price", "Description", "Location", "Date"];

        let rows: Vec<[String; 6]> = listings
            .iter()
            .enumerate()
            .map(|(i, l)| {
                [
                    (i + 1).to_string(),
                    ellipsize(&l.title, 50),
                    l.price.clone(),
                    ellipsize(&l.description, 40),
                    ellipsize(&l.location, 20),
                    l.date.clone(),
                ]
            })
            .collect();

        let mut widths = headers.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let border = widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .fold(String::from("+"), |acc, seg| acc + &seg + "+");
        let header_border = border.replace('-', "=");

        let render = |cells: &[String]| {
            cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!(" {}{} ", cell, pad(cell, width)))
                .fold(String::from("|"), |acc, seg| acc + &seg + "|")
        };

        let banner = "=".repeat(BANNER_WIDTH);
        let mut lines = vec![banner.clone(), "RELEVANT CAR COVER PRODUCTS".to_string(), banner.clone()];

        lines.push(border.clone());
        lines.push(render(headers.map(String::from).as_slice()));
        lines.push(header_border);
        for row in &rows {
            lines.push(render(row.as_slice()));
            lines.push(border.clone());
        }

        lines.push(banner);
        lines.push(String::new());
        lines.push(format!("Total relevant listings: {}", listings.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_listings(&self, listings: &[Listing]) -> String {
        let mut lines = Vec::new();

        lines.push("| # | Title | Price | Location | Date |".to_string());
        lines.push("|---|-------|-------|----------|------|".to_string());

        for (i, listing) in listings.iter().enumerate() {
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                i + 1,
                ellipsize(&listing.title, 50).replace('|', "\\|"),
                listing.price,
                listing.location.replace('|', "\\|"),
                listing.date
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} relevant listings found*", listings.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_listings(&self, listings: &[Listing]) -> String {
        let mut buf = Vec::new();
        if export::write_csv(&mut buf, listings).is_err() {
            return String::new();
        }
        String::from_utf8(buf).map(|s| s.trim_end().to_string()).unwrap_or_default()
    }
}

/// Truncates to `max` chars, appending "..." when something was cut.
fn ellipsize(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", clip(s, max))
    } else {
        s.to_string()
    }
}

/// Truncates to at most `max` chars.
fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn pad(cell: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(cell.chars().count()))
}
