//! CSV export of scraped listings.

use crate::olx::Listing;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// CSV column headers, in order.
pub const CSV_HEADERS: [&str; 5] = ["Title", "Price", "Description", "Location", "Date"];

/// Writes listings as CSV with a header row, even when there are no listings.
pub fn write_csv<W: Write>(out: W, listings: &[Listing]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);

    writer.write_record(CSV_HEADERS).context("Failed to write CSV header")?;
    for listing in listings {
        writer.serialize(listing).context("Failed to write CSV row")?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Saves listings to `path`, creating its parent directory if needed.
///
/// Returns `None` without touching the filesystem when there is nothing to save.
pub fn save_csv(listings: &[Listing], path: &Path) -> Result<Option<PathBuf>> {
    if listings.is_empty() {
        info!("No data available to write to CSV.");
        return Ok(None);
    }

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            info!("Created directory: {}", dir.display());
        }
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    write_csv(file, listings)?;

    info!("Output saved to: {}", path.display());
    Ok(Some(path.to_path_buf()))
}
