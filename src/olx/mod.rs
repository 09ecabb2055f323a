//! OLX-specific modules for page fetching, parsing, and data models.

pub mod client;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{OlxClient, PageSource, SnapshotSource};
pub use models::{CandidateStrategy, Classified, ExtractError, Extraction, Listing, ScrapeReport};
pub use parser::Extractor;
