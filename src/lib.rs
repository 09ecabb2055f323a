//! olx-crawler - OLX car cover listing scraper
//!
//! Pulls listings off an OLX search results page, separates genuine car
//! covers from unrelated ads, and exports the relevant ones to CSV.

pub mod commands;
pub mod config;
pub mod export;
pub mod filters;
pub mod format;
pub mod olx;

pub use config::Config;
pub use filters::{classify, partition};
pub use olx::{Extractor, Listing, ScrapeReport};
