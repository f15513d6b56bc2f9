//! Renttrack - apartment price tracking bot
//! Fetches listing pages, extracts prices and promotions, diffs against
//! stored history and alerts on drops and new specials

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use domain::change::ChangeDetector;
pub use domain::specials::SpecialDetector;
pub use infrastructure::fetcher::{HttpPageFetcher, PageFetcher};
pub use infrastructure::store::{FileHistoryStore, HistoryStore};
pub use infrastructure::webhook::AlertDispatcher;
pub use shared::types::{History, Observation, Target};
