//! Musiquiz Tools - content pipeline for a music quiz site
//!
//! Scans audio folders into the quiz catalog, maintains a flat song index,
//! regenerates the browsable directory listing, and maps minutes of the day
//! to deterministic word labels.

pub mod catalog;
pub mod labels;
pub mod listing;
pub mod model;
pub mod scan;

pub use catalog::{CatalogConfig, CatalogPipeline};
pub use labels::{LabelConfig, LabelTable};
pub use listing::ListingConfig;
