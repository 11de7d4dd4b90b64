//! Browsable `index.html` for the published collections directory
//!
//! The page lists every non-ignored file as a link, with collapsible
//! directories, the build time and that minute's label.

mod ignore;
mod page;
mod tree;

pub use ignore::{IgnoreRules, DEFAULT_IGNORES, TRAILING_IGNORES};
pub use page::{render_page, PageContext};
pub use tree::{collect_tree, dir_id, render_tree, Node};

use crate::labels::reference_table;
use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Timelike};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_TITLE: &str = "Musiquiz Collections";
pub const INDEX_FILE: &str = "index.html";
pub const DEFAULT_ICON: &str = "https://savocid.github.io/musiquiz/img/favicon2.png";

/// Timestamp format shown on the page
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration for the listing page
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Directory to list
    pub root: PathBuf,

    /// Page to write (defaults to `<root>/index.html`)
    pub output: PathBuf,

    /// Page heading and `<title>`
    pub title: String,

    /// Favicon URL
    pub icon: Option<String>,
}

impl ListingConfig {
    pub fn new(root: PathBuf) -> Self {
        Self {
            output: root.join(INDEX_FILE),
            title: DEFAULT_TITLE.to_string(),
            icon: Some(DEFAULT_ICON.to_string()),
            root,
        }
    }

    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = output;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }
}

/// Render the listing page as of `now`
pub fn build_listing(config: &ListingConfig, now: NaiveDateTime) -> Result<String> {
    let rules = IgnoreRules::for_root(&config.root)?;
    let tree = collect_tree(&config.root, &rules)?;

    let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
    let minute_label = reference_table().lookup(now.hour(), now.minute())?;
    let tree_html = render_tree(&tree);

    Ok(render_page(&PageContext {
        title: &config.title,
        timestamp: &timestamp,
        minute_label,
        tree_html: &tree_html,
        icon: config.icon.as_deref(),
    }))
}

/// Regenerate the listing page at the local time and write it
pub fn write_listing(config: &ListingConfig) -> Result<()> {
    let now = chrono::Local::now().naive_local();
    let html = build_listing(config, now)?;

    fs::write(&config.output, html)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    log::info!(
        "Directory structure updated in {} at {}",
        config.output.display(),
        now.format(TIMESTAMP_FORMAT)
    );
    Ok(())
}
