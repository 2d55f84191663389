//! Listing configuration.
//!
//! Loaded from an optional JSON file; every field has a default matching the
//! stock listing (6 / 10 / all per page, no page reset on search edits).

use crate::error::ViewError;
use crate::view::PageSize;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_IMAGE_ROOT: &str = "/images/";

const TEN_PER_PAGE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Sizes offered by the per-page control, in display order.
    pub page_size_options: Vec<PageSize>,
    pub default_page_size: PageSize,
    /// Return to page 1 when the search term changes.
    pub reset_page_on_search: bool,
    /// Prefix joined with each game's image filename when rendering.
    pub image_root: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size_options: vec![
                PageSize::default(),
                PageSize::Fixed(TEN_PER_PAGE),
                PageSize::All,
            ],
            default_page_size: PageSize::default(),
            reset_page_on_search: false,
            image_root: DEFAULT_IMAGE_ROOT.to_string(),
        }
    }
}

impl ListingConfig {
    /// Read, parse, and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json_str(&data)
            .with_context(|| format!("loading config {}", path.display()))?;
        debug!(path = %path.display(), "loaded listing config");
        Ok(config)
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        let config: ListingConfig = serde_json::from_str(data).context("parsing config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size_options.is_empty() {
            bail!("page_size_options must not be empty");
        }
        if !self.page_size_options.contains(&self.default_page_size) {
            bail!(ViewError::UnsupportedPageSize(self.default_page_size.label()));
        }
        Ok(())
    }

    /// Resolve a page-size argument against the configured options.
    pub fn page_size(&self, raw: &str) -> Result<PageSize, ViewError> {
        let size: PageSize = raw.parse()?;
        if self.page_size_options.contains(&size) {
            Ok(size)
        } else {
            Err(ViewError::UnsupportedPageSize(size.label()))
        }
    }

    /// Image path for a game, e.g. `/images/hades.jpg`.
    pub fn image_path(&self, image: &str) -> String {
        if self.image_root.is_empty() || self.image_root.ends_with('/') {
            format!("{}{}", self.image_root, image)
        } else {
            format!("{}/{}", self.image_root, image)
        }
    }
}
