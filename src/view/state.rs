//! Inputs that control which slice of the catalog is visible.

use crate::catalog::GenreFilter;
use crate::error::ViewError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Field the filtered sequence is ordered by.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending, case-insensitive title order.
    #[default]
    Title,
    /// Descending numeric rating.
    Rating,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Rating => "rating",
        }
    }
}

impl FromStr for SortKey {
    type Err = ViewError;

    /// An empty value selects the default (title) order.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "" | "title" => Ok(SortKey::Title),
            "rating" => Ok(SortKey::Rating),
            other => Err(ViewError::UnknownSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(6).unwrap();

/// Number of items per page.
///
/// `All` follows the dataset length so a single page holds every item.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PageSize {
    Fixed(NonZeroUsize),
    All,
}

impl PageSize {
    /// Reject zero at construction; the page count is undefined for it.
    pub fn fixed(size: usize) -> Result<Self, ViewError> {
        NonZeroUsize::new(size)
            .map(PageSize::Fixed)
            .ok_or(ViewError::ZeroPageSize)
    }

    /// Concrete size for a dataset of `dataset_len` items.
    ///
    /// `All` never resolves below one so an empty dataset still has a
    /// well-defined (zero) page count.
    pub fn resolve(self, dataset_len: usize) -> NonZeroUsize {
        match self {
            PageSize::Fixed(size) => size,
            PageSize::All => NonZeroUsize::new(dataset_len).unwrap_or(NonZeroUsize::MIN),
        }
    }

    pub fn label(self) -> String {
        match self {
            PageSize::Fixed(size) => size.to_string(),
            PageSize::All => "all".to_string(),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Fixed(DEFAULT_PAGE_SIZE)
    }
}

impl FromStr for PageSize {
    type Err = ViewError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            return Ok(PageSize::All);
        }
        let size: usize = value
            .parse()
            .map_err(|_| ViewError::InvalidPageSize(value.to_string()))?;
        PageSize::fixed(size)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PageSize::Fixed(size) => serializer.serialize_u64(size.get() as u64),
            PageSize::All => serializer.serialize_str("all"),
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(size) => PageSize::fixed(size as usize).map_err(serde::de::Error::custom),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Mutable inputs of the listing view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewState {
    pub search_term: String,
    pub genre_filter: GenreFilter,
    pub sort_key: SortKey,
    pub page_size: PageSize,
    /// 1-based. May point past the last page after a search edit; the pipeline
    /// then yields an empty window.
    pub current_page: usize,
}

impl ViewState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            search_term: String::new(),
            genre_filter: GenreFilter::All,
            sort_key: SortKey::Title,
            page_size,
            current_page: 1,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}
