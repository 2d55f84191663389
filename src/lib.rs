//! Listing view model for a game catalog.
//!
//! The crate loads a static game dataset, derives the genre options once, and
//! drives a filter → sort → window pipeline from an explicit view state. Each
//! setter on `ListingView` recomputes the visible page before returning; the
//! `game-list` binary is a thin rendering layer on top.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod catalog;
pub mod config;
pub mod error;
pub mod render;
mod schema_loader;
pub mod view;

pub use catalog::{Game, GameIndex, GameTitle, GenreFilter};
pub use config::ListingConfig;
pub use error::ViewError;
pub use render::{ViewSnapshot, render_genre_options, render_listing};
pub use schema_loader::CATALOG_SCHEMA_VERSION;
pub use view::{
    COMMAND_HELP, DerivedResult, ListingView, PageSize, SortKey, ViewCommand, ViewState,
    compute_view, genre_options,
};

/// Environment variable naming a dataset to use instead of the bundled one.
pub const DATASET_ENV: &str = "GAME_LIST_DATASET";

/// Environment variable naming a listing configuration file.
pub const CONFIG_ENV: &str = "GAME_LIST_CONFIG";

/// Pick the dataset path: explicit argument first, then `GAME_LIST_DATASET`.
///
/// `None` means the bundled dataset should be used.
pub fn resolve_dataset_path(explicit: Option<&Path>) -> Option<PathBuf> {
    resolve_path(explicit, DATASET_ENV)
}

/// Pick the config path: explicit argument first, then `GAME_LIST_CONFIG`.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    resolve_path(explicit, CONFIG_ENV)
}

fn resolve_path(explicit: Option<&Path>, env_key: &str) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    env::var_os(env_key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Load the dataset at `path`, or the bundled one when `path` is `None`.
///
/// `schema` replaces the bundled catalog schema for validation.
pub fn load_index(path: Option<&Path>, schema: Option<&Path>) -> Result<GameIndex> {
    match (path, schema) {
        (Some(path), Some(schema)) => GameIndex::load_with_schema(path, schema),
        (Some(path), None) => GameIndex::load(path),
        (None, Some(schema)) => GameIndex::bundled_with_schema(schema),
        (None, None) => {
            debug!("using bundled dataset");
            GameIndex::bundled()
        }
    }
}

/// Load the configuration at `path`, or defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<ListingConfig> {
    match path {
        Some(path) => ListingConfig::load(path),
        None => Ok(ListingConfig::default()),
    }
}

/// Build a ready-to-render view from optional dataset, config, and schema paths.
pub fn open_listing(
    dataset: Option<&Path>,
    config: Option<&Path>,
    schema: Option<&Path>,
) -> Result<ListingView> {
    let index = load_index(dataset, schema)?;
    let config = load_config(config).context("loading listing configuration")?;
    let (games, genres) = index.into_parts();
    Ok(ListingView::with_genres(games, genres, config))
}
