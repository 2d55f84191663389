//! Validated, indexed view of a game dataset.
//!
//! Loading runs the bundled JSON Schema first, then the checks the schema
//! cannot express: titles are unique identity keys, genre labels are neither
//! blank nor the reserved `all`, and ratings are finite. The genre options are extracted once here
//! since the dataset never changes after load.

use crate::catalog::identity::{GameTitle, GenreFilter};
use crate::catalog::model::{Game, games_from_values, parse_game_values};
use crate::schema_loader::{
    SchemaLoadResult, SchemaSource, allowed_schema_versions, load_json_schema, validate_instance,
};
use crate::view::genre_options;
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const BUNDLED_DATASET: &str = include_str!("../../data/games.json");

#[derive(Debug)]
/// Validated game dataset plus its genre options.
pub struct GameIndex {
    games: Vec<Game>,
    genres: Vec<String>,
}

impl GameIndex {
    /// Load and validate a dataset from disk (JSON array or NDJSON).
    pub fn load(path: &Path) -> Result<Self> {
        let data = read_dataset(path)?;
        let index = Self::from_json_str(&data)
            .with_context(|| format!("loading dataset {}", path.display()))?;
        info!(path = %path.display(), games = index.len(), "loaded game dataset");
        Ok(index)
    }

    /// Like [`GameIndex::load`], validating against `schema_path` instead of
    /// the bundled schema.
    pub fn load_with_schema(path: &Path, schema_path: &Path) -> Result<Self> {
        let data = read_dataset(path)?;
        let index = Self::from_json_str_with_schema_path(&data, schema_path)
            .with_context(|| format!("loading dataset {}", path.display()))?;
        info!(
            path = %path.display(),
            schema = %schema_path.display(),
            games = index.len(),
            "loaded game dataset"
        );
        Ok(index)
    }

    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_DATASET).context("loading bundled dataset")
    }

    pub fn bundled_with_schema(schema_path: &Path) -> Result<Self> {
        Self::from_json_str_with_schema_path(BUNDLED_DATASET, schema_path)
            .context("loading bundled dataset")
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        let schema = load_json_schema(SchemaSource::Bundled, &allowed_schema_versions())?;
        Self::from_json_str_with_schema(data, &schema)
    }

    /// Validate against a schema file other than the bundled one.
    pub fn from_json_str_with_schema_path(data: &str, schema_path: &Path) -> Result<Self> {
        let schema = load_json_schema(SchemaSource::Path(schema_path), &allowed_schema_versions())
            .with_context(|| format!("loading catalog schema {}", schema_path.display()))?;
        Self::from_json_str_with_schema(data, &schema)
    }

    fn from_json_str_with_schema(data: &str, schema: &SchemaLoadResult) -> Result<Self> {
        let values = parse_game_values(data)?;
        validate_instance(schema, &Value::Array(values.clone()))?;
        let games = games_from_values(values)?;
        Self::from_games(games)
    }

    /// Index games that are already in memory; runs the contract checks only.
    pub fn from_games(games: Vec<Game>) -> Result<Self> {
        check_contract(&games)?;
        let genres = genre_options(&games);
        debug!(
            games = games.len(),
            genres = genres.len(),
            "indexed game dataset"
        );
        Ok(Self { games, genres })
    }

    /// Games in dataset order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Distinct genre labels, first-seen order.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Hand the dataset and its genre options to a view.
    pub fn into_parts(self) -> (Vec<Game>, Vec<String>) {
        (self.games, self.genres)
    }
}

fn read_dataset(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn check_contract(games: &[Game]) -> Result<()> {
    if games.is_empty() {
        bail!("dataset contains no games");
    }

    let mut seen: BTreeSet<&GameTitle> = BTreeSet::new();
    for (idx, game) in games.iter().enumerate() {
        if game.title.0.trim().is_empty() {
            bail!("game #{} has an empty title", idx + 1);
        }
        if game.genres.is_empty() {
            bail!("game '{}' has no genres", game.title);
        }
        if game.genres.iter().any(|genre| genre.trim().is_empty()) {
            bail!("game '{}' has an empty genre label", game.title);
        }
        // `all` is the filter's "no filtering" value and cannot name a genre.
        if let Some(genre) = game
            .genres
            .iter()
            .find(|genre| GenreFilter::from_label(genre) == GenreFilter::All)
        {
            bail!("game '{}' uses reserved genre label '{genre}'", game.title);
        }
        if !game.rating.is_finite() {
            bail!("game '{}' has a non-finite rating", game.title);
        }
        if !seen.insert(&game.title) {
            bail!("duplicate game title '{}'", game.title);
        }
    }
    Ok(())
}
