//! Deserializable representation of a game dataset.
//!
//! Datasets are either a JSON array of game objects or NDJSON with one game per
//! line. Use `GameIndex` for validation and title lookup; the helpers here only
//! parse.

use crate::catalog::identity::GameTitle;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// One catalog entry. Immutable once loaded.
pub struct Game {
    pub title: GameTitle,
    pub genres: Vec<String>,
    pub rating: f64,
    /// Image filename, resolved against the configured image root when rendered.
    pub image: String,
}

impl Game {
    pub fn new(title: &str, genres: &[&str], rating: f64, image: &str) -> Self {
        Self {
            title: GameTitle(title.to_string()),
            genres: genres.iter().map(|genre| genre.to_string()).collect(),
            rating,
            image: image.to_string(),
        }
    }
}

/// Split a dataset into raw JSON records without deserializing them.
///
/// Accepts a JSON array, a single object, or NDJSON. Empty input is an error
/// and NDJSON failures name the offending line.
pub fn parse_game_values(input: &str) -> Result<Vec<Value>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("dataset is empty");
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return match value {
            Value::Array(items) => Ok(items),
            Value::Object(_) => Ok(vec![value]),
            _ => bail!("unsupported dataset; expected a game object or an array of games"),
        };
    }

    let mut records = Vec::new();
    for (idx, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .with_context(|| format!("unable to parse game record on line {}", idx + 1))?;
        records.push(value);
    }

    if records.is_empty() {
        bail!("no game records found in dataset");
    }

    Ok(records)
}

/// Deserialize raw records into games, reporting the index of a bad record.
pub fn games_from_values(values: Vec<Value>) -> Result<Vec<Game>> {
    values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            serde_json::from_value(value)
                .with_context(|| format!("unable to parse game record #{}", idx + 1))
        })
        .collect()
}
