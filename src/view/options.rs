//! Options offered by the genre select control.

use crate::catalog::Game;
use std::collections::BTreeSet;

/// Distinct genre labels across `games`, in first-seen order.
pub fn genre_options(games: &[Game]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut options = Vec::new();
    for genre in games.iter().flat_map(|game| game.genres.iter()) {
        if seen.insert(genre.as_str()) {
            options.push(genre.clone());
        }
    }
    options
}
