//! Filter → sort → window pipeline.
//!
//! `compute_view` is a pure function of the dataset and the view state. Order
//! matters: the page count is taken after filtering, sorting happens on the
//! filtered sequence only, and windowing is the last step. A page past the end
//! yields an empty window; clamping is the caller's job.

use crate::catalog::{Game, GenreFilter};
use crate::view::state::{SortKey, ViewState};
use serde::Serialize;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Output of one pipeline run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DerivedResult {
    pub visible_items: Vec<Game>,
    pub total_pages: usize,
    /// Count of items that survived search and genre filtering.
    pub matched: usize,
}

pub fn compute_view(dataset: &[Game], state: &ViewState) -> DerivedResult {
    let page_size = state.page_size.resolve(dataset.len()).get();

    let needle = state.search_term.to_lowercase();
    let mut filtered: Vec<&Game> = dataset
        .iter()
        .filter(|game| matches_search(game, &needle))
        .filter(|game| matches_genre(game, &state.genre_filter))
        .collect();

    let matched = filtered.len();
    let total_pages = matched.div_ceil(page_size);

    sort_games(&mut filtered, state.sort_key);

    let start = state.current_page.saturating_sub(1).saturating_mul(page_size);
    let visible_items = filtered
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    DerivedResult {
        visible_items,
        total_pages,
        matched,
    }
}

/// Case-insensitive substring match on the title; `needle` is pre-lowercased.
fn matches_search(game: &Game, needle: &str) -> bool {
    needle.is_empty() || game.title.as_str().to_lowercase().contains(needle)
}

fn matches_genre(game: &Game, filter: &GenreFilter) -> bool {
    filter.matches(&game.genres)
}

/// Stable sort; equal keys keep their dataset order.
fn sort_games(games: &mut [&Game], key: SortKey) {
    match key {
        SortKey::Title => {
            games.sort_by(|a, b| compare_titles(a.title.as_str(), b.title.as_str()))
        }
        // Ratings are finite after load; -0.0 and 0.0 compare equal.
        SortKey::Rating => games.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
        }),
    }
}

/// Collation-style title order.
///
/// Primary: base letters, ignoring case and diacritics (`Éclair` sorts with
/// `eclair`). Secondary: unaccented before accented. Tertiary: lowercase
/// before uppercase.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let (a_lower, b_lower) = (a.to_lowercase(), b.to_lowercase());
    base_letters(&a_lower)
        .cmp(&base_letters(&b_lower))
        .then_with(|| a_lower.nfd().cmp(b_lower.nfd()))
        .then_with(|| b.cmp(a))
}

/// Canonical decomposition with combining marks removed.
fn base_letters(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
