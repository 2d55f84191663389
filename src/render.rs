//! Plain-text and JSON rendering of the listing.
//!
//! Rendering only reads the view: the controls section mirrors the select
//! inputs, each game becomes a card, and the footer carries the
//! `Page X of Y` status followed by one control per page.

use crate::catalog::{Game, GenreFilter};
use crate::view::{ListingView, PageSize, SortKey};
use serde::Serialize;
use std::fmt;

/// Serializable picture of the view after the last recompute.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot<'a> {
    pub search_term: &'a str,
    pub genre_filter: &'a GenreFilter,
    pub sort_key: SortKey,
    pub page_size: PageSize,
    pub current_page: usize,
    pub total_pages: usize,
    pub matched: usize,
    pub page_controls: Vec<usize>,
    pub genre_options: &'a [String],
    pub page_size_options: &'a [PageSize],
    pub items: Vec<CardView<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardView<'a> {
    pub title: &'a str,
    pub genres: &'a [String],
    pub rating: f64,
    pub image: String,
}

impl<'a> ViewSnapshot<'a> {
    pub fn capture(view: &'a ListingView) -> Self {
        let state = view.state();
        let config = view.config();
        Self {
            search_term: &state.search_term,
            genre_filter: &state.genre_filter,
            sort_key: state.sort_key,
            page_size: state.page_size,
            current_page: state.current_page,
            total_pages: view.total_pages(),
            matched: view.derived().matched,
            page_controls: view.page_controls().collect(),
            genre_options: view.genre_options(),
            page_size_options: &config.page_size_options,
            items: view
                .visible_items()
                .iter()
                .map(|game| CardView::new(game, config.image_path(&game.image)))
                .collect(),
        }
    }
}

impl<'a> CardView<'a> {
    fn new(game: &'a Game, image: String) -> Self {
        Self {
            title: game.title.as_str(),
            genres: &game.genres,
            rating: game.rating,
            image,
        }
    }
}

/// Render the whole listing: controls, cards, pagination.
pub fn render_listing(view: &ListingView, writer: &mut impl fmt::Write) -> fmt::Result {
    render_controls(view, writer)?;
    writeln!(writer)?;
    if view.visible_items().is_empty() {
        writeln!(writer, "(no games on this page)")?;
        writeln!(writer)?;
    }
    for game in view.visible_items() {
        render_card(view, game, writer)?;
    }
    render_pagination(view, writer)
}

fn render_controls(view: &ListingView, writer: &mut impl fmt::Write) -> fmt::Result {
    let state = view.state();
    let search = if state.search_term.is_empty() {
        "(none)"
    } else {
        state.search_term.as_str()
    };
    let genre = match &state.genre_filter {
        GenreFilter::All => "All Genres",
        GenreFilter::Genre(label) => label.as_str(),
    };
    let sort = match state.sort_key {
        SortKey::Title => "Sort by Title",
        SortKey::Rating => "Sort by Rating",
    };
    let per_page = match state.page_size {
        PageSize::All => "All".to_string(),
        PageSize::Fixed(size) => format!("{size} per page"),
    };
    writeln!(writer, "search : {search}")?;
    writeln!(writer, "genre  : {genre}")?;
    writeln!(writer, "sort   : {sort}")?;
    writeln!(writer, "show   : {per_page}")?;
    writeln!(writer, "matched: {}", view.derived().matched)
}

fn render_card(view: &ListingView, game: &Game, writer: &mut impl fmt::Write) -> fmt::Result {
    writeln!(writer, "{}", game.title)?;
    writeln!(writer, "  Genres: {}", game.genres.join(", "))?;
    writeln!(writer, "  Rating: {}", game.rating)?;
    writeln!(writer, "  Image:  {}", view.config().image_path(&game.image))?;
    writeln!(writer)
}

fn render_pagination(view: &ListingView, writer: &mut impl fmt::Write) -> fmt::Result {
    let current = view.state().current_page;
    write!(writer, "Page {} of {}", current, view.total_pages())?;
    for page in view.page_controls() {
        if page == current {
            write!(writer, " [{page}]")?;
        } else {
            write!(writer, " {page}")?;
        }
    }
    writeln!(writer)
}

/// One genre option per line, preceded by the "all" choice.
pub fn render_genre_options(view: &ListingView, writer: &mut impl fmt::Write) -> fmt::Result {
    writeln!(writer, "all")?;
    for genre in view.genre_options() {
        writeln!(writer, "{genre}")?;
    }
    Ok(())
}
