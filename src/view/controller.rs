//! State container for the listing view.
//!
//! Every setter commits its field, applies the page-reset rule, and recomputes
//! the derived result before returning, so readers never see a result that
//! lags the state. There is one writer (the setters) and one reader (the
//! rendering step).

use crate::catalog::{Game, GenreFilter};
use crate::config::ListingConfig;
use crate::error::ViewError;
use crate::view::command::ViewCommand;
use crate::view::options::genre_options;
use crate::view::pipeline::{DerivedResult, compute_view};
use crate::view::state::{PageSize, SortKey, ViewState};
use std::ops::RangeInclusive;
use tracing::debug;

#[derive(Debug)]
pub struct ListingView {
    dataset: Vec<Game>,
    genres: Vec<String>,
    config: ListingConfig,
    state: ViewState,
    derived: DerivedResult,
}

impl ListingView {
    /// Build a view over `dataset` using an already validated configuration.
    pub fn new(dataset: Vec<Game>, config: ListingConfig) -> Self {
        let genres = genre_options(&dataset);
        Self::with_genres(dataset, genres, config)
    }

    /// Like `new`, reusing genre options computed when the catalog was loaded.
    pub fn with_genres(dataset: Vec<Game>, genres: Vec<String>, config: ListingConfig) -> Self {
        let state = ViewState::new(config.default_page_size);
        let derived = compute_view(&dataset, &state);
        Self {
            dataset,
            genres,
            config,
            state,
            derived,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    pub fn dataset(&self) -> &[Game] {
        &self.dataset
    }

    pub fn genre_options(&self) -> &[String] {
        &self.genres
    }

    pub fn derived(&self) -> &DerivedResult {
        &self.derived
    }

    pub fn visible_items(&self) -> &[Game] {
        &self.derived.visible_items
    }

    pub fn total_pages(&self) -> usize {
        self.derived.total_pages
    }

    /// Page numbers offered by the pagination controls.
    pub fn page_controls(&self) -> RangeInclusive<usize> {
        1..=self.derived.total_pages
    }

    /// Search edits keep the current page unless the configuration asks for a
    /// reset.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
        if self.config.reset_page_on_search {
            self.state.current_page = 1;
        }
        self.recompute();
    }

    pub fn set_genre_filter(&mut self, filter: GenreFilter) {
        self.state.genre_filter = filter;
        self.state.current_page = 1;
        self.recompute();
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.state.sort_key = key;
        self.state.current_page = 1;
        self.recompute();
    }

    /// Only sizes listed in the configuration are accepted.
    pub fn set_page_size(&mut self, size: PageSize) -> Result<(), ViewError> {
        if !self.config.page_size_options.contains(&size) {
            return Err(ViewError::UnsupportedPageSize(size.label()));
        }
        self.state.page_size = size;
        self.state.current_page = 1;
        self.recompute();
        Ok(())
    }

    /// Jump to a literal page number from the pagination controls.
    pub fn set_current_page(&mut self, page: usize) -> Result<(), ViewError> {
        if !self.page_controls().contains(&page) {
            return Err(ViewError::PageOutOfRange {
                requested: page,
                total_pages: self.derived.total_pages,
            });
        }
        self.state.current_page = page;
        self.recompute();
        Ok(())
    }

    /// Route one command into the matching setter.
    ///
    /// Commands that only read the view (`show`, `genres`, `help`, `quit`) leave
    /// the state untouched.
    pub fn apply(&mut self, command: &ViewCommand) -> Result<(), ViewError> {
        match command {
            ViewCommand::Search(term) => self.set_search_term(term.clone()),
            ViewCommand::Genre(filter) => self.set_genre_filter(filter.clone()),
            ViewCommand::Sort(key) => self.set_sort_key(*key),
            ViewCommand::PerPage(size) => self.set_page_size(*size)?,
            ViewCommand::Page(page) => self.set_current_page(*page)?,
            ViewCommand::Show | ViewCommand::Genres | ViewCommand::Help | ViewCommand::Quit => {}
        }
        Ok(())
    }

    fn recompute(&mut self) {
        self.derived = compute_view(&self.dataset, &self.state);
        debug!(
            search = %self.state.search_term,
            genre = %self.state.genre_filter,
            sort = %self.state.sort_key,
            page_size = %self.state.page_size,
            page = self.state.current_page,
            matched = self.derived.matched,
            total_pages = self.derived.total_pages,
            visible = self.derived.visible_items.len(),
            "recomputed listing"
        );
        if self.derived.total_pages > 0 && self.state.current_page > self.derived.total_pages {
            debug!(
                page = self.state.current_page,
                total_pages = self.derived.total_pages,
                "current page is past the last page"
            );
        }
    }
}
