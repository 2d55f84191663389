//! Listing view model.
//!
//! `state` holds the inputs, `pipeline` turns them into the visible window,
//! `options` derives the genre select options, and `controller` ties them
//! together behind setter entry points. `command` parses the text commands the
//! CLI routes into those setters.

pub mod command;
pub mod controller;
pub mod options;
pub mod pipeline;
pub mod state;

pub use command::{COMMAND_HELP, ViewCommand};
pub use controller::ListingView;
pub use options::genre_options;
pub use pipeline::{DerivedResult, compare_titles, compute_view};
pub use state::{PageSize, SortKey, ViewState};
