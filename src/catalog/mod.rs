//! Game catalog wiring.
//!
//! Wraps the JSON dataset (bundled `data/games.json` or a file supplied at run
//! time) so the view can work from a validated snapshot. Types here mirror the
//! dataset fields; callers use `GameIndex` for validation.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{GameTitle, GenreFilter};
pub use index::GameIndex;
pub use model::{Game, games_from_values, parse_game_values};
