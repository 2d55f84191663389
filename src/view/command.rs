//! Line-oriented commands that drive the view interactively.
//!
//! Each command maps onto one user interaction with the listing: typing in the
//! search box, picking from a select control, or clicking a page button.

use crate::catalog::GenreFilter;
use crate::error::ViewError;
use crate::view::state::{PageSize, SortKey};

pub const COMMAND_HELP: &str = "\
Commands:
  search <text>       filter titles (case-insensitive); 'search' alone clears
  genre <label|all>   show one genre, or every genre
  sort <title|rating> order by title (A-Z) or rating (highest first)
  per-page <n|all>    change the page size
  page <n>            jump to page n
  genres              list genre options
  show                render the current page
  help                print this help
  quit                exit";

#[derive(Clone, Debug, PartialEq)]
pub enum ViewCommand {
    Search(String),
    Genre(GenreFilter),
    Sort(SortKey),
    PerPage(PageSize),
    Page(usize),
    Genres,
    Show,
    Help,
    Quit,
}

impl ViewCommand {
    /// Parse one input line. The verb is case-insensitive; arguments are kept
    /// verbatim apart from surrounding whitespace.
    pub fn parse(line: &str) -> Result<Self, ViewError> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "search" | "s" => Ok(ViewCommand::Search(rest.to_string())),
            "genre" | "g" => {
                if rest.is_empty() {
                    return Err(ViewError::MissingArgument {
                        command: "genre",
                        expected: "a genre label or 'all'",
                    });
                }
                Ok(ViewCommand::Genre(GenreFilter::from_label(rest)))
            }
            "sort" => {
                if rest.is_empty() {
                    return Err(ViewError::MissingArgument {
                        command: "sort",
                        expected: "'title' or 'rating'",
                    });
                }
                Ok(ViewCommand::Sort(rest.parse()?))
            }
            "per-page" | "perpage" => {
                if rest.is_empty() {
                    return Err(ViewError::MissingArgument {
                        command: "per-page",
                        expected: "a page size or 'all'",
                    });
                }
                Ok(ViewCommand::PerPage(rest.parse()?))
            }
            "page" | "p" => {
                if rest.is_empty() {
                    return Err(ViewError::MissingArgument {
                        command: "page",
                        expected: "a page number",
                    });
                }
                rest.parse::<usize>()
                    .map(ViewCommand::Page)
                    .map_err(|_| ViewError::InvalidPage(rest.to_string()))
            }
            "genres" => Ok(ViewCommand::Genres),
            "show" | "" => Ok(ViewCommand::Show),
            "help" | "?" => Ok(ViewCommand::Help),
            "quit" | "exit" | "q" => Ok(ViewCommand::Quit),
            other => Err(ViewError::UnknownCommand(other.to_string())),
        }
    }

    /// Whether the command changes the view state.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            ViewCommand::Search(_)
                | ViewCommand::Genre(_)
                | ViewCommand::Sort(_)
                | ViewCommand::PerPage(_)
                | ViewCommand::Page(_)
        )
    }
}
