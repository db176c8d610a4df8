//! Interactive menu loop over a loaded catalog.
//!
//! Generic over the input and output streams so tests can drive it with
//! in-memory buffers. End of input behaves like choosing "Exit".

use std::io::{BufRead, Write};

use anyhow::Result;
use catalog::category::CATEGORY_NAMES;
use catalog::{filter_by_category, list_all, search, Catalog, Category};
use colored::Colorize;

use crate::render::{self, OutputFormat};

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Print every record.
    ListAll,
    /// Look a book up by title.
    Search,
    /// Print the listable books of one category.
    ByCategory,
    /// Leave the menu.
    Exit,
}

impl MenuChoice {
    /// Map the user's answer to a menu entry. Surrounding whitespace is
    /// ignored; anything other than `0`–`3` is `None`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::ListAll),
            "2" => Some(Self::Search),
            "3" => Some(Self::ByCategory),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::ListAll => "list",
            Self::Search => "search",
            Self::ByCategory => "category",
            Self::Exit => "exit",
        }
    }
}

/// Run the menu until the user exits or `input` is exhausted.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `out` fails.
pub fn run<R, W, const N: usize>(catalog: &Catalog<N>, mut input: R, out: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    loop {
        write_menu(out)?;
        let Some(answer) = read_answer(&mut input)? else {
            break;
        };

        let Some(choice) = MenuChoice::parse(&answer) else {
            writeln!(out, "{}", "Invalid option.".yellow())?;
            writeln!(out)?;
            continue;
        };
        tracing::debug!(action = choice.label(), "menu selection");

        match choice {
            MenuChoice::ListAll => {
                render::write_listing(out, list_all(catalog), OutputFormat::Text)?;
            }
            MenuChoice::Search => {
                writeln!(out, "Enter the title of the book to search for:")?;
                out.flush()?;
                let Some(title) = read_answer(&mut input)? else {
                    break;
                };
                let title = title.trim_start();
                render::write_search(out, title, search(catalog, title), OutputFormat::Text)?;
            }
            MenuChoice::ByCategory => {
                writeln!(out, "Enter the category ({}):", CATEGORY_NAMES.join(", "))?;
                out.flush()?;
                let Some(answer) = read_answer(&mut input)? else {
                    break;
                };
                // Only the first word counts; unknown labels select the default.
                let category = Category::parse(answer.split_whitespace().next().unwrap_or(""));
                render::write_category(
                    out,
                    category,
                    filter_by_category(catalog, category),
                    OutputFormat::Text,
                )?;
            }
            MenuChoice::Exit => {
                writeln!(out, "Goodbye.")?;
                break;
            }
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn write_menu<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", "====== BOOK CATALOG ======".bold())?;
    writeln!(out, "[1] List catalog")?;
    writeln!(out, "[2] Search book by title")?;
    writeln!(out, "[3] List books by category")?;
    writeln!(out, "[0] Exit")?;
    writeln!(out, "Choose an option:")?;
    out.flush()?;
    Ok(())
}

/// Next non-blank input line without its line terminator, or `None` at end
/// of input.
fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if !trimmed.trim().is_empty() {
            return Ok(Some(trimmed.to_owned()));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use catalog::{BookCatalog, BookRecord};
    use std::io::Cursor;

    fn sample() -> BookCatalog {
        BookCatalog::from_records([
            BookRecord::new("Dune", "Herbert", 1965, 15.5, Category::Science),
            BookRecord::new("Emma", "Austen", 1815, 8.0, Category::Novel),
            BookRecord::new("Cosmos", "Sagan", 1980, 0.0, Category::Science),
        ])
    }

    fn session(script: &str) -> String {
        let catalog = sample();
        let mut out = Vec::new();
        run(&catalog, Cursor::new(script.as_bytes()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_menu_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::ListAll));
        assert_eq!(MenuChoice::parse(" 2 "), Some(MenuChoice::Search));
        assert_eq!(MenuChoice::parse("3\n"), Some(MenuChoice::ByCategory));
        assert_eq!(MenuChoice::parse("0"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("4"), None);
        assert_eq!(MenuChoice::parse("abc"), None);
    }

    #[test]
    fn list_prints_every_record() {
        let out = session("1\n0\n");
        assert!(out.contains("[Title]: Dune"));
        assert!(out.contains("[Title]: Emma"));
        assert!(out.contains("[Title]: Cosmos"));
        assert!(out.contains("Goodbye."));
    }

    #[test]
    fn search_is_case_insensitive() {
        let out = session("2\n  dUnE\n0\n");
        assert!(out.contains("Book found: [Title]: Dune"));
    }

    #[test]
    fn search_miss_reports_not_found() {
        let out = session("2\nNeuromancer\n0\n");
        assert!(out.contains(render::NOT_FOUND));
    }

    #[test]
    fn category_listing_uses_validity_guard() {
        let out = session("3\nscienza\n0\n");
        assert!(out.contains("[Title]: Dune"));
        assert!(!out.contains("[Title]: Cosmos"));
    }

    #[test]
    fn empty_category_reports_message() {
        let out = session("3\nArt\n0\n");
        assert!(out.contains(render::NO_CATEGORY_MATCH));
    }

    #[test]
    fn invalid_option_reprompts() {
        let out = session("9\nhello\n0\n");
        assert_eq!(out.matches("Invalid option.").count(), 2);
        assert_eq!(out.matches("[0] Exit").count(), 3);
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let out = session("1\n");
        assert!(out.contains("[Title]: Dune"));
        assert!(!out.contains("Goodbye."));
        assert!(session("").contains("[1] List catalog"));
    }

    #[test]
    fn blank_lines_are_skipped_before_answers() {
        let out = session("\n\n2\n\nEmma\n0\n");
        assert!(out.contains("Book found: [Title]: Emma"));
    }
}
