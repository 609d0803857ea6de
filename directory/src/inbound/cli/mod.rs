//! Terminal front end: argument parsing, command dispatch and rendering.

mod app;
mod error;
pub mod render;

use clap::{Args, Parser, Subcommand};
use pagination::PageNumber;

use crate::domain::{SortOption, Theme};

pub use app::App;
pub use error::CliError;

const DEFAULT_FETCH_LIMIT: u32 = 30;

/// `user-directory` command line.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "user-directory",
    about = "Browse, search and bookmark users from a remote directory",
    version
)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch users and print one filtered, sorted page.
    List(ListArgs),
    /// Fetch and print one user.
    Show(ShowArgs),
    /// Inspect or change favourites.
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Inspect or change the theme.
    #[command(subcommand)]
    Theme(ThemeCommand),
}

/// Arguments for `list`.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Case-insensitive filter over names and email.
    #[arg(long, default_value = "")]
    pub query: String,
    /// One of none, name-asc, name-desc, age-asc, age-desc.
    #[arg(long, default_value_t = SortOption::None)]
    pub sort: SortOption,
    /// 1-based page; pages past the end fall back to the first.
    #[arg(long, value_parser = parse_page, default_value = "1")]
    pub page: PageNumber,
    /// Number of users requested from the service.
    #[arg(long, default_value_t = DEFAULT_FETCH_LIMIT)]
    pub limit: u32,
    /// Number of users the service skips.
    #[arg(long)]
    pub skip: Option<u32>,
    /// Search term sent to the service as `q`.
    #[arg(long)]
    pub remote_query: Option<String>,
    /// Only show favourites.
    #[arg(long)]
    pub favorites_only: bool,
}

/// Arguments for `show`.
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// User identifier.
    #[arg(allow_hyphen_values = true)]
    pub id: String,
    /// Print the validated record as JSON.
    #[arg(long)]
    pub json: bool,
}

/// `favorites` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum FavoritesCommand {
    /// Print favourite ids.
    List,
    /// Add or remove a favourite.
    Toggle {
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
}

/// `theme` subcommands.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ThemeCommand {
    Show,
    Toggle,
    /// Set `light` or `dark`.
    Set { theme: Theme },
}

fn parse_page(raw: &str) -> Result<PageNumber, String> {
    let number: usize = raw
        .trim()
        .parse()
        .map_err(|error| format!("invalid page {raw:?}: {error}"))?;
    PageNumber::new(number).map_err(|error| error.to_string())
}

#[cfg(test)]
mod tests {
    //! Argument parsing.

    use clap::Parser;
    use rstest::rstest;

    use super::*;

    #[test]
    fn list_defaults() {
        let cli = Cli::try_parse_from(["user-directory", "list"]).expect("parses");

        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.limit, 30);
        assert_eq!(args.page, PageNumber::FIRST);
        assert_eq!(args.sort, SortOption::None);
        assert!(args.query.is_empty());
        assert!(!args.favorites_only);
    }

    #[test]
    fn list_accepts_sort_and_page() {
        let cli = Cli::try_parse_from([
            "user-directory",
            "list",
            "--sort",
            "age-desc",
            "--page",
            "3",
            "--log-json",
        ])
        .expect("parses");

        assert!(cli.log_json);
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.sort, SortOption::AgeDesc);
        assert_eq!(args.page.get(), 3);
    }

    #[rstest]
    #[case::zero_page(&["list", "--page", "0"])]
    #[case::bad_sort(&["list", "--sort", "sideways"])]
    #[case::bad_theme(&["theme", "set", "sepia"])]
    fn rejects_invalid_values(#[case] args: &[&str]) {
        let argv = std::iter::once("user-directory").chain(args.iter().copied());

        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn show_accepts_negative_ids_for_the_service_to_reject() {
        let cli = Cli::try_parse_from(["user-directory", "show", "-5"]).expect("parses");

        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.id, "-5");
    }
}
