//! Interactive search shell.
//!
//! A plain line runs a new search. Lines starting with `:` change the filter
//! state and re-render the current results without another request.

use pricewise_client::SearchController;
use pricewise_core::{CategoryFilter, FilterError, SortKey, SourceFilter};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::{render_facets, render_state};

const HELP: &str = "\
<text>              search for <text>
:source <name|all>  filter by source (Flipkart, Amazon, Vijay Sales, JioMart)
:category <name|all> filter by category
:sort <price-asc|price-desc>
:facets             list sources and categories in the current results
:help               show this help
:quit               exit";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Search(String),
    Source(SourceFilter),
    Category(CategoryFilter),
    Sort(SortKey),
    Facets,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ShellError {
    #[error("unknown command :{0} (try :help)")]
    UnknownCommand(String),

    #[error(":{command} needs a value")]
    MissingValue { command: String },

    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Parses one line of shell input.
pub(crate) fn parse_line(line: &str) -> Result<ShellCommand, ShellError> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(ShellCommand::Search(line.to_string()));
    };

    let (command, value) = match rest.split_once(char::is_whitespace) {
        Some((command, value)) => (command, value.trim()),
        None => (rest, ""),
    };

    let require_value = || {
        if value.is_empty() {
            Err(ShellError::MissingValue {
                command: command.to_string(),
            })
        } else {
            Ok(value)
        }
    };

    match command {
        "source" => Ok(ShellCommand::Source(require_value()?.parse()?)),
        "category" => Ok(ShellCommand::Category(require_value()?.parse()?)),
        "sort" => Ok(ShellCommand::Sort(require_value()?.parse()?)),
        "facets" => Ok(ShellCommand::Facets),
        "help" | "h" | "?" => Ok(ShellCommand::Help),
        "quit" | "q" | "exit" => Ok(ShellCommand::Quit),
        other => Err(ShellError::UnknownCommand(other.to_string())),
    }
}

/// Runs the shell on stdin until `:quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading stdin fails.
pub(crate) async fn run_shell(controller: &SearchController) -> anyhow::Result<()> {
    println!("PriceWise - compare prices across platforms. Type :help for commands.");
    println!("{}", render_state(&controller.snapshot().await));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        match command {
            ShellCommand::Search(query) => {
                println!("Searching across platforms...");
                controller.submit(&query).await;
            }
            ShellCommand::Source(source) => controller.set_source(source).await,
            ShellCommand::Category(category) => controller.set_category(category).await,
            ShellCommand::Sort(sort) => controller.set_sort(sort).await,
            ShellCommand::Facets => {
                print!("{}", render_facets(&controller.snapshot().await));
                continue;
            }
            ShellCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ShellCommand::Quit => break,
        }

        println!("{}", render_state(&controller.snapshot().await));
    }

    Ok(())
}
