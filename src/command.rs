//! User commands and their text syntax
//!
//! Commands are what the flows react to. The interactive prompt reads them
//! from lines of text; the one-shot CLI subcommands build them directly.

use crate::api::ShowId;
use thiserror::Error;

/// Errors that can occur while parsing a prompt line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    /// The keyword needs an argument that was not given
    #[error("'{keyword}' needs {expected}")]
    MissingArgument {
        keyword: String,
        expected: &'static str,
    },

    /// The argument is not a valid number
    #[error("'{value}' is not a valid {expected}")]
    InvalidNumber {
        value: String,
        expected: &'static str,
    },
}

/// What an episode request points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeTarget {
    /// A rendered show card, by 1-based position
    Card(usize),
    /// A show id given directly
    Show(ShowId),
}

/// A user trigger, decoupled from how it was entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search for shows matching a term
    SubmitQuery(String),
    /// Load and display the episodes of a show
    RequestEpisodes(EpisodeTarget),
}

/// One parsed line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    /// Run a command
    Run(Command),
    /// Print the command reference
    Help,
    /// Leave the prompt
    Quit,
    /// Blank line
    Nothing,
}

/// Command reference printed by the interactive prompt.
pub const PROMPT_HELP: &str = "\
Commands:
  search <term>, s <term>   search shows (a line without keyword searches too)
  episodes <n>, e <n>       list the episodes of show card <n>
  show <id>                 list the episodes of the TVMaze show <id>
  help, ?                   print this help
  quit, exit, q             leave";

/// Parses one line of interactive input.
///
/// Keywords are matched case-insensitively. A line that starts with no
/// known keyword is taken as a search term in full.
pub fn parse_command(line: &str) -> Result<PromptInput, CommandParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(PromptInput::Nothing);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    match keyword.to_lowercase().as_str() {
        "search" | "s" => Ok(PromptInput::Run(Command::SubmitQuery(rest.to_string()))),
        "episodes" | "e" => {
            let position = parse_number::<usize>(keyword, rest, "card number")?;
            Ok(PromptInput::Run(Command::RequestEpisodes(
                EpisodeTarget::Card(position),
            )))
        }
        "show" => {
            let id = parse_number::<u64>(keyword, rest, "show id")?;
            Ok(PromptInput::Run(Command::RequestEpisodes(
                EpisodeTarget::Show(ShowId(id)),
            )))
        }
        "help" | "?" => Ok(PromptInput::Help),
        "quit" | "exit" | "q" => Ok(PromptInput::Quit),
        _ => Ok(PromptInput::Run(Command::SubmitQuery(line.to_string()))),
    }
}

fn parse_number<T: std::str::FromStr>(
    keyword: &str,
    argument: &str,
    expected: &'static str,
) -> Result<T, CommandParseError> {
    if argument.is_empty() {
        return Err(CommandParseError::MissingArgument {
            keyword: keyword.to_string(),
            expected,
        });
    }

    argument
        .parse()
        .map_err(|_| CommandParseError::InvalidNumber {
            value: argument.to_string(),
            expected,
        })
}
