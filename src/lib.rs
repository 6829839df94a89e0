//! ShowFinder - Search TVMaze for tv shows and browse their episodes
//!
//! This library provides the pieces behind the `show-finder` binary: a
//! client for the TVMaze API, normalizers turning its raw payloads into
//! display records, views to render those records, and the two flows that
//! tie them together.

mod api;
mod command;
mod flow;
mod normalize;
mod view;

// Re-export error types
pub use api::ApiError;
pub use command::CommandParseError;
pub use flow::FlowError;
pub use view::ViewError;

pub use api::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, RawEpisode, RawImage, RawSearchResult,
    RawShow, ShowApi, ShowId, TvMazeClient,
};
pub use command::{Command, EpisodeTarget, PROMPT_HELP, PromptInput, parse_command};
pub use flow::{dispatch, episode_flow, search_flow};
pub use normalize::{
    EpisodeResult, MISSING_IMAGE_URL, MISSING_SUMMARY, ShowQueryResult, normalize_episodes,
    normalize_shows,
};
pub use view::{ShowCard, TerminalView, View};

use thiserror::Error;

/// Top-level error type for ShowFinder operations
#[derive(Debug, Error)]
pub enum ShowFinderError {
    /// Error talking to the metadata API
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Error while running a flow
    #[error("{0}")]
    Flow(#[from] FlowError),

    /// Error parsing a prompt line
    #[error("Invalid command: {0}")]
    CommandParse(#[from] CommandParseError),

    /// Error reading interactive input
    #[error("Prompt error: {0}")]
    Prompt(String),
}
