//! TVMaze API access
//!
//! This module defines the raw payload shapes returned by the show metadata
//! API, the trait flows use to fetch them, and the TVMaze implementation of
//! that trait.

mod tvmaze;
mod tvmaze_types;

pub use tvmaze::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, TvMazeClient};
pub use tvmaze_types::{RawEpisode, RawImage, RawSearchResult, RawShow};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while talking to the show metadata API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read
    #[error("Request failed: {0}")]
    Request(String),

    /// The API answered with a non-success status code
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Failed to parse the API's JSON response
    #[error("Failed to parse API response: {0}")]
    Parse(String),

    /// The API returned valid JSON with an unusable shape
    #[error("API returned invalid data: {0}")]
    InvalidData(String),
}

/// Identifier of a show in the TVMaze database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowId(pub u64);

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for clients of the show metadata API.
///
/// Implementors return the raw, unvalidated payloads. Shaping them into
/// display records is left to the normalizers.
pub trait ShowApi {
    /// Searches for shows matching a free-text term.
    ///
    /// The term is passed through as is; an empty term is a valid query.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// response body that is not the expected JSON array.
    fn search_shows(&self, term: &str) -> Result<Vec<RawSearchResult>, ApiError>;

    /// Fetches the episode list of a single show.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ShowApi::search_shows`].
    fn episodes_of_show(&self, id: ShowId) -> Result<Vec<RawEpisode>, ApiError>;
}
