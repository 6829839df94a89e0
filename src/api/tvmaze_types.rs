/// TVMaze API response types for deserialization.
///
/// These structures mirror the JSON response format from the TVMaze API.
/// Every field is optional: the payload is external data, and the
/// normalizers decide what a missing field means.
use serde::Deserialize;

/// One entry of the `/search/shows` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSearchResult {
    /// Relevance score assigned by TVMaze
    pub score: Option<f64>,
    /// The matched show
    pub show: Option<RawShow>,
}

/// A show record as embedded in a search result.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawShow {
    /// TVMaze show id
    pub id: Option<u64>,
    /// The name of the TV show
    pub name: Option<String>,
    /// Show summary in HTML format (may be null)
    pub summary: Option<String>,
    /// Poster image links (null when TVMaze has no image)
    pub image: Option<RawImage>,
}

/// Size-keyed image links of a show.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawImage {
    pub medium: Option<String>,
    pub original: Option<String>,
}

/// A single episode from the `/shows/{id}/episodes` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawEpisode {
    /// TVMaze episode id (never used for display)
    pub id: Option<u64>,
    /// Episode title
    pub name: Option<String>,
    /// Season number (0 for specials)
    pub season: Option<u64>,
    /// Episode number within the season
    pub number: Option<u64>,
}
