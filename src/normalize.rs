//! Response normalization
//!
//! Maps the raw TVMaze payloads into display-ready records, substituting
//! defaults for missing fields. Both normalizers are pure: same input, same
//! output, input order preserved.

use crate::api::{ApiError, RawEpisode, RawSearchResult, ShowId};
use serde::Serialize;

/// Summary shown for shows that have none.
pub const MISSING_SUMMARY: &str = "No Summary";

/// Image shown for shows without a medium-sized poster.
pub const MISSING_IMAGE_URL: &str = "https://tinyurl.com/tv-missing";

/// A show ready to be rendered as a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowQueryResult {
    /// TVMaze show id
    pub id: ShowId,
    /// The show name
    pub name: String,
    /// HTML summary, or [`MISSING_SUMMARY`]
    pub summary: String,
    /// Poster URL, or [`MISSING_IMAGE_URL`]
    pub image_url: String,
}

/// An episode ready to be rendered in the episode list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeResult {
    /// Id of the show the episode was requested for.
    ///
    /// This is deliberately the show id, not the episode's own TVMaze id;
    /// consumers relying on it to identify single episodes will see the
    /// same value for every episode of a show.
    pub id: ShowId,
    /// The episode title
    pub name: String,
    /// Season number (0 for specials)
    pub season: u64,
    /// Episode number within the season
    pub number: u64,
}

/// Normalizes a raw search payload into show cards.
///
/// The output has the same length and order as the input. Shows without a
/// summary get [`MISSING_SUMMARY`], shows without a medium image get
/// [`MISSING_IMAGE_URL`], and a missing name becomes the empty string.
///
/// # Errors
///
/// Returns [`ApiError::InvalidData`] if an entry carries no show or a show
/// carries no id, since neither can be turned into a usable card.
pub fn normalize_shows(results: &[RawSearchResult]) -> Result<Vec<ShowQueryResult>, ApiError> {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            let show = result.show.as_ref().ok_or_else(|| {
                ApiError::InvalidData(format!("search result {} has no show", index))
            })?;
            let id = show.id.ok_or_else(|| {
                ApiError::InvalidData(format!("search result {} has a show without id", index))
            })?;

            let summary = match show.summary.as_deref() {
                Some(summary) if !summary.is_empty() => summary.to_string(),
                _ => MISSING_SUMMARY.to_string(),
            };

            let image_url = show
                .image
                .as_ref()
                .and_then(|image| image.medium.as_deref())
                .filter(|url| !url.is_empty())
                .unwrap_or(MISSING_IMAGE_URL)
                .to_string();

            Ok(ShowQueryResult {
                id: ShowId(id),
                name: show.name.clone().unwrap_or_default(),
                summary,
                image_url,
            })
        })
        .collect()
}

/// Normalizes a raw episode payload for the given show.
///
/// Names, seasons and episode numbers pass through unchanged and the input
/// order is kept. Every result carries `show_id` as its id.
///
/// # Errors
///
/// Returns [`ApiError::InvalidData`] if an episode lacks its season or
/// number.
pub fn normalize_episodes(
    episodes: &[RawEpisode],
    show_id: ShowId,
) -> Result<Vec<EpisodeResult>, ApiError> {
    episodes
        .iter()
        .enumerate()
        .map(|(index, episode)| {
            let season = episode.season.ok_or_else(|| {
                ApiError::InvalidData(format!("episode {} of show {} has no season", index, show_id))
            })?;
            let number = episode.number.ok_or_else(|| {
                ApiError::InvalidData(format!("episode {} of show {} has no number", index, show_id))
            })?;

            Ok(EpisodeResult {
                id: show_id,
                name: episode.name.clone().unwrap_or_default(),
                season,
                number,
            })
        })
        .collect()
}
