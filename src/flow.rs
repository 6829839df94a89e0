//! Search and episode flows
//!
//! A flow binds one user command to a fetch, normalize, render sequence.
//! Flows hold no state of their own between invocations; everything they
//! leave behind lives in the [`View`] they were handed.

use crate::api::{ApiError, ShowApi};
use crate::command::{Command, EpisodeTarget};
use crate::normalize::{normalize_episodes, normalize_shows};
use crate::view::{View, ViewError};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a flow
#[derive(Debug, Error)]
pub enum FlowError {
    /// Fetching or normalizing the API payload failed
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Rendering into the view failed
    #[error("{0}")]
    View(#[from] ViewError),

    /// The requested card is not part of the current show list
    #[error("No show card at position {0}")]
    UnknownCard(usize),
}

/// Runs a search and renders the matching shows.
///
/// The term is sent as is, empty terms included. On success the previous
/// show and episode lists are cleared, the episode area is hidden and the
/// new show cards are rendered. A failed fetch leaves the view untouched.
pub fn search_flow<A, V>(api: &A, view: &mut V, term: &str) -> Result<usize, FlowError>
where
    A: ShowApi + ?Sized,
    V: View + ?Sized,
{
    debug!(term, "searching shows");
    let raw = api.search_shows(term)?;
    let shows = normalize_shows(&raw)?;

    view.clear_shows()?;
    view.clear_episodes()?;
    view.hide_episode_area()?;
    view.render_shows(&shows)?;

    info!(term, count = shows.len(), "rendered search results");
    Ok(shows.len())
}

/// Loads the episodes of a show and reveals them in the episode area.
///
/// A card target is resolved through the view first; an unknown card
/// fails before any request is made. The episode list is replaced, not
/// merged.
pub fn episode_flow<A, V>(api: &A, view: &mut V, target: EpisodeTarget) -> Result<usize, FlowError>
where
    A: ShowApi + ?Sized,
    V: View + ?Sized,
{
    let show_id = match target {
        EpisodeTarget::Card(position) => view
            .card_show_id(position)
            .ok_or(FlowError::UnknownCard(position))?,
        EpisodeTarget::Show(show_id) => show_id,
    };

    debug!(%show_id, "fetching episodes");
    let raw = api.episodes_of_show(show_id)?;
    let episodes = normalize_episodes(&raw, show_id)?;

    view.clear_episodes()?;
    view.render_episodes(&episodes)?;
    view.show_episode_area()?;

    info!(%show_id, count = episodes.len(), "rendered episodes");
    Ok(episodes.len())
}

/// Routes a command to its flow.
///
/// Returns the number of records rendered.
pub fn dispatch<A, V>(api: &A, view: &mut V, command: &Command) -> Result<usize, FlowError>
where
    A: ShowApi + ?Sized,
    V: View + ?Sized,
{
    match command {
        Command::SubmitQuery(term) => search_flow(api, view, term),
        Command::RequestEpisodes(target) => episode_flow(api, view, *target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RawEpisode, RawSearchResult, ShowId};
    use crate::normalize::{EpisodeResult, MISSING_IMAGE_URL, MISSING_SUMMARY, ShowQueryResult};
    use crate::view::TerminalView;
    use assert_matches::assert_matches;
    use std::cell::RefCell;

    /// Canned API answering from JSON strings and recording every call.
    #[derive(Default)]
    struct FakeApi {
        search_body: Option<&'static str>,
        episodes_body: Option<&'static str>,
        calls: RefCell<Vec<String>>,
    }

    impl ShowApi for FakeApi {
        fn search_shows(&self, term: &str) -> Result<Vec<RawSearchResult>, ApiError> {
            self.calls.borrow_mut().push(format!("search:{}", term));
            match self.search_body {
                Some(body) => serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string())),
                None => Err(ApiError::HttpStatus {
                    status: 503,
                    url: "http://fake/search/shows".to_string(),
                }),
            }
        }

        fn episodes_of_show(&self, id: ShowId) -> Result<Vec<RawEpisode>, ApiError> {
            self.calls.borrow_mut().push(format!("episodes:{}", id));
            match self.episodes_body {
                Some(body) => serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string())),
                None => Err(ApiError::Request("connection refused".to_string())),
            }
        }
    }

    /// View recording every operation, with real card bookkeeping.
    #[derive(Default)]
    struct RecordingView {
        ops: Vec<String>,
        shows: Vec<ShowQueryResult>,
        episodes: Vec<EpisodeResult>,
        episode_area_visible: bool,
    }

    impl View for RecordingView {
        fn clear_shows(&mut self) -> Result<(), ViewError> {
            self.ops.push("clear_shows".to_string());
            self.shows.clear();
            Ok(())
        }

        fn render_shows(&mut self, shows: &[ShowQueryResult]) -> Result<(), ViewError> {
            self.ops.push(format!("render_shows:{}", shows.len()));
            self.shows.extend_from_slice(shows);
            Ok(())
        }

        fn clear_episodes(&mut self) -> Result<(), ViewError> {
            self.ops.push("clear_episodes".to_string());
            self.episodes.clear();
            Ok(())
        }

        fn render_episodes(&mut self, episodes: &[EpisodeResult]) -> Result<(), ViewError> {
            self.ops.push(format!("render_episodes:{}", episodes.len()));
            self.episodes.extend_from_slice(episodes);
            Ok(())
        }

        fn show_episode_area(&mut self) -> Result<(), ViewError> {
            self.ops.push("show_episode_area".to_string());
            self.episode_area_visible = true;
            Ok(())
        }

        fn hide_episode_area(&mut self) -> Result<(), ViewError> {
            self.ops.push("hide_episode_area".to_string());
            self.episode_area_visible = false;
            Ok(())
        }

        fn card_show_id(&self, position: usize) -> Option<ShowId> {
            position
                .checked_sub(1)
                .and_then(|index| self.shows.get(index))
                .map(|show| show.id)
        }
    }

    const BATMAN_SEARCH: &str = r#"[{"show":{"id":1,"name":"Batman","summary":null,"image":null}}]"#;
    const PILOT_EPISODES: &str = r#"[{"name":"Pilot","season":1,"number":1}]"#;

    #[test]
    fn test_search_renders_normalized_shows() {
        let api = FakeApi {
            search_body: Some(BATMAN_SEARCH),
            ..Default::default()
        };
        let mut view = RecordingView::default();

        let count = search_flow(&api, &mut view, "batman").unwrap();

        assert_eq!(count, 1);
        assert_eq!(api.calls.borrow().as_slice(), ["search:batman"]);
        assert_eq!(
            view.shows,
            vec![ShowQueryResult {
                id: ShowId(1),
                name: "Batman".to_string(),
                summary: MISSING_SUMMARY.to_string(),
                image_url: MISSING_IMAGE_URL.to_string(),
            }]
        );
    }

    #[test]
    fn test_search_clears_and_hides_before_rendering() {
        let api = FakeApi {
            search_body: Some(BATMAN_SEARCH),
            ..Default::default()
        };
        let mut view = RecordingView {
            episode_area_visible: true,
            ..Default::default()
        };

        search_flow(&api, &mut view, "batman").unwrap();

        assert_eq!(
            view.ops,
            ["clear_shows", "clear_episodes", "hide_episode_area", "render_shows:1"]
        );
        assert!(!view.episode_area_visible);
    }

    #[test]
    fn test_empty_term_is_sent_unvalidated() {
        let api = FakeApi {
            search_body: Some("[]"),
            ..Default::default()
        };
        let mut view = RecordingView::default();

        let count = search_flow(&api, &mut view, "").unwrap();

        assert_eq!(count, 0);
        assert_eq!(api.calls.borrow().as_slice(), ["search:"]);
    }

    #[test]
    fn test_failed_search_propagates_and_renders_nothing() {
        let api = FakeApi::default();
        let mut view = RecordingView::default();

        let result = search_flow(&api, &mut view, "batman");

        assert_matches!(result, Err(FlowError::Api(ApiError::HttpStatus { status: 503, .. })));
        assert!(view.ops.is_empty());
        assert!(view.shows.is_empty());
    }

    #[test]
    fn test_malformed_search_payload_propagates() {
        let api = FakeApi {
            search_body: Some(r#"{"unexpected":"object"}"#),
            ..Default::default()
        };
        let mut view = RecordingView::default();

        let result = search_flow(&api, &mut view, "batman");

        assert_matches!(result, Err(FlowError::Api(ApiError::Parse(_))));
        assert!(view.ops.is_empty());
    }

    #[test]
    fn test_episodes_for_show_id() {
        let api = FakeApi {
            episodes_body: Some(PILOT_EPISODES),
            ..Default::default()
        };
        let mut view = RecordingView::default();

        let count = episode_flow(&api, &mut view, EpisodeTarget::Show(ShowId(7))).unwrap();

        assert_eq!(count, 1);
        assert_eq!(
            view.episodes,
            vec![EpisodeResult {
                id: ShowId(7),
                name: "Pilot".to_string(),
                season: 1,
                number: 1,
            }]
        );
        assert_eq!(
            view.ops,
            ["clear_episodes", "render_episodes:1", "show_episode_area"]
        );
        assert!(view.episode_area_visible);
    }

    #[test]
    fn test_episodes_resolve_card_to_show_id() {
        let api = FakeApi {
            search_body: Some(
                r#"[{"show":{"id":975,"name":"Batman"}},{"show":{"id":481,"name":"The Batman"}}]"#,
            ),
            episodes_body: Some(PILOT_EPISODES),
            ..Default::default()
        };
        let mut view = RecordingView::default();
        search_flow(&api, &mut view, "batman").unwrap();

        episode_flow(&api, &mut view, EpisodeTarget::Card(2)).unwrap();

        assert_eq!(api.calls.borrow().as_slice(), ["search:batman", "episodes:481"]);
        assert_eq!(view.episodes[0].id, ShowId(481));
    }

    #[test]
    fn test_unknown_card_makes_no_request() {
        let api = FakeApi {
            episodes_body: Some(PILOT_EPISODES),
            ..Default::default()
        };
        let mut view = RecordingView::default();

        let result = episode_flow(&api, &mut view, EpisodeTarget::Card(1));

        assert_matches!(result, Err(FlowError::UnknownCard(1)));
        assert!(api.calls.borrow().is_empty());
        assert!(view.ops.is_empty());
    }

    #[test]
    fn test_failed_episode_fetch_keeps_area_hidden() {
        let api = FakeApi::default();
        let mut view = RecordingView::default();

        let result = episode_flow(&api, &mut view, EpisodeTarget::Show(ShowId(7)));

        assert_matches!(result, Err(FlowError::Api(ApiError::Request(_))));
        assert!(!view.episode_area_visible);
        assert!(view.ops.is_empty());
    }

    #[test]
    fn test_second_episode_request_replaces_list() {
        let api = FakeApi {
            episodes_body: Some(include_str!("../res/tvmaze/episodes_975.json")),
            ..Default::default()
        };
        let mut view = RecordingView::default();

        episode_flow(&api, &mut view, EpisodeTarget::Show(ShowId(975))).unwrap();
        episode_flow(&api, &mut view, EpisodeTarget::Show(ShowId(976))).unwrap();

        assert_eq!(view.episodes.len(), 3);
        assert!(view.episodes.iter().all(|e| e.id == ShowId(976)));
    }

    #[test]
    fn test_dispatch_routes_commands() {
        let api = FakeApi {
            search_body: Some(BATMAN_SEARCH),
            episodes_body: Some(PILOT_EPISODES),
            ..Default::default()
        };
        let mut view = RecordingView::default();

        dispatch(&api, &mut view, &Command::SubmitQuery("batman".to_string())).unwrap();
        dispatch(&api, &mut view, &Command::RequestEpisodes(EpisodeTarget::Card(1))).unwrap();

        assert_eq!(api.calls.borrow().as_slice(), ["search:batman", "episodes:1"]);
        assert!(view.episode_area_visible);
    }

    #[test]
    fn test_flows_drive_terminal_view() {
        let api = FakeApi {
            search_body: Some(BATMAN_SEARCH),
            episodes_body: Some(PILOT_EPISODES),
            ..Default::default()
        };
        let mut view = TerminalView::new(Vec::new());

        search_flow(&api, &mut view, "batman").unwrap();
        episode_flow(&api, &mut view, EpisodeTarget::Card(1)).unwrap();

        let text = String::from_utf8(view.into_inner()).unwrap();
        assert_eq!(
            text,
            "[1] Batman (TVMaze #1)\n    Image: https://tinyurl.com/tv-missing\n    No Summary\n    [episodes: e 1]\n\n\
             === Episodes ===\n  Pilot (season 1, number 1)\n\n"
        );
    }
}
