//! Rendering targets for search results and episode lists
//!
//! Flows never write output directly. They drive a [`View`], which owns the
//! rendered show cards, the episode list, and the visibility of the episode
//! area. [`TerminalView`] renders all of this as plain text.

use crate::api::ShowId;
use crate::normalize::{EpisodeResult, ShowQueryResult};
use std::io::{self, Write};
use thiserror::Error;

/// Errors that can occur while rendering
#[derive(Debug, Error)]
pub enum ViewError {
    /// Writing to the output failed
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// A rendered show, as tracked by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowCard {
    /// 1-based position of the card in the current show list
    pub position: usize,
    /// The show the card was rendered for
    pub show_id: ShowId,
}

/// Trait for everything the search and episode flows render into.
///
/// The show list and the episode list are replaced wholesale on each render
/// pass; implementors never merge old and new content.
pub trait View {
    /// Removes all rendered show cards.
    fn clear_shows(&mut self) -> Result<(), ViewError>;

    /// Appends a card for every show, in order.
    fn render_shows(&mut self, shows: &[ShowQueryResult]) -> Result<(), ViewError>;

    /// Removes all rendered episodes.
    fn clear_episodes(&mut self) -> Result<(), ViewError>;

    /// Appends every episode to the episode list, in order.
    fn render_episodes(&mut self, episodes: &[EpisodeResult]) -> Result<(), ViewError>;

    /// Makes the episode area visible.
    fn show_episode_area(&mut self) -> Result<(), ViewError>;

    /// Hides the episode area.
    fn hide_episode_area(&mut self) -> Result<(), ViewError>;

    /// Resolves a 1-based card position to the show it was rendered for.
    fn card_show_id(&self, position: usize) -> Option<ShowId>;
}

/// Plain text view writing to any output stream.
///
/// Output already written cannot be taken back, so the view keeps the
/// current cards and episodes as state and writes only what becomes
/// visible: cards as soon as they are rendered, the episode list once the
/// episode area is shown.
pub struct TerminalView<W: Write> {
    out: W,
    cards: Vec<ShowCard>,
    episodes: Vec<EpisodeResult>,
    episode_area_visible: bool,
}

impl<W: Write> TerminalView<W> {
    /// Creates a view with no cards and a hidden episode area.
    pub fn new(out: W) -> Self {
        Self {
            out,
            cards: Vec::new(),
            episodes: Vec::new(),
            episode_area_visible: false,
        }
    }

    /// The currently rendered cards.
    pub fn cards(&self) -> &[ShowCard] {
        &self.cards
    }

    /// The current content of the episode list.
    pub fn episodes(&self) -> &[EpisodeResult] {
        &self.episodes
    }

    pub fn is_episode_area_visible(&self) -> bool {
        self.episode_area_visible
    }

    /// Consumes the view and returns the output stream.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_card(&mut self, card: ShowCard, show: &ShowQueryResult) -> io::Result<()> {
        writeln!(self.out, "[{}] {} (TVMaze #{})", card.position, show.name, show.id)?;
        writeln!(self.out, "    Image: {}", show.image_url)?;

        let summary = nanohtml2text::html2text(&show.summary);
        for line in summary.trim().lines().filter(|l| !l.trim().is_empty()) {
            writeln!(self.out, "    {}", line.trim())?;
        }

        writeln!(self.out, "    [episodes: e {}]", card.position)?;
        writeln!(self.out)
    }

    fn write_episode_area(&mut self) -> io::Result<()> {
        writeln!(self.out, "=== Episodes ===")?;
        if self.episodes.is_empty() {
            writeln!(self.out, "  No episodes found.")?;
        }
        for episode in &self.episodes {
            writeln!(
                self.out,
                "  {} (season {}, number {})",
                episode.name, episode.season, episode.number
            )?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> View for TerminalView<W> {
    fn clear_shows(&mut self) -> Result<(), ViewError> {
        self.cards.clear();
        Ok(())
    }

    fn render_shows(&mut self, shows: &[ShowQueryResult]) -> Result<(), ViewError> {
        if shows.is_empty() && self.cards.is_empty() {
            writeln!(self.out, "No shows found.")?;
        }

        for show in shows {
            let card = ShowCard {
                position: self.cards.len() + 1,
                show_id: show.id,
            };
            self.write_card(card, show)?;
            self.cards.push(card);
        }

        self.out.flush()?;
        Ok(())
    }

    fn clear_episodes(&mut self) -> Result<(), ViewError> {
        self.episodes.clear();
        Ok(())
    }

    fn render_episodes(&mut self, episodes: &[EpisodeResult]) -> Result<(), ViewError> {
        self.episodes.extend_from_slice(episodes);
        // Already visible: reprint the whole area instead of appending loose lines
        if self.episode_area_visible {
            self.write_episode_area()?;
        }
        Ok(())
    }

    fn show_episode_area(&mut self) -> Result<(), ViewError> {
        if !self.episode_area_visible {
            self.episode_area_visible = true;
            self.write_episode_area()?;
        }
        Ok(())
    }

    fn hide_episode_area(&mut self) -> Result<(), ViewError> {
        self.episode_area_visible = false;
        Ok(())
    }

    fn card_show_id(&self, position: usize) -> Option<ShowId> {
        self.cards
            .iter()
            .find(|card| card.position == position)
            .map(|card| card.show_id)
    }
}
