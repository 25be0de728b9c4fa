//! Deterministic view model of the three widget regions.
//!
//! Visibility is an explicit flag per region. Front ends draw whatever the
//! model says; they never toggle state of their own.

use crate::movie::{Candidate, Detail, MovieId};

/// Message shown when sorting is requested before any results exist.
pub const NO_MOVIES_TO_SORT: &str = "No movies to sort. Please perform a search first.";

/// Complete renderable state of the widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetView {
    /// Search box
    pub input: SearchInput,
    /// Candidate list below the search box
    pub list: ListRegion,
    /// Detail card for the selected title
    pub detail: DetailRegion,
}

/// Text currently in the search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    pub text: String,
}

/// Candidate list region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRegion {
    pub visible: bool,
    pub content: ListContent,
}

/// What the candidate list region currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListContent {
    #[default]
    Empty,
    /// Spinner while a search is pending or found nothing yet
    Loading,
    /// Selectable entries, in display order
    Candidates(Vec<ListEntry>),
    /// Informational text
    Message(String),
    /// A search failed
    Error(String),
}

/// One rendered, selectable candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: MovieId,
    pub poster: String,
    pub title: String,
    pub year: String,
}

impl From<&Candidate> for ListEntry {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id.clone(),
            poster: candidate.poster.display_source().to_string(),
            title: candidate.title.clone(),
            year: candidate.year.clone(),
        }
    }
}

impl ListRegion {
    /// Shows the spinner.
    pub fn show_loading(&mut self) {
        self.visible = true;
        self.content = ListContent::Loading;
    }

    /// Replaces all content with one entry per candidate, in the given order.
    pub fn show_candidates(&mut self, candidates: &[Candidate]) {
        self.visible = true;
        self.content = ListContent::Candidates(candidates.iter().map(ListEntry::from).collect());
    }

    pub fn show_message(&mut self, message: impl Into<String>) {
        self.visible = true;
        self.content = ListContent::Message(message.into());
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.visible = true;
        self.content = ListContent::Error(message.into());
    }

    pub fn hide_and_clear(&mut self) {
        self.visible = false;
        self.content = ListContent::Empty;
    }

    /// Entries currently available for selection.
    pub fn entries(&self) -> &[ListEntry] {
        match &self.content {
            ListContent::Candidates(entries) if self.visible => entries,
            _ => &[],
        }
    }

    /// Looks up a selectable entry by id.
    pub fn entry(&self, id: &MovieId) -> Option<&ListEntry> {
        self.entries().iter().find(|entry| &entry.id == id)
    }
}

/// Detail card region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailRegion {
    pub visible: bool,
    pub content: DetailContent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailContent {
    #[default]
    Empty,
    Card(Box<DetailCard>),
    /// The lookup failed
    Error(String),
}

impl DetailRegion {
    /// Replaces the card wholesale and shows the region.
    pub fn show_card(&mut self, detail: &Detail) {
        self.visible = true;
        self.content = DetailContent::Card(Box::new(DetailCard::from(detail)));
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.visible = true;
        self.content = DetailContent::Error(message.into());
    }

    /// Hides the region; the card is kept for the next time it is shown.
    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Fixed-shape layout of a fetched title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCard {
    pub poster: String,
    pub title: String,
    pub year: String,
    pub rated: String,
    pub released: String,
    pub genre: String,
    pub writer: String,
    pub actors: String,
    pub plot: String,
    pub language: String,
    pub awards: String,
}

impl DetailCard {
    /// Labelled rows below the title, in display order.
    pub fn rows(&self) -> [(&'static str, &str); 9] {
        [
            ("Year", self.year.as_str()),
            ("Ratings", self.rated.as_str()),
            ("Released", self.released.as_str()),
            ("Genre", self.genre.as_str()),
            ("Writer", self.writer.as_str()),
            ("Actors", self.actors.as_str()),
            ("Plot", self.plot.as_str()),
            ("Language", self.language.as_str()),
            ("Awards", self.awards.as_str()),
        ]
    }
}

impl From<&Detail> for DetailCard {
    fn from(detail: &Detail) -> Self {
        Self {
            poster: detail.poster.display_source().to_string(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            rated: detail.rated.clone(),
            released: detail.released.clone(),
            genre: detail.genre.clone(),
            writer: detail.writer.clone(),
            actors: detail.actors.clone(),
            plot: detail.plot.clone(),
            language: detail.language.clone(),
            awards: detail.awards.clone(),
        }
    }
}

/// Receives the view after every change.
///
/// Injected at spawn time; a widget without an observer renders nowhere
/// and is only inspected through snapshots.
pub trait ViewObserver: Send {
    fn view_changed(&mut self, view: &WidgetView);
}

impl<F> ViewObserver for F
where
    F: FnMut(&WidgetView) + Send,
{
    fn view_changed(&mut self, view: &WidgetView) {
        self(view)
    }
}
