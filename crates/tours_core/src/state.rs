use std::collections::HashSet;
use std::fmt;

use tours_logging::{tours_debug, tours_warn};

/// Identifier of a tour as delivered by the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TourId {
    /// Textual form of a numeric id, exactly as delivered.
    Number(String),
    Text(String),
}

impl fmt::Display for TourId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TourId::Number(n) => write!(f, "{n}"),
            TourId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TourId {
    fn from(value: i64) -> Self {
        TourId::Number(value.to_string())
    }
}

impl From<i32> for TourId {
    fn from(value: i32) -> Self {
        TourId::Number(value.to_string())
    }
}

impl From<&str> for TourId {
    fn from(value: &str) -> Self {
        TourId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    pub id: TourId,
    pub name: String,
    pub info: String,
    pub image: String,
    /// Textual price without currency symbol.
    pub price: String,
    pub show_full_description: bool,
}

impl Tour {
    /// Builds a collapsed tour, as it looks when it first enters the state.
    pub fn new(
        id: impl Into<TourId>,
        name: impl Into<String>,
        info: impl Into<String>,
        image: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            info: info.into(),
            image: image.into(),
            price: price.into(),
            show_full_description: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded(Vec<Tour>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    load: LoadState,
    fetch_requested: bool,
    unmounted: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self) -> &LoadState {
        &self.load
    }

    /// Tours currently displayed; empty unless loaded.
    pub fn tours(&self) -> &[Tour] {
        match &self.load {
            LoadState::Loaded(tours) => tours,
            LoadState::Loading | LoadState::Failed(_) => &[],
        }
    }

    pub fn is_unmounted(&self) -> bool {
        self.unmounted
    }

    /// Returns whether the state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Marks the fetch as requested. Returns `false` if it already was, or if
    /// the gallery has been torn down.
    pub(crate) fn request_fetch(&mut self) -> bool {
        if self.fetch_requested || self.unmounted {
            return false;
        }
        self.fetch_requested = true;
        true
    }

    /// Returns `true` when a fetch may still be in flight.
    pub(crate) fn unmount(&mut self) -> bool {
        if self.unmounted {
            return false;
        }
        self.unmounted = true;
        self.fetch_requested && self.load == LoadState::Loading
    }

    fn accepts_fetch_result(&self) -> bool {
        self.fetch_requested && !self.unmounted && self.load == LoadState::Loading
    }

    pub(crate) fn apply_loaded(&mut self, tours: Vec<Tour>) {
        if !self.accepts_fetch_result() {
            tours_debug!("Ignoring tour list delivered outside of loading");
            return;
        }
        self.load = LoadState::Loaded(dedupe_by_id(tours));
        self.dirty = true;
    }

    pub(crate) fn apply_failed(&mut self, message: String) {
        if !self.accepts_fetch_result() {
            tours_debug!("Ignoring fetch failure delivered outside of loading");
            return;
        }
        self.load = LoadState::Failed(message);
        self.dirty = true;
    }

    pub(crate) fn remove_tour(&mut self, id: &TourId) -> bool {
        let LoadState::Loaded(tours) = &mut self.load else {
            return false;
        };
        let before = tours.len();
        tours.retain(|tour| &tour.id != id);
        let removed = tours.len() != before;
        self.dirty |= removed;
        removed
    }

    pub(crate) fn toggle_description(&mut self, id: &TourId) -> bool {
        let LoadState::Loaded(tours) = &mut self.load else {
            return false;
        };
        match tours.iter_mut().find(|tour| &tour.id == id) {
            Some(tour) => {
                tour.show_full_description = !tour.show_full_description;
                self.dirty = true;
                true
            }
            None => false,
        }
    }
}

/// Keeps the first record for every id.
fn dedupe_by_id(tours: Vec<Tour>) -> Vec<Tour> {
    let mut seen = HashSet::with_capacity(tours.len());
    let total = tours.len();
    let unique: Vec<Tour> = tours
        .into_iter()
        .filter(|tour| seen.insert(tour.id.clone()))
        .collect();
    if unique.len() != total {
        tours_warn!(
            "Dropped {} tour(s) with duplicate ids",
            total - unique.len()
        );
    }
    unique
}
