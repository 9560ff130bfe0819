use crate::{Tour, TourId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The gallery became visible.
    Mounted,
    /// The gallery is being torn down.
    Unmounted,
    /// Engine delivered the tour list.
    ToursLoaded(Vec<Tour>),
    /// Engine failed; carries the message shown to the user.
    ToursFailed(String),
    /// User clicked "Not Interested" on a card.
    RemoveTour(TourId),
    /// User clicked "Read More" / "Show Less" on a card.
    ToggleDescription(TourId),
}
