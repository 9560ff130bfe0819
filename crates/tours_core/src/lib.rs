//! Tour gallery core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, LoadState, Tour, TourId};
pub use update::update;
pub use view_model::{
    CardView, GalleryView, DESCRIPTION_PREVIEW_CHARS, ELLIPSIS, LOADING_TEXT, REMOVE_LABEL,
    TOGGLE_COLLAPSE_LABEL, TOGGLE_EXPAND_LABEL,
};
