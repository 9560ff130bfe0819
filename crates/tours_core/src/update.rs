use tours_logging::tours_debug;

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            if state.request_fetch() {
                vec![Effect::FetchTours]
            } else {
                Vec::new()
            }
        }
        Msg::Unmounted => {
            if state.unmount() {
                vec![Effect::CancelFetch]
            } else {
                Vec::new()
            }
        }
        Msg::ToursLoaded(tours) => {
            state.apply_loaded(tours);
            Vec::new()
        }
        Msg::ToursFailed(message) => {
            state.apply_failed(message);
            Vec::new()
        }
        Msg::RemoveTour(id) => {
            if !state.remove_tour(&id) {
                tours_debug!("RemoveTour ignored for unknown id {}", id);
            }
            Vec::new()
        }
        Msg::ToggleDescription(id) => {
            if !state.toggle_description(&id) {
                tours_debug!("ToggleDescription ignored for unknown id {}", id);
            }
            Vec::new()
        }
    };

    (state, effects)
}
