use std::sync::Once;

use pretty_assertions::assert_eq;
use tours_core::{update, AppState, Effect, GalleryView, LoadState, Msg, Tour};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tours_logging::initialize_for_tests);
}

fn mounted() -> AppState {
    let (state, effects) = update(AppState::new(), Msg::Mounted);
    assert_eq!(effects, vec![Effect::FetchTours]);
    state
}

#[test]
fn loading_is_shown_until_fetch_resolves() {
    init_logging();
    let state = mounted();

    assert_eq!(
        state.view(),
        GalleryView::Loading {
            text: "Loading tours...".to_string()
        }
    );
    assert!(state.view().cards().is_empty());
}

#[test]
fn fetch_is_requested_once_per_mount() {
    init_logging();
    let state = mounted();

    let (state, effects) = update(state, Msg::Mounted);
    assert!(effects.is_empty());
    assert_eq!(state.load(), &LoadState::Loading);
}

#[test]
fn loaded_tours_render_as_cards() {
    init_logging();
    let state = mounted();
    let tours = vec![Tour::new(1, "A", "x", "u", "10")];

    let (mut state, effects) = update(state, Msg::ToursLoaded(tours));
    assert!(effects.is_empty());
    assert!(state.consume_dirty());

    let view = state.view();
    let cards = view.cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "A");
    assert_eq!(cards[0].price_label, "$10");
    assert_eq!(cards[0].image, "u");
    assert_eq!(cards[0].description, "x...");
    assert_eq!(cards[0].toggle_label, "Read More");
    assert_eq!(cards[0].remove_label, "Not Interested");
}

#[test]
fn failure_renders_only_the_error() {
    init_logging();
    let state = mounted();

    let (state, _) = update(
        state,
        Msg::ToursFailed("Failed to fetch tours.".to_string()),
    );

    assert_eq!(
        state.view(),
        GalleryView::Error {
            text: "Error: Failed to fetch tours.".to_string()
        }
    );
    assert!(state.view().cards().is_empty());
}

#[test]
fn outcome_is_terminal() {
    init_logging();
    let state = mounted();
    let (state, _) = update(state, Msg::ToursFailed("boom".to_string()));

    let (mut state, _) = update(
        state,
        Msg::ToursLoaded(vec![Tour::new(1, "A", "x", "u", "10")]),
    );
    assert_eq!(state.load(), &LoadState::Failed("boom".to_string()));
    state.consume_dirty();

    let (mut state, effects) = update(state, Msg::Mounted);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn unmount_during_fetch_cancels_and_ignores_late_result() {
    init_logging();
    let state = mounted();

    let (state, effects) = update(state, Msg::Unmounted);
    assert_eq!(effects, vec![Effect::CancelFetch]);
    assert!(state.is_unmounted());

    let (mut state, _) = update(
        state,
        Msg::ToursLoaded(vec![Tour::new(1, "A", "x", "u", "10")]),
    );
    assert_eq!(state.load(), &LoadState::Loading);
    assert!(!state.consume_dirty());

    let (_state, effects) = update(state, Msg::Unmounted);
    assert!(effects.is_empty());
}

#[test]
fn unmount_after_load_needs_no_cancel() {
    init_logging();
    let state = mounted();
    let (state, _) = update(state, Msg::ToursLoaded(Vec::new()));

    let (state, effects) = update(state, Msg::Unmounted);
    assert!(effects.is_empty());

    let (_state, effects) = update(state, Msg::Mounted);
    assert!(effects.is_empty());
}

#[test]
fn result_before_mount_is_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::ToursFailed("early".to_string()));

    assert_eq!(state.load(), &LoadState::Loading);
}

#[test]
fn empty_list_renders_zero_cards() {
    init_logging();
    let state = mounted();
    let (state, _) = update(state, Msg::ToursLoaded(Vec::new()));

    assert_eq!(state.view(), GalleryView::Cards(Vec::new()));
}
