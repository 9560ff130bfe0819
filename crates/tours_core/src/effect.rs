/// Side effects requested by [`crate::update`]; executed by the app's effect runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the one-shot tours request.
    FetchTours,
    /// Drop any in-flight request; its result must never reach the state.
    CancelFetch,
}
