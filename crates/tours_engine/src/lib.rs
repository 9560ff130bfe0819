//! Tour gallery engine: the relay fetch and its execution off the UI thread.
mod decode;
mod engine;
mod fetch;
mod types;

pub use decode::{decode_envelope, DecodeError, RelayEnvelope, RelayStatus};
pub use engine::EngineHandle;
pub use fetch::{
    FetchSettings, Fetcher, ProgressSink, ReqwestFetcher, DEFAULT_RELAY_BASE, DEFAULT_TARGET_URL,
};
pub use types::{EngineEvent, FailureKind, FetchError, FetchStage, RecordId, TourRecord};
