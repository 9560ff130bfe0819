use std::sync::mpsc;

use tours_core::{Effect, Msg, Tour, TourId};
use tours_engine::{EngineEvent, EngineHandle, FetchSettings, FetchStage, RecordId, TourRecord};
use tours_logging::{tours_debug, tours_info, tours_warn};

/// Executes core effects against the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(settings: FetchSettings, msg_tx: mpsc::Sender<Msg>) -> Self {
        Self {
            engine: EngineHandle::new(settings),
            msg_tx,
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchTours => {
                    tours_info!("FetchTours requested");
                    self.engine.fetch_tours();
                }
                Effect::CancelFetch => {
                    tours_info!("CancelFetch requested");
                    self.engine.cancel();
                }
            }
        }
    }

    /// Forwards every pending engine event into the message inbox.
    pub fn pump(&self) {
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = map_event(event) {
                let _ = self.msg_tx.send(msg);
            }
        }
    }
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::Progress(stage) => {
            match stage {
                FetchStage::Requesting => tours_debug!("Fetch stage: requesting"),
                FetchStage::Downloading { bytes } => {
                    tours_debug!("Fetch stage: downloading ({} bytes)", bytes)
                }
                FetchStage::Decoding => tours_debug!("Fetch stage: decoding"),
            }
            None
        }
        EngineEvent::ToursFetched(Ok(records)) => Some(Msg::ToursLoaded(
            records.into_iter().map(map_record).collect(),
        )),
        EngineEvent::ToursFetched(Err(err)) => {
            tours_warn!("Tours unavailable: {}", err);
            Some(Msg::ToursFailed(err.message))
        }
    }
}

fn map_record(record: TourRecord) -> Tour {
    Tour {
        id: map_id(record.id),
        name: record.name,
        info: record.info,
        image: record.image,
        price: record.price,
        show_full_description: false,
    }
}

fn map_id(id: RecordId) -> TourId {
    match id {
        RecordId::Number(n) => TourId::Number(n.to_string()),
        RecordId::Text(s) => TourId::Text(s),
    }
}
