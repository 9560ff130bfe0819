use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tours_logging::tours_info;

use crate::fetch::{ChannelProgressSink, FetchSettings, Fetcher, ReqwestFetcher};
use crate::EngineEvent;

enum EngineCommand {
    FetchTours,
}

/// Runs fetches on a background tokio runtime and reports back over a channel.
///
/// Dropping the handle cancels any in-flight fetch; a cancelled fetch never
/// emits `EngineEvent::ToursFetched`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    cancel: CancellationToken,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Self {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(settings)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = CancellationToken::new();
        let worker_cancel = cancel.clone();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                let cancel = worker_cancel.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), command, event_tx, cancel).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx,
            cancel,
        }
    }

    pub fn fetch_tours(&self) {
        let _ = self.cmd_tx.send(EngineCommand::FetchTours);
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
    cancel: CancellationToken,
) {
    match command {
        EngineCommand::FetchTours => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            tokio::select! {
                _ = cancel.cancelled() => {
                    tours_info!("Tour fetch cancelled");
                }
                result = fetcher.fetch_tours(&sink) => {
                    if cancel.is_cancelled() {
                        return;
                    }
                    match &result {
                        Ok(tours) => tours_info!("Fetched {} tours", tours.len()),
                        Err(err) => tours_info!("Tour fetch failed: {}", err),
                    }
                    let _ = event_tx.send(EngineEvent::ToursFetched(result));
                }
            }
        }
    }
}
