use std::time::Duration;

use futures_util::StreamExt;
use tours_logging::{tours_debug, tours_warn};
use url::Url;

use crate::decode::decode_envelope;
use crate::types::HTTP_STATUS_MESSAGE;
use crate::{EngineEvent, FailureKind, FetchError, FetchStage, TourRecord};

pub const DEFAULT_RELAY_BASE: &str = "https://api.allorigins.win/get";
pub const DEFAULT_TARGET_URL: &str = "https://course-api.com/react-tours-project";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Relay endpoint; the target goes into its `url` query parameter.
    pub relay_base: String,
    pub target_url: String,
    /// `None` waits for the transport indefinitely.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            relay_base: DEFAULT_RELAY_BASE.to_string(),
            target_url: DEFAULT_TARGET_URL.to_string(),
            connect_timeout: None,
            request_timeout: None,
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl FetchSettings {
    /// Full request URL with the target percent-encoded as `url=`.
    ///
    /// Encoding is `application/x-www-form-urlencoded`: a space in the target
    /// becomes `+`, not `%20`. Everything else matches `encodeURIComponent`.
    pub fn relay_url(&self) -> Result<Url, FetchError> {
        let mut relay = Url::parse(&self.relay_base)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        relay
            .query_pairs_mut()
            .append_pair("url", &self.target_url);
        Ok(relay)
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub(crate) struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub(crate) fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Source of the tour list. The relay envelope never leaks past this seam.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_tours(&self, sink: &dyn ProgressSink) -> Result<Vec<TourRecord>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(self.settings.redirect_limit));
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch_tours(&self, sink: &dyn ProgressSink) -> Result<Vec<TourRecord>, FetchError> {
        let url = self.settings.relay_url()?;
        let client = self.build_client()?;

        tours_debug!("Requesting tours via {}", url);
        sink.emit(EngineEvent::Progress(FetchStage::Requesting));

        let response = client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            tours_warn!("Tours relay answered {}", status);
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                HTTP_STATUS_MESSAGE,
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        sink.emit(EngineEvent::Progress(FetchStage::Downloading { bytes: 0 }));

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
            sink.emit(EngineEvent::Progress(FetchStage::Downloading {
                bytes: bytes.len() as u64,
            }));
        }

        sink.emit(EngineEvent::Progress(FetchStage::Decoding));
        let (tours, relay_status) = decode_envelope(&bytes).map_err(|err| {
            tours_warn!("Tours payload rejected: {}", err);
            FetchError::new(FailureKind::Parse, err.to_string())
        })?;

        if let Some(code) = relay_status.and_then(|status| status.http_code) {
            tours_debug!("Relay reported upstream status {}", code);
        }

        Ok(tours)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_relay_url_encodes_target() {
        let url = FetchSettings::default().relay_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.allorigins.win/get?url=https%3A%2F%2Fcourse-api.com%2Freact-tours-project"
        );
    }

    #[test]
    fn target_is_form_encoded() {
        let settings = FetchSettings {
            relay_base: "http://relay.test/get".to_string(),
            target_url: "https://tours.test/search?q=new york&sort=price".to_string(),
            ..FetchSettings::default()
        };
        let url = settings.relay_url().unwrap();
        assert_eq!(
            url.as_str(),
            "http://relay.test/get?url=https%3A%2F%2Ftours.test%2Fsearch%3Fq%3Dnew+york%26sort%3Dprice"
        );
        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            decoded,
            vec![(
                "url".to_string(),
                "https://tours.test/search?q=new york&sort=price".to_string()
            )]
        );
    }

    #[test]
    fn invalid_relay_base_is_rejected() {
        let settings = FetchSettings {
            relay_base: "not a url".to_string(),
            ..FetchSettings::default()
        };
        let err = settings.relay_url().unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn defaults_apply_no_timeouts() {
        let settings = FetchSettings::default();
        assert!(settings.connect_timeout.is_none());
        assert!(settings.request_timeout.is_none());
    }
}
