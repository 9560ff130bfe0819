use std::time::Duration;

use clap::Parser;
use tours_engine::{FetchSettings, DEFAULT_RELAY_BASE, DEFAULT_TARGET_URL};

use super::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "tours_app", about = "Browse tours fetched through a CORS relay")]
pub struct Args {
    /// Relay endpoint that wraps the tours API.
    #[arg(long, default_value = DEFAULT_RELAY_BASE)]
    pub relay_url: String,
    /// Tours API, passed to the relay as its `url` parameter.
    #[arg(long, default_value = DEFAULT_TARGET_URL)]
    pub target_url: String,
    /// Give up on the request after this many seconds. Waits forever if unset.
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,
    /// Where log output goes. Anything but `file` or `off` draws over the UI.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,
}

impl Args {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            relay_base: self.relay_url.clone(),
            target_url: self.target_url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..FetchSettings::default()
        }
    }
}
