use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::RemoteSettings;
use crate::error::RemoteError;

use super::types::{AlbumSearchResponse, RemoteAlbumResult};

const USER_AGENT: &str = concat!("roon-tagger/", env!("CARGO_PKG_VERSION"));

/// One attempt at an album search. No retries at this level.
pub trait AlbumSource: Send + Sync {
    fn fetch(&self, album_name: &str) -> Result<AlbumSearchResponse, RemoteError>;
}

/// Album search over HTTP: `GET {base_url}/{api_key}/searchalbum.php?a=<album>`.
pub struct HttpAlbumSource {
    http_client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpAlbumSource {
    pub fn new(settings: &RemoteSettings) -> Result<Self, RemoteError> {
        let http_client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: search_endpoint(&settings.base_url, &settings.api_key),
        })
    }
}

pub(super) fn search_endpoint(base_url: &str, api_key: &str) -> String {
    format!(
        "{}/{}/searchalbum.php",
        base_url.trim_end_matches('/'),
        api_key.trim_matches('/')
    )
}

impl AlbumSource for HttpAlbumSource {
    fn fetch(&self, album_name: &str) -> Result<AlbumSearchResponse, RemoteError> {
        debug!(album = %album_name, url = %self.endpoint, "querying album search");

        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("a", album_name)])
            .send()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        parse_search_body(&body)
    }
}

/// An empty body is the provider's other way of saying "no results".
pub fn parse_search_body(body: &str) -> Result<AlbumSearchResponse, RemoteError> {
    if body.trim().is_empty() {
        return Ok(AlbumSearchResponse::default());
    }
    serde_json::from_str(body).map_err(|e| RemoteError::Decode(e.to_string()))
}

/// Album lookups with a bounded, fixed-delay retry policy.
///
/// A disabled client answers "no match" without touching the network.
pub struct RemoteClient {
    source: Option<Box<dyn AlbumSource>>,
    max_retries: u32,
    retry_delay: Duration,
}

impl RemoteClient {
    pub fn from_settings(settings: &RemoteSettings) -> Result<Self, RemoteError> {
        if !settings.enabled {
            return Ok(Self::disabled());
        }
        let source = HttpAlbumSource::new(settings)?;
        Ok(Self::with_source(
            Box::new(source),
            settings.max_retries,
            Duration::from_millis(settings.retry_delay_ms),
        ))
    }

    pub fn with_source(
        source: Box<dyn AlbumSource>,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Self {
        Self {
            source: Some(source),
            max_retries,
            retry_delay,
        }
    }

    pub fn disabled() -> Self {
        Self {
            source: None,
            max_retries: 0,
            retry_delay: Duration::ZERO,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.source.is_some()
    }

    /// Search by album name.
    ///
    /// `Ok(None)` is a well-formed "no match" and is never retried. Retryable
    /// failures are attempted `1 + max_retries` times in total, sleeping
    /// `retry_delay` only between attempts.
    pub fn search_album(&self, album_name: &str) -> Result<Option<RemoteAlbumResult>, RemoteError> {
        let Some(source) = self.source.as_deref() else {
            return Ok(None);
        };

        let attempts = self.max_retries.saturating_add(1);
        let mut attempt = 1;
        let response = loop {
            match source.fetch(album_name) {
                Ok(response) => break response,
                Err(e) if e.is_retryable() && attempt < attempts => {
                    warn!(
                        album = %album_name,
                        attempt,
                        max_retries = self.max_retries,
                        error = %e,
                        "album search failed, retrying"
                    );
                    if !self.retry_delay.is_zero() {
                        thread::sleep(self.retry_delay);
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        match response.first_match() {
            Some(result) => {
                info!(album = %album_name, found = ?result.album, "album found");
                Ok(Some(result))
            }
            None => {
                warn!(album = %album_name, "no album found");
                Ok(None)
            }
        }
    }
}
