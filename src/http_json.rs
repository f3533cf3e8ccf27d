// ABOUTME: Pull-based state provider fetching JSON over HTTP on every read
// ABOUTME: Display text comes from a declarative extractor applied to the response body
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{BridgeError, StateProvider};

/// Display text when a now-playing source reports no active media
const NOTHING_PLAYING: &str = "nothing is playing right now";

/// Declarative extraction of display text from a JSON response
///
/// A closed set of named strategies rather than arbitrary closures, so the
/// extraction is part of the validated configuration and serializes with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Extractor {
    /// Resolve a JSON pointer (RFC 6901) against the body
    ///
    /// A missing path yields `fallback` when configured, otherwise an error.
    JsonPointer {
        /// Pointer into the response body, e.g. `/media/title`
        pointer: String,
        /// Text substituted when the pointer resolves to nothing
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback: Option<String>,
    },
    /// Render `media.artist` and `media.title` as `"artist - title"`
    ///
    /// Yields a fixed nothing-playing sentence when album, artist, and title
    /// are all absent or the literal `"N/A"`.
    NowPlaying,
}

impl Extractor {
    /// Apply the extraction to a parsed response body
    fn apply(&self, body: &Value) -> Result<String, BridgeError> {
        match self {
            Self::JsonPointer { pointer, fallback } => match body.pointer(pointer) {
                Some(Value::String(text)) => Ok(text.clone()),
                Some(value) => Ok(value.to_string()),
                None => fallback.clone().ok_or_else(|| {
                    BridgeError::external_service(
                        "http-json",
                        format!("No value at pointer '{pointer}'"),
                    )
                }),
            },
            Self::NowPlaying => {
                let field = |name: &str| match body.pointer(&format!("/media/{name}")) {
                    Some(Value::String(text)) if !text.is_empty() && text != "N/A" => {
                        Some(text.clone())
                    }
                    _ => None,
                };

                let album = field("album");
                let artist = field("artist");
                let title = field("title");
                if album.is_none() && artist.is_none() && title.is_none() {
                    return Ok(NOTHING_PLAYING.to_owned());
                }
                Ok(format!(
                    "{} - {}",
                    artist.unwrap_or_default(),
                    title.unwrap_or_default()
                ))
            }
        }
    }
}

/// State provider that fetches a URL and extracts display text from JSON
///
/// Every [`get_value`](StateProvider::get_value) call issues a fresh GET;
/// network and parse errors propagate to the caller, which the dispatcher
/// recovers as "not available".
pub struct HttpJsonStateProvider {
    name: String,
    description: String,
    url: String,
    extractor: Extractor,
    http: reqwest::Client,
}

impl HttpJsonStateProvider {
    /// Create a provider for `url` with the given extractor
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        extractor: Extractor,
        http: reqwest::Client,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            extractor,
            http,
        }
    }

    /// Create a provider rendering a YNCA receiver's now-playing media
    pub fn now_playing(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        http: reqwest::Client,
    ) -> Self {
        Self::new(name, description, url, Extractor::NowPlaying, http)
    }
}

#[async_trait]
impl StateProvider for HttpJsonStateProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn get_value(&self) -> Result<String, BridgeError> {
        let body: Value = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| BridgeError::external_service("http-json", e.to_string()))?
            .json()
            .await
            .map_err(|e| BridgeError::external_service("http-json", e.to_string()))?;
        self.extractor.apply(&body)
    }
}
