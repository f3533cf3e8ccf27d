// ABOUTME: Polled state provider summarizing a Moonraker 3D-printer status as one sentence
// ABOUTME: Maps the nested printer/job state machine to fixed human-readable text, never failing
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::types::{BridgeError, StateProvider};

/// Per-call timeout for both Moonraker requests
const CALL_TIMEOUT: Duration = Duration::from_millis(500);

const UNAVAILABLE: &str = "machine is unavailable";
const ERROR_STATE: &str = "machine is in error state";

/// Response of `GET /printer/info`
#[derive(Debug, Deserialize)]
struct InfoResponse {
    error: Option<Value>,
    result: Option<InfoResult>,
}

#[derive(Debug, Deserialize)]
struct InfoResult {
    state: String,
}

/// Response of `POST /printer/objects/query`
#[derive(Debug, Deserialize)]
struct QueryResponse {
    error: Option<Value>,
    result: Option<QueryResult>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    status: PrinterObjects,
}

#[derive(Debug, Deserialize)]
struct PrinterObjects {
    virtual_sdcard: VirtualSdcard,
    print_stats: PrintStats,
}

#[derive(Debug, Deserialize)]
struct VirtualSdcard {
    /// Job completion in `[0, 1]`
    progress: f64,
}

#[derive(Debug, Deserialize)]
struct PrintStats {
    filename: String,
    state: String,
}

/// Sentence for a job state within the top-level `ready` state
fn job_sentence(stats: &PrintStats, progress: f64) -> String {
    match stats.state.as_str() {
        "standby" => "machine is ready and in standby".to_owned(),
        "printing" => format!(
            "machine is ready and working and is in progress of {}% for job '{}'",
            (progress * 100.0).round(),
            stats.filename
        ),
        "paused" => format!("machine is ready and on pause for job '{}'", stats.filename),
        "complete" => format!(
            "machine is ready and last job '{}' was completed successfully",
            stats.filename
        ),
        "error" => "machine is ready but in error state".to_owned(),
        "cancelled" => format!(
            "machine is ready and last job '{}' was cancelled",
            stats.filename
        ),
        _ => "machine is ready but in unknown state".to_owned(),
    }
}

/// State provider polling a Moonraker instance
///
/// Issues two sequential timed calls per read: `/printer/info` for the
/// top-level state, then — only when the printer is `ready` — an objects
/// query for `virtual_sdcard` and `print_stats`. Every outcome, including an
/// unreachable host, maps to a fixed sentence; the provider never returns
/// `Err`.
pub struct MoonrakerStateProvider {
    name: String,
    description: String,
    base_url: String,
    http: reqwest::Client,
}

impl MoonrakerStateProvider {
    /// Create a provider for the Moonraker instance at `base_url`
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        base_url: impl Into<String>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            base_url: base_url.into(),
            http,
        }
    }

    async fn printer_info(&self) -> Result<InfoResponse, BridgeError> {
        self.http
            .get(format!("{}/printer/info", self.base_url))
            .timeout(CALL_TIMEOUT)
            .send()
            .await
            .map_err(|e| BridgeError::external_service("moonraker", e.to_string()))?
            .json()
            .await
            .map_err(|e| BridgeError::external_service("moonraker", e.to_string()))
    }

    async fn job_status(&self) -> Result<QueryResponse, BridgeError> {
        self.http
            .post(format!("{}/printer/objects/query", self.base_url))
            .timeout(CALL_TIMEOUT)
            .json(&json!({
                "objects": {
                    "virtual_sdcard": null,
                    "print_stats": null
                }
            }))
            .send()
            .await
            .map_err(|e| BridgeError::external_service("moonraker", e.to_string()))?
            .json()
            .await
            .map_err(|e| BridgeError::external_service("moonraker", e.to_string()))
    }
}

#[async_trait]
impl StateProvider for MoonrakerStateProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn get_value(&self) -> Result<String, BridgeError> {
        let info = match self.printer_info().await {
            Ok(info) => info,
            Err(e) => {
                debug!(provider = %self.name, error = %e, "Moonraker info call failed");
                return Ok(UNAVAILABLE.to_owned());
            }
        };

        if info.error.is_some() {
            return Ok(ERROR_STATE.to_owned());
        }

        let state = info.result.map(|r| r.state).unwrap_or_default();
        let sentence = match state.as_str() {
            "starting" => "machine starting".to_owned(),
            "ready" => {
                let status = match self.job_status().await {
                    Ok(status) => status,
                    Err(e) => {
                        debug!(provider = %self.name, error = %e, "Moonraker query call failed");
                        return Ok(UNAVAILABLE.to_owned());
                    }
                };
                if status.error.is_some() {
                    return Ok(ERROR_STATE.to_owned());
                }
                match status.result {
                    Some(result) => job_sentence(
                        &result.status.print_stats,
                        result.status.virtual_sdcard.progress,
                    ),
                    None => "machine is ready but in unknown state".to_owned(),
                }
            }
            "error" => ERROR_STATE.to_owned(),
            "shutdown" => "machine is powered off".to_owned(),
            _ => "machine is in unknown state".to_owned(),
        };
        Ok(sentence)
    }
}
