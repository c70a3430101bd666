//! Request adapter for the LabSeq service.
//!
//! Wraps a [`Transport`] with one bounded, sequential retry and folds every
//! failure into a [`FetchError`] whose message is fit to show a user.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::sleep;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::{API, ClientConfig, sequence_path};
use crate::data::transport::{HttpReply, Transport, TransportError};
use crate::domain::SequenceResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// No response at all
    Network,
    /// Non-2xx response
    Remote { status: u16 },
    /// 2xx response whose body was not the expected JSON
    Decode,
}

/// The only failure shape that leaves the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    fn network(err: TransportError) -> Self {
        Self {
            kind: FetchErrorKind::Network,
            message: format!("Error: {}", err),
        }
    }

    /// Prefer the server's own `message`; otherwise synthesize one from the status.
    fn remote(reply: &HttpReply) -> Self {
        let server_message = serde_json::from_str::<ErrorBody>(&reply.body)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty());

        let message = server_message.unwrap_or_else(|| {
            let reason = reqwest::StatusCode::from_u16(reply.status)
                .ok()
                .and_then(|status| status.canonical_reason())
                .unwrap_or("Unknown Error");
            format!("Error Code: {}\nMessage: {}", reply.status, reason)
        });

        Self {
            kind: FetchErrorKind::Remote {
                status: reply.status,
            },
            message,
        }
    }

    fn decode(err: serde_json::Error) -> Self {
        Self {
            kind: FetchErrorKind::Decode,
            message: format!("Error: invalid response body: {}", err),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self.kind {
            FetchErrorKind::Remote { status } => Some(status),
            _ => None,
        }
    }
}

/// Error payload the service attaches to non-2xx replies, e.g.
/// `{"error":"Invalid Index","message":"...","status":400}`.
#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: Option<String>,
}

/// Wire shape of a lookup reply. Older service builds emit `n`, `digits` and
/// `calculationTime`; a missing digit count falls back to the value length.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SequenceReply {
    #[serde(alias = "n")]
    index: u64,
    value: String,
    #[serde(default, alias = "digits")]
    digit_count: Option<usize>,
    #[serde(default, alias = "calculationTimeMs", alias = "calculationTime")]
    compute_time_ms: f64,
    #[serde(default)]
    from_cache: bool,
}

impl From<SequenceReply> for SequenceResult {
    fn from(reply: SequenceReply) -> Self {
        SequenceResult {
            index: reply.index,
            digit_count: reply.digit_count.unwrap_or(reply.value.len()),
            value: reply.value,
            compute_time_ms: reply.compute_time_ms.max(0.0),
            from_cache: reply.from_cache,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("UP")
    }
}

pub struct LabSeqClient<T: Transport> {
    transport: T,
    retries: u32,
    backoff: Duration,
}

impl<T: Transport> LabSeqClient<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            retries: config.retries,
            backoff: Duration::from_millis(config.backoff_ms),
        }
    }

    /// Adapter with the default policy: one immediate retry.
    pub fn with_defaults(transport: T) -> Self {
        Self {
            transport,
            retries: API.client.retries,
            backoff: Duration::from_millis(API.client.backoff_ms),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Look up one sequence value. Any failure is retried (sequentially, never
    /// in parallel) up to the configured count; the last failure is returned.
    pub async fn fetch_result(&self, index: u64) -> Result<SequenceResult, FetchError> {
        let path = sequence_path(index);
        let attempts = self.retries.saturating_add(1);
        let mut attempt = 1;

        loop {
            match self.get_json::<SequenceReply>(&path).await {
                Ok(reply) => return Ok(reply.into()),
                Err(e) if attempt < attempts => {
                    log::warn!(
                        "LabSeq({}) attempt {}/{} via {} failed: {}",
                        index,
                        attempt,
                        attempts,
                        self.transport.signature(),
                        e.message.replace('\n', " ")
                    );
                    if !self.backoff.is_zero() {
                        sleep(self.backoff).await;
                    }
                    attempt += 1;
                }
                Err(e) => {
                    log::error!(
                        "LabSeq({}) failed after {} attempt(s): {}",
                        index,
                        attempt,
                        e.message.replace('\n', " ")
                    );
                    return Err(e);
                }
            }
        }
    }

    /// Single probe of the health endpoint, no retry.
    pub async fn check_health(&self) -> Result<HealthStatus, FetchError> {
        self.get_json::<HealthStatus>(API.endpoints.health).await
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, FetchError> {
        let reply = self
            .transport
            .get(path)
            .await
            .map_err(FetchError::network)?;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_requests {
            log::info!("GET {} -> {} ({} bytes)", path, reply.status, reply.body.len());
        }

        if !reply.is_success() {
            return Err(FetchError::remote(&reply));
        }
        serde_json::from_str(&reply.body).map_err(FetchError::decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::transport::scripted::ScriptedTransport;

    const ZERO: &str = r#"{"index":0,"value":"0","digitCount":1,"computeTimeMs":1,"fromCache":false}"#;

    fn down() -> Result<HttpReply, TransportError> {
        Err(TransportError("connection refused".to_string()))
    }

    fn reply(status: u16, body: &str) -> Result<HttpReply, TransportError> {
        Ok(HttpReply::new(status, body))
    }

    #[tokio::test]
    async fn success_on_first_attempt_sends_one_request() {
        let client = LabSeqClient::with_defaults(ScriptedTransport::new([reply(200, ZERO)]));

        let result = client.fetch_result(0).await.unwrap();

        assert_eq!(result, SequenceResult::new(0, "0", 1.0, false));
        assert_eq!(client.transport().requests(), vec!["/labseq/0"]);
    }

    #[tokio::test]
    async fn network_failure_then_success_is_invisible_to_caller() {
        let client =
            LabSeqClient::with_defaults(ScriptedTransport::new([down(), reply(200, ZERO)]));

        let result = client.fetch_result(0).await;

        assert!(result.is_ok());
        assert_eq!(client.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn two_bare_500s_surface_status_code() {
        let client = LabSeqClient::with_defaults(ScriptedTransport::new([
            reply(500, ""),
            reply(500, ""),
            reply(200, ZERO),
        ]));

        let err = client.fetch_result(7).await.unwrap_err();

        assert!(err.message.contains("500"));
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.message, "Error Code: 500\nMessage: Internal Server Error");
        // Exactly one retry, the third scripted reply is never requested
        assert_eq!(client.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn server_message_is_surfaced_verbatim() {
        let body = r#"{"error":"Invalid Index","message":"Index must be non-negative","status":400}"#;
        let client = LabSeqClient::with_defaults(ScriptedTransport::new([
            reply(400, body),
            reply(400, body),
        ]));

        let err = client.fetch_result(3).await.unwrap_err();

        assert_eq!(err.message, "Index must be non-negative");
        assert_eq!(err.kind, FetchErrorKind::Remote { status: 400 });
    }

    #[tokio::test]
    async fn persistent_network_failure_is_prefixed_as_client_side() {
        let client = LabSeqClient::with_defaults(ScriptedTransport::new([down(), down()]));

        let err = client.fetch_result(1).await.unwrap_err();

        assert_eq!(err.kind, FetchErrorKind::Network);
        assert_eq!(err.message, "Error: connection refused");
    }

    #[tokio::test]
    async fn malformed_success_body_is_retried_then_normalized() {
        let client = LabSeqClient::with_defaults(ScriptedTransport::new([
            reply(200, "<html>"),
            reply(200, "{}"),
        ]));

        let err = client.fetch_result(1).await.unwrap_err();

        assert_eq!(err.kind, FetchErrorKind::Decode);
        assert!(err.message.starts_with("Error: invalid response body"));
        assert_eq!(client.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn retry_count_is_configurable() {
        let config = ClientConfig::default().with_retries(0);
        let client = LabSeqClient::new(ScriptedTransport::new([down(), reply(200, ZERO)]), &config);

        assert!(client.fetch_result(0).await.is_err());
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn legacy_reply_without_digit_count_uses_value_length() {
        let body = r#"{"n":12,"value":"12345","calculationTime":3,"fromCache":true}"#;
        let client = LabSeqClient::with_defaults(ScriptedTransport::new([reply(200, body)]));

        let result = client.fetch_result(12).await.unwrap();

        assert_eq!(result.index, 12);
        assert_eq!(result.digit_count, 5);
        assert_eq!(result.compute_time_ms, 3.0);
        assert!(result.from_cache);
    }

    #[tokio::test]
    async fn fractional_compute_time_is_accepted() {
        let body = r#"{"index":3,"value":"1","digitCount":1,"computeTimeMs":12.5,"fromCache":false}"#;
        let client = LabSeqClient::with_defaults(ScriptedTransport::new([reply(200, body)]));

        let result = client.fetch_result(3).await.unwrap();

        assert_eq!(result.compute_time_ms, 12.5);
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn negative_compute_time_is_clamped_to_zero() {
        let body = r#"{"index":3,"value":"1","digitCount":1,"computeTimeMs":-4,"fromCache":false}"#;
        let client = LabSeqClient::with_defaults(ScriptedTransport::new([reply(200, body)]));

        assert_eq!(client.fetch_result(3).await.unwrap().compute_time_ms, 0.0);
    }

    #[tokio::test]
    async fn maximum_retry_count_does_not_overflow() {
        let config = ClientConfig::default().with_retries(u32::MAX);
        let client = LabSeqClient::new(ScriptedTransport::new([down(), reply(200, ZERO)]), &config);

        let result = client.fetch_result(0).await;

        assert!(result.is_ok());
        assert_eq!(client.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn health_is_probed_once_without_retry() {
        let client = LabSeqClient::with_defaults(ScriptedTransport::new([
            down(),
            reply(200, r#"{"status":"UP","service":"LabSeq API"}"#),
        ]));

        assert!(client.check_health().await.is_err());
        let health = client.check_health().await.unwrap();

        assert!(health.is_up());
        assert_eq!(health.service, "LabSeq API");
        assert_eq!(
            client.transport().requests(),
            vec!["/labseq/health", "/labseq/health"]
        );
    }
}
