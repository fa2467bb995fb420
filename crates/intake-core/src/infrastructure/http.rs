//! HTTP lead gateway

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use std::time::Duration;

use crate::domain::inquiry::{InquiryDraft, LeadReceipt};
use crate::ports::outbound::{GatewayError, LeadGateway};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const LEAD_PATH: &str = "/api/lead";

/// Posts inquiries as JSON to `{base_url}/api/lead`
#[derive(Clone)]
pub struct HttpLeadGateway {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpLeadGateway {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, GatewayError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, GatewayError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            endpoint: lead_endpoint(base_url.as_ref()),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn lead_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), LEAD_PATH)
}

#[async_trait]
impl LeadGateway for HttpLeadGateway {
    async fn submit(&self, draft: &InquiryDraft) -> Result<LeadReceipt, GatewayError> {
        tracing::debug!(endpoint = %self.endpoint, "Posting inquiry");

        let response = self
            .http
            .post(&self.endpoint)
            .json(draft)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        decode_receipt(status, &body)
    }
}

/// Receipts ride on both success and 4xx answers; anything else that does
/// not parse is a protocol failure.
fn decode_receipt(status: StatusCode, body: &[u8]) -> Result<LeadReceipt, GatewayError> {
    match serde_json::from_slice::<LeadReceipt>(body) {
        Ok(receipt) if status.is_success() || status.is_client_error() => Ok(receipt),
        Ok(receipt) => Err(GatewayError::Rejected {
            status: status.as_u16(),
            message: receipt.message.unwrap_or_default(),
        }),
        Err(e) if status.is_success() => Err(GatewayError::Decode(e.to_string())),
        Err(_) => Err(GatewayError::Rejected {
            status: status.as_u16(),
            message: String::from_utf8_lossy(body).chars().take(200).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        assert_eq!(lead_endpoint("https://example.pl"), "https://example.pl/api/lead");
        assert_eq!(lead_endpoint("https://example.pl/"), "https://example.pl/api/lead");
    }

    #[test]
    fn test_decode_success() {
        let receipt = decode_receipt(StatusCode::OK, br#"{"ok":true}"#).unwrap();
        assert!(receipt.ok);
    }

    #[test]
    fn test_decode_client_error_keeps_receipt() {
        let receipt = decode_receipt(
            StatusCode::BAD_REQUEST,
            r#"{"ok":false,"message":"Wpisz imię i telefon."}"#.as_bytes(),
        )
        .unwrap();
        assert!(!receipt.ok);
        assert_eq!(receipt.message.as_deref(), Some("Wpisz imię i telefon."));
    }

    #[test]
    fn test_decode_server_error() {
        let err = decode_receipt(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, GatewayError::Rejected { status: 502, .. }));
    }

    #[test]
    fn test_decode_garbage_success() {
        let err = decode_receipt(StatusCode::OK, b"not json").unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let gateway =
            HttpLeadGateway::with_timeout("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = gateway.submit(&InquiryDraft::default()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }
}
