//! Postal code address lookup client.
//!
//! Talks to the zipcloud postal code API to resolve a Japanese postal code
//! into a prefecture/city/town string. This only feeds the booking form's
//! address prefill; callers treat every failure as a silent miss.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use shindan_core::booking::PostalLookup;
use shindan_core::{Result, ShindanError};

const ZIPCLOUD_ENDPOINT: &str = "https://zipcloud.ibsnet.co.jp/api/search";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct ZipcloudResponse {
    status: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    results: Option<Vec<ZipcloudEntry>>,
}

#[derive(Debug, Deserialize)]
struct ZipcloudEntry {
    #[serde(default)]
    address1: String,
    #[serde(default)]
    address2: String,
    #[serde(default)]
    address3: String,
}

/// [`PostalLookup`] backed by the zipcloud API.
pub struct ZipcloudPostalLookup {
    client: Client,
    endpoint: String,
}

impl ZipcloudPostalLookup {
    pub fn new() -> Self {
        Self::with_endpoint(ZIPCLOUD_ENDPOINT)
    }

    /// Uses a custom endpoint (for testing).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl Default for ZipcloudPostalLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostalLookup for ZipcloudPostalLookup {
    async fn lookup(&self, postal_code: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("zipcode", postal_code)])
            .send()
            .await
            .map_err(|e| ShindanError::lookup(format!("lookup request failed: {e}")))?;

        let parsed: ZipcloudResponse = response
            .json()
            .await
            .map_err(|e| ShindanError::lookup(format!("lookup response malformed: {e}")))?;

        if parsed.status != 200 {
            return Err(ShindanError::lookup(
                parsed
                    .message
                    .unwrap_or_else(|| format!("lookup service returned status {}", parsed.status)),
            ));
        }

        Ok(parsed.results.and_then(|entries| {
            entries.first().map(|entry| {
                format!("{}{}{}", entry.address1, entry.address2, entry.address3)
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_hit_response() {
        let raw = r#"{
            "status": 200,
            "message": null,
            "results": [
                {"address1": "宮城県", "address2": "大崎市", "address3": "古川"}
            ]
        }"#;
        let parsed: ZipcloudResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.status, 200);
        let entry = &parsed.results.unwrap()[0];
        assert_eq!(
            format!("{}{}{}", entry.address1, entry.address2, entry.address3),
            "宮城県大崎市古川"
        );
    }

    #[test]
    fn test_parses_miss_response() {
        let raw = r#"{"status": 200, "message": null, "results": null}"#;
        let parsed: ZipcloudResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.results.is_none());
    }

    #[test]
    fn test_parses_error_response() {
        let raw = r#"{"status": 400, "message": "パラメータ「郵便番号」の桁数が不正です。"}"#;
        let parsed: ZipcloudResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.status, 400);
        assert!(parsed.message.is_some());
    }
}
