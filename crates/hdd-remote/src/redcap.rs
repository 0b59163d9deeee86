//! REDCap data-dictionary validation.
//!
//! Importing a dictionary through the REDCap API (`content=metadata`) is the
//! authoritative compliance check: REDCap answers 200 with the number of
//! imported fields, or an error body listing every problem on its own line.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::error::RemoteError;
use crate::http::build_client;

pub struct RedcapClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

/// Outcome of a validation import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedcapReport {
    pub status: u16,
    pub compliant: bool,
    /// Response body on success (REDCap returns the imported field count).
    pub imported: Option<Value>,
    pub errors: Vec<String>,
}

impl RedcapReport {
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 200 {
            let imported = serde_json::from_str(body)
                .unwrap_or_else(|_| Value::String(body.trim().to_string()));
            return Self {
                status,
                compliant: true,
                imported: Some(imported),
                errors: Vec::new(),
            };
        }

        let errors = match serde_json::from_str::<Value>(body) {
            Ok(json) => match json.get("error").and_then(Value::as_str) {
                Some(message) if !message.trim().is_empty() => message
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect(),
                _ => vec![format!("HTTP {status} - {}", body.trim())],
            },
            Err(_) => vec![format!("HTTP {status} - unable to parse response")],
        };

        Self {
            status,
            compliant: false,
            imported: None,
            errors,
        }
    }
}

impl RedcapClient {
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the HTTP client cannot be built.
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> Result<Self, RemoteError> {
        Ok(Self {
            http: build_client(timeout)?,
            api_url: api_url.to_string(),
            token: token.to_string(),
        })
    }

    /// Submit `dictionary_csv` for import and report whether REDCap accepts it.
    ///
    /// A rejection is a successful call with `compliant == false`; only
    /// transport failures are errors.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] on transport failure.
    pub async fn validate(&self, dictionary_csv: &str) -> Result<RedcapReport, RemoteError> {
        let body = form_body(&[
            ("token", self.token.as_str()),
            ("content", "metadata"),
            ("format", "csv"),
            ("data", dictionary_csv),
            ("returnFormat", "json"),
        ]);

        let resp = self
            .http
            .post(&self.api_url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        tracing::debug!(status, "REDCap validation response");
        Ok(RedcapReport::from_response(status, &text))
    }
}

fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
