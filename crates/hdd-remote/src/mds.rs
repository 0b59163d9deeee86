//! HEAL metadata service (MDS) client.
//!
//! Two lookups are used:
//! - `GET {base}/metadata/{hdp_id}` returns one study record
//! - `GET {base}/metadata?data=True&offset=0&nih_reporter.appl_id={appl_id}`
//!   returns every study record under an award, keyed by GUID

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::error::RemoteError;
use crate::http::{build_client, check_response};

/// Source of study metadata records. [`MdsClient`] is the HTTP
/// implementation; tests substitute canned responses.
pub trait MetadataSource {
    /// Fetch the study record for `hdp_id`.
    fn study(&self, hdp_id: &str) -> impl Future<Output = Result<Value, RemoteError>> + Send;

    /// Fetch all study records linked to the award `appl_id`.
    fn studies_for_award(
        &self,
        appl_id: &str,
    ) -> impl Future<Output = Result<Value, RemoteError>> + Send;
}

pub struct MdsClient {
    http: reqwest::Client,
    base_url: String,
}

impl MdsClient {
    /// Create a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        Ok(Self {
            http: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn study_url(&self, hdp_id: &str) -> String {
        format!("{}/metadata/{}", self.base_url, urlencoding::encode(hdp_id))
    }

    fn award_url(&self, appl_id: &str) -> String {
        format!(
            "{}/metadata?data=True&offset=0&nih_reporter.appl_id={}",
            self.base_url,
            urlencoding::encode(appl_id)
        )
    }

    async fn get_json(
        &self,
        url: &str,
        kind: &'static str,
        id: &str,
    ) -> Result<Value, RemoteError> {
        tracing::info!(url, "querying metadata service");
        let resp = self.http.get(url).send().await?;
        if resp.status() == 404 {
            return Err(RemoteError::NotFound {
                kind,
                id: id.to_string(),
            });
        }
        let resp = check_response(resp).await?;
        resp.json::<Value>()
            .await
            .map_err(|e| RemoteError::Parse(format!("metadata response for '{id}': {e}")))
    }
}

impl MetadataSource for MdsClient {
    async fn study(&self, hdp_id: &str) -> Result<Value, RemoteError> {
        self.get_json(&self.study_url(hdp_id), "HDP ID", hdp_id).await
    }

    async fn studies_for_award(&self, appl_id: &str) -> Result<Value, RemoteError> {
        self.get_json(&self.award_url(appl_id), "APPL ID", appl_id).await
    }
}
