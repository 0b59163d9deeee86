//! Identity resolution: project → HDP ID → APPL ID (+ project title).
//!
//! One study record is fetched per run; it supplies both the APPL ID (when
//! the caller did not pass one) and the project title. When the caller
//! already has both, no request is made.

use hdd_core::StudyIdentity;

use crate::error::RemoteError;
use crate::lookup;
use crate::mds::MetadataSource;

/// Caller-supplied identity inputs.
#[derive(Debug, Clone, Default)]
pub struct IdentityRequest<'a> {
    pub hdp_id: &'a str,
    pub appl_id: Option<&'a str>,
    pub project: Option<&'a str>,
    pub project_title: Option<&'a str>,
    pub project_type: Option<&'a str>,
}

/// Resolve the full study identity.
///
/// The returned identity has an empty `project_title` when neither the
/// caller nor the metadata record provides one; the caller decides whether
/// to prompt or fail.
///
/// # Errors
///
/// Returns [`RemoteError::MissingKey`] if no APPL ID was given and the record
/// has none, or any transport/API error from the metadata source.
pub async fn resolve_identity<S: MetadataSource>(
    source: &S,
    request: &IdentityRequest<'_>,
) -> Result<StudyIdentity, RemoteError> {
    let given_appl_id = non_empty(request.appl_id);
    let given_title = non_empty(request.project_title);

    let mut identity = StudyIdentity::new(request.hdp_id, request.project)
        .with_appl_id(given_appl_id.map(str::to_string));
    if let Some(project_type) = non_empty(request.project_type) {
        identity = identity.with_project_type(project_type);
    }

    if let (Some(_), Some(title)) = (given_appl_id, given_title) {
        tracing::debug!("APPL ID and title given; skipping metadata lookup");
        return Ok(identity.with_title(title));
    }

    let record = source.study(request.hdp_id).await?;

    if identity.appl_id.is_none() {
        let appl_id = lookup::find_id(&record, "appl_id").ok_or_else(|| RemoteError::MissingKey {
            key: "appl_id",
            id: request.hdp_id.to_string(),
        })?;
        tracing::info!(%appl_id, "found appl_id");
        identity.appl_id = Some(appl_id);
    }

    let title = given_title
        .map(str::to_string)
        .or_else(|| lookup::project_title(&record));
    match title {
        Some(title) => Ok(identity.with_title(title)),
        None => {
            tracing::warn!(hdp_id = request.hdp_id, "metadata record has no project title");
            Ok(identity)
        }
    }
}

/// Reverse lookup: the HDP ID of the first study under an award.
///
/// # Errors
///
/// Returns [`RemoteError::MissingKey`] if the award has no study with an
/// `_hdp_uid`, or any transport/API error from the metadata source.
pub async fn resolve_hdp_id<S: MetadataSource>(
    source: &S,
    appl_id: &str,
) -> Result<String, RemoteError> {
    let response = source.studies_for_award(appl_id).await?;
    let count = response.as_object().map_or(0, serde_json::Map::len);
    tracing::info!(appl_id, count, "studies found for award");
    lookup::first_hdp_uid(&response).ok_or_else(|| RemoteError::MissingKey {
        key: "_hdp_uid",
        id: appl_id.to_string(),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
