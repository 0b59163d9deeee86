use anyhow::Context;
use hdd_config::HddConfig;
use hdd_remote::{IdentityRequest, resolve_hdp_id, resolve_identity};
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResolveArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ResolveResponse {
    hdp_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    appl_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_title: Option<String>,
}

/// Handle `hdd resolve`.
pub async fn handle(
    args: &ResolveArgs,
    config: &HddConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = bootstrap::mds_client(config)?;

    let response = if let Some(hdp_id) = &args.hdp_id {
        let identity = resolve_identity(
            &client,
            &IdentityRequest {
                hdp_id,
                ..IdentityRequest::default()
            },
        )
        .await
        .with_context(|| format!("failed to resolve {hdp_id}"))?;
        ResolveResponse {
            hdp_id: identity.hdp_id,
            appl_id: identity.appl_id,
            project_title: Some(identity.project_title).filter(|t| !t.is_empty()),
        }
    } else {
        let appl_id = args
            .appl_id
            .as_deref()
            .context("either an HDP ID or --appl-id is required")?;
        let hdp_id = resolve_hdp_id(&client, appl_id)
            .await
            .with_context(|| format!("failed to find a study for award {appl_id}"))?;
        ResolveResponse {
            hdp_id,
            appl_id: Some(appl_id.to_string()),
            project_title: None,
        }
    };

    output(&response, flags.format)
}
