use std::fs;

use anyhow::{Context, bail};
use hdd_config::HddConfig;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateRedcapArgs;
use crate::output::output;

/// Handle `hdd validate-redcap`.
pub async fn handle(
    args: &ValidateRedcapArgs,
    config: &HddConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = bootstrap::redcap_client(config)?;
    let dictionary = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;

    let report = client
        .validate(&dictionary)
        .await
        .context("REDCap validation request failed")?;
    for error in &report.errors {
        tracing::warn!(file = %args.path.display(), %error, "REDCap rejected the dictionary");
    }
    output(&report, flags.format)?;

    if !report.compliant {
        bail!(
            "{} is not REDCap compliant ({} problems)",
            args.path.display(),
            report.errors.len()
        );
    }
    Ok(())
}
