use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::Local;
use hdd_config::HddConfig;
use hdd_convert::{BatchReport, CommandConverter, ConversionDriver, DriverOptions};
use hdd_core::provision::require_dir;
use hdd_core::{OutputLayout, StudyIdentity};
use hdd_remote::{IdentityRequest, resolve_identity};
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ConvertArgs;
use crate::output::output;
use crate::progress::{FileBar, Spinner};
use crate::ui;

#[derive(Debug, Serialize)]
struct ConvertResponse<'a> {
    study: &'a StudyIdentity,
    study_dir: &'a Path,
    #[serde(flatten)]
    report: &'a BatchReport,
}

/// Handle `hdd convert`.
pub async fn handle(
    args: &ConvertArgs,
    config: &HddConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    // the converter runs in a scratch directory, so relative paths must not
    // reach it
    let clean_dir = absolute(&args.clean_study_directory)?;
    let output_dir = absolute(&args.output_directory)?;
    require_dir(&clean_dir, "clean study")?;
    require_dir(&output_dir, "output")?;

    let identity = resolve(args, config).await?;
    tracing::info!(
        hdp_id = %identity.hdp_id,
        appl_id = identity.appl_id.as_deref().unwrap_or_default(),
        title = %identity.project_title,
        "study identity resolved"
    );

    let converter = CommandConverter::from_config(&config.converter)?;
    let layout = OutputLayout::new(&output_dir, &identity);
    let driver = ConversionDriver::new(
        converter,
        layout,
        identity,
        DriverOptions {
            repository_url: config.publish.repository_url.clone(),
            overwrite: args.overwrite,
            today: Local::now().date_naive(),
        },
    );

    let report = driver
        .run_with(&clean_dir, &FileBar::start())
        .await
        .context("study conversion aborted")?;

    output(
        &ConvertResponse {
            study: driver.identity(),
            study_dir: &driver.layout().study_dir,
            report: &report,
        },
        flags.format,
    )?;

    if report.has_failures() {
        bail!(
            "{} of {} files failed to convert; converted files were still written",
            report.failed,
            report.found
        );
    }
    Ok(())
}

async fn resolve(args: &ConvertArgs, config: &HddConfig) -> anyhow::Result<StudyIdentity> {
    let client = bootstrap::mds_client(config)?;
    let request = IdentityRequest {
        hdp_id: &args.hdp_id,
        appl_id: args.appl_id.as_deref(),
        project: args.project.as_deref(),
        project_title: args.project_title.as_deref(),
        project_type: Some(args.project_type.as_str()),
    };

    let spinner = Spinner::start(format!("looking up {} in the metadata service", args.hdp_id));
    let resolved = resolve_identity(&client, &request).await;
    spinner.stop();
    let identity =
        resolved.with_context(|| format!("failed to resolve study identity for {}", args.hdp_id))?;

    if !identity.project_title.is_empty() {
        return Ok(identity);
    }
    match ui::prompt(&format!("Project title for {}", args.hdp_id))? {
        Some(title) => Ok(identity.with_title(title)),
        None => bail!(
            "no project title found for {}; pass --project-title",
            args.hdp_id
        ),
    }
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("cannot resolve path {}", path.display()))
}
