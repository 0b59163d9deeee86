use std::path::PathBuf;

use clap::{ArgGroup, Args, Subcommand};
use hdd_core::identity::DEFAULT_PROJECT_TYPE;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Convert every data dictionary in a clean study directory to VLMD.
    Convert(ConvertArgs),
    /// Look up a study's identifiers in the HEAL metadata service.
    Resolve(ResolveArgs),
    /// Check a REDCap data dictionary against the REDCap import API.
    ValidateRedcap(ValidateRedcapArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ConvertArgs {
    /// Directory holding the cleaned data dictionaries for one study.
    #[arg(long, visible_alias = "clean_study_directory")]
    pub clean_study_directory: PathBuf,

    /// Base directory that receives `data-dictionaries/<study>/`.
    #[arg(long, visible_alias = "output_directory")]
    pub output_directory: PathBuf,

    /// Study directory name to use instead of the HDP ID.
    #[arg(long)]
    pub project: Option<String>,

    /// HEAL Data Platform study ID.
    #[arg(long, visible_alias = "hdp_id")]
    pub hdp_id: String,

    /// NIH award number; looked up from the HDP ID when omitted.
    #[arg(long, visible_alias = "appl_id")]
    pub appl_id: Option<String>,

    #[arg(long, visible_alias = "project_type", default_value = DEFAULT_PROJECT_TYPE)]
    pub project_type: String,

    /// Project title; looked up from the HDP ID when omitted.
    #[arg(long, visible_alias = "project_title")]
    pub project_title: Option<String>,

    /// Replace output left by a previous run.
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Clone, Debug, Args)]
#[command(group(ArgGroup::new("study").required(true).args(["hdp_id", "appl_id"])))]
pub struct ResolveArgs {
    /// HDP ID to resolve to an APPL ID and title.
    pub hdp_id: Option<String>,

    /// Find the HDP ID of the first study under this award instead.
    #[arg(long, visible_alias = "appl_id")]
    pub appl_id: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ValidateRedcapArgs {
    /// REDCap data dictionary CSV.
    pub path: PathBuf,
}
