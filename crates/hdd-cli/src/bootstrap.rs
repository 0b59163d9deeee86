use std::time::Duration;

use anyhow::Context;
use hdd_config::HddConfig;
use hdd_remote::{MdsClient, RedcapClient};

/// Load layered configuration, reading `.env` first.
pub fn load_config() -> anyhow::Result<HddConfig> {
    let config = HddConfig::load_with_dotenv()?;
    tracing::debug!(
        mds = %config.mds.base_url,
        converter = %config.converter.program,
        redcap = config.redcap.is_configured(),
        "configuration loaded"
    );
    Ok(config)
}

pub fn mds_client(config: &HddConfig) -> anyhow::Result<MdsClient> {
    MdsClient::new(
        &config.mds.base_url,
        Duration::from_secs(config.mds.timeout_secs),
    )
    .context("failed to build metadata service client")
}

pub fn redcap_client(config: &HddConfig) -> anyhow::Result<RedcapClient> {
    let redcap = config.redcap.require()?;
    RedcapClient::new(
        &redcap.api_url,
        &redcap.api_token,
        Duration::from_secs(config.mds.timeout_secs),
    )
    .context("failed to build REDCap client")
}
