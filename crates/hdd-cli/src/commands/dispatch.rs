use hdd_config::HddConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: &Commands,
    config: &HddConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Convert(args) => commands::convert::handle(args, config, flags).await,
        Commands::Resolve(args) => commands::resolve::handle(args, config, flags).await,
        Commands::ValidateRedcap(args) => {
            commands::validate_redcap::handle(args, config, flags).await
        }
    }
}
