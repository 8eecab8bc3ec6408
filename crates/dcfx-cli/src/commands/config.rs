use dcfx_core::DcfConfig;

use crate::error::CliError;

use super::CommandResult;

pub fn run(config: &DcfConfig) -> Result<CommandResult, CliError> {
    let data = serde_json::to_value(config.effective())?;
    Ok(CommandResult::ok(data).with_warnings(config.assumptions.advisories()))
}
