use dcfx_core::DcfConfig;
use serde::Serialize;

use crate::cli::LabelsArgs;
use crate::error::CliError;

use super::{load_table, CommandResult};

#[derive(Debug, Serialize)]
struct LabelsResponseData {
    periods: Vec<String>,
    labels: Vec<String>,
}

pub fn run(args: &LabelsArgs, config: &DcfConfig) -> Result<CommandResult, CliError> {
    let (name, table) = load_table(&args.file, config.source)?;

    let data = serde_json::to_value(LabelsResponseData {
        labels: table.labels(),
        periods: table.periods,
    })?;
    Ok(CommandResult::ok(data).with_inputs(vec![name]))
}
