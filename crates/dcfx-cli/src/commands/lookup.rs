use dcfx_core::{DcfConfig, LineItem, LineItemExtractor};
use serde::Serialize;

use crate::cli::LookupArgs;
use crate::error::CliError;

use super::{load_table, CommandResult};

#[derive(Debug, Serialize)]
struct LookupResponseData {
    query: String,
    periods: Vec<String>,
    item: LineItem,
}

pub fn run(args: &LookupArgs, config: &DcfConfig) -> Result<CommandResult, CliError> {
    let (name, table) = load_table(&args.file, config.source)?;

    match LineItemExtractor::find(&table, &args.label) {
        Ok(item) => {
            let data = serde_json::to_value(LookupResponseData {
                query: args.label.clone(),
                periods: table.periods,
                item,
            })?;
            Ok(CommandResult::ok(data).with_inputs(vec![name]))
        }
        Err(error) => Ok(CommandResult::failed(&error).with_inputs(vec![name])),
    }
}
