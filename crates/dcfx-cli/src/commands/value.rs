use dcfx_core::{run_valuation, DcfConfig, Statements};
use tracing::warn;

use crate::cli::ValueArgs;
use crate::error::CliError;

use super::{load_table, CommandResult};

pub fn run(args: &ValueArgs, config: &DcfConfig) -> Result<CommandResult, CliError> {
    let (balance_name, balance_sheet) = load_table(&args.balance_sheet, config.source)?;
    let (cash_name, cash_flow) = load_table(&args.cash_flow, config.source)?;
    let (income_name, income_statement) = load_table(&args.income_statement, config.source)?;
    let inputs = vec![balance_name, cash_name, income_name];

    let statements = Statements {
        balance_sheet,
        cash_flow,
        income_statement,
    };
    let warnings = config.assumptions.advisories();

    match run_valuation(&statements, config) {
        Ok(report) => Ok(CommandResult::ok(serde_json::to_value(report)?)
            .with_warnings(warnings)
            .with_inputs(inputs)),
        Err(error) => {
            warn!(stage = %error.stage(), code = error.code(), "valuation aborted");
            Ok(CommandResult::failed(&error)
                .with_warnings(warnings)
                .with_inputs(inputs))
        }
    }
}
