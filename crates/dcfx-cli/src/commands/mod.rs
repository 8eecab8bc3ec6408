mod config;
mod labels;
mod lookup;
mod value;

use std::path::Path;
use std::time::Instant;

use dcfx_core::{
    open_source, DcfConfig, DcfError, Envelope, EnvelopeError, EnvelopeMeta, FinancialTable,
    SourceOptions, SCHEMA_VERSION,
};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::cli::{AssumptionArgs, Cli, Command, SourceArgs};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub inputs: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
            inputs: Vec::new(),
        }
    }

    /// A run that aborted; never carries partial data.
    pub fn failed(error: &DcfError) -> Self {
        Self::ok(Value::Null).with_errors(vec![EnvelopeError::from(error)])
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<String>) -> Self {
        self.inputs = inputs;
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();

    let command_result = match &cli.command {
        Command::Value(args) => {
            let config = resolve_config(cli, &args.assumptions, &args.source)?;
            value::run(args, &config)?
        }
        Command::Labels(args) => {
            let config = resolve_config(cli, &AssumptionArgs::default(), &args.source)?;
            labels::run(args, &config)?
        }
        Command::Lookup(args) => {
            let config = resolve_config(cli, &AssumptionArgs::default(), &args.source)?;
            lookup::run(args, &config)?
        }
        Command::Config(args) => {
            let config = resolve_config(cli, &args.assumptions, &args.source)?;
            config::run(&config)?
        }
    };

    let CommandResult {
        data,
        warnings,
        errors,
        inputs,
    } = command_result;

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), SCHEMA_VERSION, inputs, latency_ms)?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}

/// Defaults, then the config file, then individual flags.
fn resolve_config(
    cli: &Cli,
    assumptions: &AssumptionArgs,
    source: &SourceArgs,
) -> Result<DcfConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            DcfConfig::from_path(path)?
        }
        None => DcfConfig::default(),
    };

    let target = &mut config.assumptions;
    if let Some(growth_rate) = assumptions.growth_rate {
        target.growth_rate = growth_rate;
    }
    if let Some(tax_rate) = assumptions.tax_rate {
        target.tax_rate = tax_rate;
    }
    if let Some(discount_rate) = assumptions.discount_rate {
        target.discount_rate = discount_rate;
    }
    if let Some(terminal_growth_rate) = assumptions.terminal_growth_rate {
        target.terminal_growth_rate = terminal_growth_rate;
    }
    if let Some(years) = assumptions.years {
        target.projection_years = years;
    }
    if let Some(alignment) = assumptions.alignment {
        config.alignment = alignment.into();
    }

    if let Some(skip_rows) = source.skip_rows {
        config.source.skip_rows = skip_rows;
    }
    if source.no_header {
        config.source.has_header = false;
    }

    config.validate()?;
    Ok(config)
}

fn load_table(path: &Path, options: SourceOptions) -> Result<(String, FinancialTable), CliError> {
    let source = open_source(path, options)?;
    let table = source.read_table()?;
    Ok((source.name().to_owned(), table))
}
