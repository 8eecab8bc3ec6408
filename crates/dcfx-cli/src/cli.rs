//! CLI argument definitions for dcfx.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `value` | Run a DCF valuation over three statement exports |
//! | `labels` | List the row labels of one statement export |
//! | `lookup` | Resolve one label in a statement export |
//! | `config` | Print the effective configuration |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--config` | none | JSON configuration file |
//! | `--log-level` | `warn` | Log level when `RUST_LOG` is unset |
//! | `--log-format` | `pretty` | Log line format on stderr |
//!
//! # Examples
//!
//! ```bash
//! dcfx value --balance-sheet bs.csv --cash-flow cf.csv --income-statement is.csv --skip-rows 6
//! dcfx --format table value -b bs.csv -c cf.csv -i is.csv --growth-rate 0.04 --discount-rate 0.079
//! dcfx labels "Balance Sheet.csv" --skip-rows 10
//! dcfx config --pretty > dcfx.json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dcfx_core::PeriodAlignment;

/// Discounted cash flow valuation from statement exports.
#[derive(Debug, Parser)]
#[command(
    name = "dcfx",
    author,
    version,
    about = "Discounted cash flow valuation from financial statement exports"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// JSON configuration file (assumptions, label mapping, source layout).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Log line format written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    Table,
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlignmentSelector {
    /// Fail when statements report different period counts.
    Strict,
    /// Keep the most recent periods all statements share.
    TrailingCommon,
}

impl From<AlignmentSelector> for PeriodAlignment {
    fn from(value: AlignmentSelector) -> Self {
        match value {
            AlignmentSelector::Strict => Self::Strict,
            AlignmentSelector::TrailingCommon => Self::TrailingCommon,
        }
    }
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Value a company from its balance sheet, cash-flow and income statements.
    Value(ValueArgs),

    /// List the non-empty row labels of a statement export.
    Labels(LabelsArgs),

    /// Resolve a label in a statement export, as the valuation would.
    Lookup(LookupArgs),

    /// Print the effective configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct ValueArgs {
    /// Balance sheet export (.csv or .json).
    #[arg(short = 'b', long)]
    pub balance_sheet: PathBuf,

    /// Cash-flow statement export (.csv or .json).
    #[arg(short = 'c', long)]
    pub cash_flow: PathBuf,

    /// Income statement export (.csv or .json).
    #[arg(short = 'i', long)]
    pub income_statement: PathBuf,

    #[command(flatten)]
    pub assumptions: AssumptionArgs,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args)]
pub struct LabelsArgs {
    /// Statement export (.csv or .json).
    pub file: PathBuf,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Statement export (.csv or .json).
    pub file: PathBuf,

    /// Case-insensitive label substring.
    pub label: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub assumptions: AssumptionArgs,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Per-run overrides of the configured assumptions.
#[derive(Debug, Default, Args)]
pub struct AssumptionArgs {
    /// Constant growth rate applied to every projected component.
    #[arg(long, allow_negative_numbers = true)]
    pub growth_rate: Option<f64>,

    /// Tax rate applied to projected EBIT.
    #[arg(long, allow_negative_numbers = true)]
    pub tax_rate: Option<f64>,

    /// Discount rate (WACC).
    #[arg(long, allow_negative_numbers = true)]
    pub discount_rate: Option<f64>,

    /// Perpetual growth rate used for the terminal value.
    #[arg(long, allow_negative_numbers = true)]
    pub terminal_growth_rate: Option<f64>,

    /// Number of forward periods to project.
    #[arg(long)]
    pub years: Option<u32>,

    /// Period alignment policy across statements.
    #[arg(long, value_enum)]
    pub alignment: Option<AlignmentSelector>,
}

/// Layout overrides for delimited exports.
#[derive(Debug, Default, Args)]
pub struct SourceArgs {
    /// Leading rows to skip before the header row.
    #[arg(long)]
    pub skip_rows: Option<usize>,

    /// The first row after the skipped rows is data, not period headers.
    #[arg(long, default_value_t = false)]
    pub no_header: bool,
}
