use dcfx_core::{Envelope, ValuationReport};
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Ndjson => {
            let payload = serde_json::to_string(envelope)?;
            println!("{payload}");
        }
        OutputFormat::Table => print!("{}", render_table(envelope)?),
    }

    Ok(())
}

fn render_table(envelope: &Envelope<Value>) -> Result<String, CliError> {
    let mut out = String::new();
    out.push_str(&format!("request_id  : {}\n", envelope.meta.request_id));
    out.push_str(&format!("schema      : {}\n", envelope.meta.schema_version));
    out.push_str(&format!("generated_at: {}\n", envelope.meta.generated_at));
    if !envelope.meta.inputs.is_empty() {
        out.push_str(&format!("inputs      : {}\n", envelope.meta.inputs.join(", ")));
    }
    out.push_str(&format!("latency_ms  : {}\n", envelope.meta.latency_ms));

    if !envelope.meta.warnings.is_empty() {
        out.push_str("warnings:\n");
        for warning in &envelope.meta.warnings {
            out.push_str(&format!("  - {warning}\n"));
        }
    }

    match serde_json::from_value::<ValuationReport>(envelope.data.clone()) {
        Ok(report) => out.push_str(&valuation_table(&report)),
        Err(_) if envelope.data.is_null() => {}
        Err(_) => {
            out.push_str("data:\n");
            for line in serde_json::to_string_pretty(&envelope.data)?.lines() {
                out.push_str(&format!("  {line}\n"));
            }
        }
    }

    if !envelope.errors.is_empty() {
        out.push_str("errors:\n");
        for error in &envelope.errors {
            match error.stage {
                Some(stage) => {
                    out.push_str(&format!("  - [{stage}] {}: {}\n", error.code, error.message))
                }
                None => out.push_str(&format!("  - {}: {}\n", error.code, error.message)),
            }
        }
    }

    Ok(out)
}

fn valuation_table(report: &ValuationReport) -> String {
    let mut out = String::new();
    let assumptions = &report.assumptions;
    out.push_str(&format!(
        "assumptions : growth={} tax={} discount={} terminal_growth={} years={}\n",
        assumptions.growth_rate,
        assumptions.tax_rate,
        assumptions.discount_rate,
        assumptions.terminal_growth_rate,
        assumptions.projection_years
    ));
    out.push_str(&format!(
        "historical  : {} periods, ebit margin {:.4}\n\n",
        report.historical.periods, report.historical.ebit_margin
    ));

    out.push_str(&format!(
        "{:<10} {:>18} {:>18}\n",
        "Year", "Projected FCF", "Discounted FCF"
    ));
    for period in &report.discounted {
        out.push_str(&format!(
            "{:<10} {:>18.2} {:>18.2}\n",
            format!("Year {}", period.period),
            period.free_cash_flow,
            period.present_value
        ));
    }
    out.push_str(&format!(
        "{:<10} {:>18.2} {:>18.2}\n\n",
        "Terminal", report.result.terminal_value, report.result.discounted_terminal_value
    ));
    out.push_str(&format!(
        "enterprise value: {:.2}\n",
        report.result.enterprise_value
    ));
    out
}
