use anyhow::anyhow;
use chrono::NaiveDate;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::semaforo::calendar::{self, parse_day};

/// `--today` override, or the local calendar day.
pub fn resolve_today(value: Option<&str>) -> anyhow::Result<NaiveDate> {
    match value {
        Some(raw) => parse_date_arg("--today", raw),
        None => Ok(calendar::today()),
    }
}

pub fn parse_date_arg(name: &str, raw: &str) -> anyhow::Result<NaiveDate> {
    parse_day(raw).ok_or_else(|| anyhow!("{} must be YYYY-MM-DD, got '{}'", name, raw))
}

/// Print `value` as pretty JSON or through its text rendering.
pub fn output<T: Serialize>(
    output_format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => println!("{}", text(value)),
    }
    Ok(())
}
