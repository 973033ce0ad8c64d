use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use crate::cli::utils::{output, parse_date_arg};
use crate::cli::OutputFormat;
use crate::semaforo::calendar::{diff_days, start_of_day};
use crate::semaforo::{classify, Bucket};

#[derive(Args)]
pub struct ClassifyArgs {
    #[arg(required = true, value_name = "DATE", help = "Deadlines as YYYY-MM-DD")]
    pub dates: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Classification {
    pub date: NaiveDate,
    pub days: i64,
    pub bucket: Option<Bucket>,
    pub label: Option<&'static str>,
}

pub fn classify_all(today: NaiveDate, dates: &[String]) -> anyhow::Result<Vec<Classification>> {
    dates
        .iter()
        .map(|raw| {
            let date = parse_date_arg("DATE", raw)?;
            let bucket = classify(today, Some(date));
            Ok::<_, anyhow::Error>(Classification {
                date,
                days: diff_days(today, start_of_day(date)),
                bucket,
                label: bucket.map(Bucket::label),
            })
        })
        .collect()
}

pub fn handle(args: ClassifyArgs, today: NaiveDate, output_format: OutputFormat) -> anyhow::Result<()> {
    let rows = classify_all(today, &args.dates)?;
    output(output_format, &rows, |rows| {
        rows.iter()
            .map(|r| format!("{}  {:>5}  {}", r.date, r.days, r.label.unwrap_or("-")))
            .collect::<Vec<_>>()
            .join("\n")
    })
}
