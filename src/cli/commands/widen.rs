use chrono::{NaiveDate, NaiveDateTime};
use clap::Args;
use serde::Serialize;

use crate::cli::utils::output;
use crate::cli::OutputFormat;
use crate::semaforo::{widen_range_for_bucket, Bucket};

#[derive(Args)]
pub struct WidenArgs {
    #[arg(value_name = "BUCKET", help = "Label (\"Crítico\") or name (critical, possible-loss, ...)")]
    pub bucket: Bucket,
}

#[derive(Debug, Serialize)]
pub struct WidenedRange {
    pub bucket: Bucket,
    pub gte: NaiveDateTime,
    pub lte: NaiveDateTime,
}

pub fn widen(today: NaiveDate, bucket: Bucket) -> WidenedRange {
    let (gte, lte) = widen_range_for_bucket(today, bucket).into_inner();
    WidenedRange { bucket, gte, lte }
}

pub fn handle(args: WidenArgs, today: NaiveDate, output_format: OutputFormat) -> anyhow::Result<()> {
    let range = widen(today, args.bucket);
    output(output_format, &range, |r| {
        format!(
            "{}: {} .. {}",
            r.bucket,
            r.gte.format("%Y-%m-%d %H:%M:%S%.3f"),
            r.lte.format("%Y-%m-%d %H:%M:%S%.3f")
        )
    })
}
