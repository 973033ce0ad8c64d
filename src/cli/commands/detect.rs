use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use crate::cli::utils::output;
use crate::cli::OutputFormat;
use crate::semaforo::{detect_bucket, Bucket};

#[derive(Args)]
pub struct DetectArgs {
    #[arg(long, value_name = "YYYY-MM-DD", help = "prazoFatalFrom value")]
    pub from: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "prazoFatalTo value")]
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Detection {
    pub from: Option<String>,
    pub to: Option<String>,
    pub bucket: Option<Bucket>,
    pub label: Option<&'static str>,
}

pub fn detect(today: NaiveDate, args: DetectArgs) -> Detection {
    let bucket = detect_bucket(today, args.from.as_deref(), args.to.as_deref());
    Detection {
        from: args.from,
        to: args.to,
        bucket,
        label: bucket.map(Bucket::label),
    }
}

pub fn handle(args: DetectArgs, today: NaiveDate, output_format: OutputFormat) -> anyhow::Result<()> {
    let detection = detect(today, args);
    output(output_format, &detection, |d| match d.label {
        Some(label) => label.to_string(),
        None => "- (literal date filter)".to_string(),
    })
}
