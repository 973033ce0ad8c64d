pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "semaforo")]
#[command(about = "Deadline traffic light - classify dates, detect bucket filters, print widened ranges")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, value_name = "YYYY-MM-DD", help = "Evaluate as if today were this date")]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Print the bucket of each deadline")]
    Classify(commands::classify::ClassifyArgs),

    #[command(about = "Infer which bucket a prazoFatalFrom/prazoFatalTo pair selects")]
    Detect(commands::detect::DetectArgs),

    #[command(about = "Print the widened query range for a bucket")]
    Widen(commands::widen::WidenArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let today = utils::resolve_today(cli.today.as_deref())?;

    match cli.command {
        Commands::Classify(args) => commands::classify::handle(args, today, output_format),
        Commands::Detect(args) => commands::detect::handle(args, today, output_format),
        Commands::Widen(args) => commands::widen::handle(args, today, output_format),
    }
}
