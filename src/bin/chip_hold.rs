use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use firlab::output::{OutputFormat, create_formatter};
use firlab::validation::load_chip_hold;

#[derive(Parser, Debug)]
#[command(name = "chip_hold")]
#[command(about = "Summarize chip validation results", long_about = None)]
#[command(after_help = "Example usage: chip_hold results.csv")]
struct Args {
    /// Chip validation results file (CSV, header line first)
    source: PathBuf,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print every value, not only the summary (text format)
    #[arg(long)]
    values: bool,

    /// Increase logging verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::debug!("Verbose logging enabled");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Unable to locate or read {}: {:#}", args.source.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let data = load_chip_hold(&args.source)?;
    let series = [data.to_series("chip_hold")];

    let formatter = create_formatter(args.format, args.values);
    println!("{}", formatter.format(&series)?);
    Ok(())
}
