use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use firlab::config::FirConfig;
use firlab::output::{OutputFormat, create_formatter};
use firlab::processing::run_software;

#[derive(Parser, Debug)]
#[command(name = "firlab")]
#[command(about = "Validate FIR filter signal processing on the host", long_about = None)]
struct Args {
    /// Input signal vector file (e.g. square.vec)
    #[arg(long)]
    vector: Option<PathBuf>,

    /// FIR coefficient config files (e.g. p0.cfg p4.cfg p7.cfg p9.cfg)
    #[arg(long, num_args = 1..)]
    configs: Vec<PathBuf>,

    /// TOML run configuration; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum)]
    format: Option<OutputFormat>,

    /// Print every output value, not only the summary (text format)
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

    match build_config(&args).and_then(|config| run(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_config(args: &Args) -> anyhow::Result<FirConfig> {
    let mut config = match &args.config {
        Some(path) => FirConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => FirConfig::default(),
    };

    if let Some(vector) = &args.vector {
        config.input.vector = Some(vector.clone());
    }
    if !args.configs.is_empty() {
        config.input.configs = args.configs.clone();
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    config.output.verbose |= args.values;

    Ok(config)
}

fn run(config: &FirConfig) -> anyhow::Result<()> {
    let (vector, configs) = config.inputs()?;
    let series = run_software(vector, configs)?;

    let formatter = create_formatter(config.output.format, config.output.verbose);
    println!("{}", formatter.format(&series)?);
    Ok(())
}
