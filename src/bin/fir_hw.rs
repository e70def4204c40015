use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use firlab::config::FirConfig;
use firlab::device::{EmulatedDevice, SimulatorChannel};
use firlab::io::IntLiteral;
use firlab::output::{LabeledSeries, OutputFormat, create_formatter};
use firlab::processing::{HardwareRun, run_hardware};

#[derive(Parser, Debug)]
#[command(name = "fir_hw")]
#[command(about = "Stream a signal vector through the FIR device for each coefficient config", long_about = None)]
struct Args {
    /// Input signal vector file
    #[arg(long)]
    vector: Option<PathBuf>,

    /// FIR coefficient config files, each with taps 0-3
    #[arg(long, num_args = 1..)]
    configs: Vec<PathBuf>,

    /// TOML run configuration; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// External device simulator executable
    #[arg(long, conflicts_with = "emulate")]
    simulator: Option<PathBuf>,

    /// Use the built-in device model instead of an external simulator
    #[arg(long)]
    emulate: bool,

    /// CSR bus address (e.g. 0x0)
    #[arg(long)]
    csr_address: Option<IntLiteral>,

    /// COEF register bus address (e.g. 0x4)
    #[arg(long)]
    coef_address: Option<IntLiteral>,

    /// Start from this CSR value instead of reading it from the device
    #[arg(long)]
    base_csr: Option<IntLiteral>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum)]
    format: Option<OutputFormat>,

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

    match build_config(&args).and_then(|config| run(&config, args.emulate)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn register(lit: IntLiteral, name: &str) -> anyhow::Result<u32> {
    u32::try_from(lit.value()).with_context(|| format!("{} {} is not a 32-bit value", name, lit))
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
    if let Some(simulator) = &args.simulator {
        config.device.simulator = Some(simulator.clone());
    }
    if let Some(addr) = args.csr_address {
        config.device.csr_address = register(addr, "CSR address")?;
    }
    if let Some(addr) = args.coef_address {
        config.device.coef_address = register(addr, "COEF address")?;
    }
    if let Some(base) = args.base_csr {
        config.device.base_csr = Some(register(base, "base CSR")?);
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    config.output.verbose |= args.values;

    Ok(config)
}

fn run(config: &FirConfig, emulate: bool) -> anyhow::Result<()> {
    let (vector, configs) = config.inputs()?;

    let (input, runs) = if emulate {
        log::info!("Using built-in device model");
        let mut device = EmulatedDevice::new(config.device.registers());
        run_hardware(&mut device, &config.device, vector, configs)?
    } else {
        let mut channel = SimulatorChannel::from_config(&config.device)
            .context("Pass --simulator <path> or --emulate")?;
        run_hardware(&mut channel, &config.device, vector, configs)?
    };

    report_mismatches(&runs);

    let mut series = vec![input];
    series.extend(runs.into_iter().map(|run| run.series));

    let formatter = create_formatter(config.output.format, config.output.verbose);
    println!("{}", formatter.format(&series)?);
    Ok(())
}

fn report_mismatches(runs: &[HardwareRun]) {
    for run in runs {
        let LabeledSeries { label, .. } = &run.series;
        match run.first_mismatch() {
            Some((index, got, want)) => log::warn!(
                "{}: device output differs from host FIR at sample {} (device {}, host {})",
                label,
                index,
                got,
                want
            ),
            None => log::info!("{}: device output matches host FIR", label),
        }
    }
}
