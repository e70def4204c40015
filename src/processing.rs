use std::path::{Path, PathBuf};

use crate::config::DeviceConfig;
use crate::device::{DeviceChannel, configure_filter, stream_samples};
use crate::error::Result;
use crate::io::{CoefficientTable, load_vector};
use crate::output::LabeledSeries;
use crate::signal_processing::{FirFilter, apply_fir};

/// Label used for the raw input series
pub const INPUT_LABEL: &str = "input";

/// Filter one vector with the enabled taps of each coefficient file
///
/// Returns one series per config file, labeled with its path.
pub fn run_software(vector: &Path, configs: &[PathBuf]) -> Result<Vec<LabeledSeries>> {
    let samples = load_vector(vector)?;

    configs
        .iter()
        .map(|cfg| {
            log::info!("Processing config {}", cfg.display());
            let table = CoefficientTable::load(cfg)?;
            let output = FirFilter::new(table.enabled_values()).apply(&samples)?;
            Ok(LabeledSeries::new(cfg.display().to_string(), output))
        })
        .collect()
}

/// Result of streaming a vector through the device for one config
#[derive(Debug)]
pub struct HardwareRun {
    pub series: LabeledSeries,
    /// What the device should produce for this table, computed on the host
    pub expected: Vec<i128>,
}

impl HardwareRun {
    /// Index and values of the first sample where device and host disagree
    pub fn first_mismatch(&self) -> Option<(usize, i128, i128)> {
        self.series
            .values
            .iter()
            .zip(&self.expected)
            .enumerate()
            .find(|(_, (got, want))| got != want)
            .map(|(i, (&got, &want))| (i, got, want))
    }
}

/// Stream a vector through the device once per coefficient file
///
/// The device is reconfigured before each file. The returned list starts
/// with the input series, followed by one device output per config.
pub fn run_hardware<C: DeviceChannel + ?Sized>(
    channel: &mut C,
    device: &DeviceConfig,
    vector: &Path,
    configs: &[PathBuf],
) -> Result<(LabeledSeries, Vec<HardwareRun>)> {
    let samples = load_vector(vector)?;
    let registers = device.registers();

    let mut runs = Vec::with_capacity(configs.len());
    for cfg in configs {
        log::info!("Processing config {} on device", cfg.display());
        let table = CoefficientTable::load(cfg)?;

        configure_filter(channel, &registers, &table, device.base_control_word())?;
        let output = stream_samples(channel, &samples)?;

        let expected = apply_fir(&samples, &table.register_weights()?)?;
        runs.push(HardwareRun {
            series: LabeledSeries::from_samples(cfg.display().to_string(), &output),
            expected,
        });
    }

    Ok((LabeledSeries::from_samples(INPUT_LABEL, &samples), runs))
}
