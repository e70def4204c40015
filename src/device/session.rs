use super::{ControlStep, ControlWord, DeviceChannel, RegisterMap, configuration_sequence};
use crate::error::Result;
use crate::io::CoefficientTable;

/// Load `table` into the device and start filtering
///
/// Reads the current CSR unless `base` is given, then issues the
/// [`configuration_sequence`] writes in order. Returns the final CSR value.
///
/// # Errors
/// `FirError::MissingTap` if the table lacks any of taps 0..4, or the first
/// failed device exchange.
pub fn configure_filter<C: DeviceChannel + ?Sized>(
    channel: &mut C,
    registers: &RegisterMap,
    table: &CoefficientTable,
    base: Option<ControlWord>,
) -> Result<ControlWord> {
    let coef = table.packed_register()?;
    let enables = table.tap_enables()?;

    let base = match base {
        Some(word) => word,
        None => ControlWord::from_register(channel.read_register(registers.csr)?),
    };
    log::debug!("CSR before configuration: {:#010x}", base.bits());

    let mut csr = base;
    for step in configuration_sequence(base, coef, enables) {
        match step {
            ControlStep::WriteCsr(word) => {
                log::debug!("CSR <- {:#010x}", word.bits());
                channel.write_register(registers.csr, word.bits())?;
                csr = word;
            }
            ControlStep::WriteCoef(value) => {
                log::debug!("COEF <- {:#010x}", value);
                channel.write_register(registers.coef, value)?;
            }
        }
    }

    log::info!(
        "Device configured: COEF={:#010x} CSR={:#010x}",
        coef,
        csr.bits()
    );
    Ok(csr)
}

/// Push every sample through the device, one exchange per sample.
pub fn stream_samples<C: DeviceChannel + ?Sized>(
    channel: &mut C,
    samples: &[i64],
) -> Result<Vec<i64>> {
    log::debug!("Streaming {} samples through device", samples.len());
    samples
        .iter()
        .map(|&sample| channel.exchange_sample(sample))
        .collect()
}
