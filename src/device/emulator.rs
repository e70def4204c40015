use super::{ControlWord, DeviceChannel, RegisterMap};
use crate::constants::REGISTER_TAPS;
use crate::error::{FirError, Result};
use crate::signal_processing::FirFilterCore;

/// In-process model of the 4-tap FIR block
///
/// Behaviour per CSR state:
/// - HALT set: sample exchanges are rejected
/// - FEN clear: samples pass through unchanged (the delay line still advances)
/// - FEN set: output is the causal FIR over the unsigned COEF bytes, with
///   disabled taps weighted zero
///
/// Writing a CSR value with TCLR set clears the delay line. Addresses other
/// than CSR and COEF read as zero and ignore writes.
pub struct EmulatedDevice {
    registers: RegisterMap,
    csr: ControlWord,
    coef: u32,
    core: FirFilterCore,
    write_log: Vec<(u32, u32)>,
}

impl EmulatedDevice {
    pub fn new(registers: RegisterMap) -> Self {
        Self {
            registers,
            csr: ControlWord::empty(),
            coef: 0,
            core: FirFilterCore::new(vec![0; REGISTER_TAPS]),
            write_log: Vec::new(),
        }
    }

    pub fn csr(&self) -> ControlWord {
        self.csr
    }

    pub fn coef(&self) -> u32 {
        self.coef
    }

    /// Effective tap weights given the current CSR and COEF
    pub fn weights(&self) -> [i64; REGISTER_TAPS] {
        std::array::from_fn(|tap| {
            if self.csr.tap_enabled(tap) {
                i64::from((self.coef >> (8 * tap)) & 0xFF)
            } else {
                0
            }
        })
    }

    /// Every register write received, as `(addr, value)`
    pub fn write_log(&self) -> &[(u32, u32)] {
        &self.write_log
    }

    fn reload_taps(&mut self) {
        let weights = self.weights();
        self.core.set_taps(&weights);
    }
}

impl Default for EmulatedDevice {
    fn default() -> Self {
        Self::new(RegisterMap::default())
    }
}

impl DeviceChannel for EmulatedDevice {
    fn read_register(&mut self, addr: u32) -> Result<u32> {
        let value = if addr == self.registers.csr {
            self.csr.bits()
        } else if addr == self.registers.coef {
            self.coef
        } else {
            0
        };
        log::trace!("emulator read {:#x} -> {:#010x}", addr, value);
        Ok(value)
    }

    fn write_register(&mut self, addr: u32, value: u32) -> Result<()> {
        log::trace!("emulator write {:#x} <- {:#010x}", addr, value);
        self.write_log.push((addr, value));

        if addr == self.registers.csr {
            let word = ControlWord::from_register(value);
            if word.contains(ControlWord::TCLR) {
                self.core.reset();
            }
            self.csr = word;
            self.reload_taps();
        } else if addr == self.registers.coef {
            self.coef = value;
            self.reload_taps();
        }
        Ok(())
    }

    fn exchange_sample(&mut self, sample: i64) -> Result<i64> {
        if self.csr.contains(ControlWord::HALT) {
            return Err(FirError::Device(
                "sample exchange while the filter is halted".to_string(),
            ));
        }

        let filtered = self.core.process(sample);
        if !self.csr.contains(ControlWord::FEN) {
            return Ok(sample);
        }
        let filtered = filtered.ok_or_else(|| {
            FirError::Device("filter accumulator overflowed".to_string())
        })?;
        i64::try_from(filtered).map_err(|_| {
            FirError::Device(format!("filter output {} overflows a 64-bit sample", filtered))
        })
    }
}
