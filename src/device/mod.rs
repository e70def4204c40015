//! Device access for the hardware-in-the-loop path
//!
//! The FIR block is reached through a [`DeviceChannel`]: either the external
//! command-line simulator ([`SimulatorChannel`]) or the in-process model
//! ([`EmulatedDevice`]). Every exchange is synchronous and a failure aborts
//! the run.

mod control;
mod emulator;
mod session;
mod simulator;

pub use control::{ControlStep, ControlWord, configuration_sequence};
pub use emulator::EmulatedDevice;
pub use session::{configure_filter, stream_samples};
pub use simulator::{SimulatorChannel, render_args};

use crate::constants::{DEFAULT_COEF_ADDRESS, DEFAULT_CSR_ADDRESS};
use crate::error::Result;

/// Synchronous request/response access to the FIR device
pub trait DeviceChannel {
    fn read_register(&mut self, addr: u32) -> Result<u32>;

    fn write_register(&mut self, addr: u32, value: u32) -> Result<()>;

    /// Push one input sample and return the filtered output sample
    fn exchange_sample(&mut self, sample: i64) -> Result<i64>;
}

/// Bus addresses of the FIR block registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterMap {
    pub csr: u32,
    pub coef: u32,
}

impl Default for RegisterMap {
    fn default() -> Self {
        Self {
            csr: DEFAULT_CSR_ADDRESS,
            coef: DEFAULT_COEF_ADDRESS,
        }
    }
}
