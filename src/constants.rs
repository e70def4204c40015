//! Register layout constants for the FIR device
//!
//! The device exposes a control/status register (CSR) and a packed
//! coefficient register (COEF). Bit positions inside the CSR are defined
//! by [`crate::device::ControlWord`].

/// Number of taps held by the COEF register, one byte each.
pub const REGISTER_TAPS: usize = 4;

/// Default CSR address on the device bus.
pub const DEFAULT_CSR_ADDRESS: u32 = 0x0;

/// Default COEF register address on the device bus.
pub const DEFAULT_COEF_ADDRESS: u32 = 0x4;
