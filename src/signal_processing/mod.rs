pub mod fir;
pub mod fir_core;

pub use fir::{FirFilter, apply_fir};
pub use fir_core::FirFilterCore;
