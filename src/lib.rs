pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod io;
pub mod output;
pub mod processing;
pub mod signal_processing;
pub mod validation;

pub use config::FirConfig;
pub use error::{FirError, Result};
