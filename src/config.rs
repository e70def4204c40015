//! Run configuration for the firlab tools.
//!
//! Everything a run needs is carried in a [`FirConfig`] that the binaries
//! build from an optional TOML file plus command-line overrides, then pass
//! explicitly to the pipelines.
//!
//! ```toml
//! [input]
//! vector = "data/square.vec"
//! configs = ["data/p0.cfg", "data/p4.cfg"]
//!
//! [device]
//! simulator = "./fir-sim"
//! csr_address = 0x0
//! coef_address = 0x4
//!
//! [output]
//! format = "csv"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{DEFAULT_COEF_ADDRESS, DEFAULT_CSR_ADDRESS};
use crate::device::{ControlWord, RegisterMap};
use crate::error::{FirError, Result};
use crate::output::OutputFormat;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FirConfig {
    /// Input files
    pub input: InputConfig,
    /// Device channel settings (hardware path only)
    pub device: DeviceConfig,
    /// Output formatting
    pub output: OutputConfig,
}

/// Input vector and coefficient files
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Sample vector file
    pub vector: Option<PathBuf>,
    /// Coefficient configuration files, processed in order
    pub configs: Vec<PathBuf>,
}

/// External simulator and register layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceConfig {
    /// Simulator executable
    pub simulator: Option<PathBuf>,
    /// Arguments passed before every request
    pub extra_args: Vec<String>,
    /// CSR bus address
    pub csr_address: u32,
    /// COEF register bus address
    pub coef_address: u32,
    /// Register read template (`{addr}`)
    pub read_args: Vec<String>,
    /// Register write template (`{addr}`, `{data}`)
    pub write_args: Vec<String>,
    /// Sample exchange template (`{data}`)
    pub sample_args: Vec<String>,
    /// CSR value to start from instead of reading it back from the device
    pub base_csr: Option<u32>,
}

/// Output formatting
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Include every value, not just the summary (text format)
    pub verbose: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        let args = |a: &[&str]| -> Vec<String> { a.iter().map(|s| s.to_string()).collect() };
        Self {
            simulator: None,
            extra_args: Vec::new(),
            csr_address: DEFAULT_CSR_ADDRESS,
            coef_address: DEFAULT_COEF_ADDRESS,
            read_args: args(&["cfg", "--address", "{addr}"]),
            write_args: args(&["cfg", "--address", "{addr}", "--data", "{data}"]),
            sample_args: args(&["sig", "--data", "{data}"]),
            base_csr: None,
        }
    }
}

impl DeviceConfig {
    pub fn registers(&self) -> RegisterMap {
        RegisterMap {
            csr: self.csr_address,
            coef: self.coef_address,
        }
    }

    pub fn base_control_word(&self) -> Option<ControlWord> {
        self.base_csr.map(ControlWord::from_register)
    }
}

impl FirConfig {
    /// Load a TOML configuration file
    ///
    /// # Errors
    /// `FirError::Io` if unreadable, `FirError::Config` if not valid TOML for
    /// this schema.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| FirError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
            .map_err(|e| FirError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| FirError::Config(e.to_string()))
    }

    /// The vector file and coefficient files, if both are configured
    pub fn inputs(&self) -> Result<(&Path, &[PathBuf])> {
        let vector = self
            .input
            .vector
            .as_deref()
            .ok_or_else(|| FirError::Config("no input vector file given".to_string()))?;
        if self.input.configs.is_empty() {
            return Err(FirError::Config(
                "no coefficient config files given".to_string(),
            ));
        }
        Ok((vector, &self.input.configs))
    }
}
