use std::fs;
use std::path::Path;

use super::literal::{parse_hex, parse_int};
use crate::constants::REGISTER_TAPS;
use crate::error::{FirError, Result};

/// One tap of a coefficient configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoefficientRow {
    /// Tap position (0 = current sample)
    pub index: usize,
    /// Whether the tap takes part in filtering
    pub enabled: bool,
    /// Tap weight. Full width for arithmetic filtering, masked to 8 bits
    /// when packed into the COEF register.
    pub value: i64,
}

/// Parsed coefficient configuration
///
/// Files are CSV with a header line followed by `index,enabled,value` rows:
///
/// ```text
/// coef,en,value
/// 0,1,0x10
/// 1,0,20
/// ```
///
/// `index` and `enabled` accept any integer literal; `value` is always
/// hexadecimal, with or without the `0x` prefix. When an index appears
/// twice the later row replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoefficientTable {
    rows: Vec<CoefficientRow>,
}

impl CoefficientTable {
    /// Load and parse a coefficient configuration file
    ///
    /// # Errors
    /// `FirError::Io` if the file cannot be read, `FirError::Parse` naming the
    /// first malformed row.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Opening config file {}", path.display());

        let text = fs::read_to_string(path).map_err(|source| FirError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&text, path)?;

        log::info!(
            "Loaded {} coefficients ({} enabled) from {}",
            table.len(),
            table.rows.iter().filter(|r| r.enabled).count(),
            path.display()
        );
        Ok(table)
    }

    /// Parse file contents; `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let mut table = Self::default();

        // First line is the header
        for (i, line) in text.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let row = parse_row(line, i + 1, origin)?;
            table.insert(row, origin, i + 1);
        }

        Ok(table)
    }

    /// Build a table directly from rows, applying the same duplicate rule as parsing.
    pub fn from_rows(rows: impl IntoIterator<Item = CoefficientRow>) -> Self {
        let mut table = Self::default();
        for (i, row) in rows.into_iter().enumerate() {
            table.insert(row, Path::new("<rows>"), i + 1);
        }
        table
    }

    fn insert(&mut self, row: CoefficientRow, origin: &Path, line: usize) {
        if let Some(pos) = self.rows.iter().position(|r| r.index == row.index) {
            log::warn!(
                "{}:{}: tap {} defined again, replacing earlier value {:#x}",
                origin.display(),
                line,
                row.index,
                self.rows[pos].value
            );
            self.rows[pos] = row;
            return;
        }
        self.rows.push(row);
    }

    pub fn get(&self, index: usize) -> Option<&CoefficientRow> {
        self.rows.iter().find(|r| r.index == index)
    }

    /// Rows in file order
    pub fn iter(&self) -> impl Iterator<Item = &CoefficientRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of enabled rows in file order
    ///
    /// Disabled rows and index gaps are dropped, so the result is the tap
    /// vector for arithmetic FIR filtering.
    pub fn enabled_values(&self) -> Vec<i64> {
        self.rows
            .iter()
            .filter(|r| r.enabled)
            .map(|r| r.value)
            .collect()
    }

    /// Pack taps 0..4 into a COEF register value
    ///
    /// Byte `i` (least significant first) holds `value[i] & 0xFF`. Enable
    /// flags are ignored here; they live in the control word.
    ///
    /// # Errors
    /// `FirError::MissingTap` listing every absent index in 0..4.
    pub fn packed_register(&self) -> Result<u32> {
        let taps = self.register_taps()?;
        Ok(taps.iter().enumerate().fold(0u32, |packed, (i, row)| {
            packed | (((row.value & 0xFF) as u32) << (8 * i))
        }))
    }

    /// Enable flags of taps 0..4, for the control word tap-enable bits
    pub fn tap_enables(&self) -> Result<[bool; REGISTER_TAPS]> {
        let taps = self.register_taps()?;
        let mut enables = [false; REGISTER_TAPS];
        for (slot, row) in enables.iter_mut().zip(taps) {
            *slot = row.enabled;
        }
        Ok(enables)
    }

    /// Tap weights as the device applies them: the COEF byte of each
    /// enabled tap, zero for disabled taps.
    pub fn register_weights(&self) -> Result<[i64; REGISTER_TAPS]> {
        let taps = self.register_taps()?;
        let mut weights = [0; REGISTER_TAPS];
        for (weight, row) in weights.iter_mut().zip(taps) {
            if row.enabled {
                *weight = row.value & 0xFF;
            }
        }
        Ok(weights)
    }

    fn register_taps(&self) -> Result<Vec<&CoefficientRow>> {
        let taps: Vec<&CoefficientRow> = (0..REGISTER_TAPS).filter_map(|i| self.get(i)).collect();
        if taps.len() < REGISTER_TAPS {
            let missing = (0..REGISTER_TAPS)
                .filter(|&i| self.get(i).is_none())
                .collect();
            return Err(FirError::MissingTap(missing));
        }
        Ok(taps)
    }
}

fn parse_row(line: &str, line_no: usize, origin: &Path) -> Result<CoefficientRow> {
    let err = |reason: String| FirError::parse(origin, line_no, line, reason);

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [index, enabled, value] = fields.as_slice() else {
        return Err(err(format!(
            "expected 3 fields (index,enabled,value), found {}",
            fields.len()
        )));
    };

    let index = parse_int(index).map_err(|e| err(format!("invalid tap index: {}", e)))?;
    let index =
        usize::try_from(index).map_err(|_| err(format!("tap index {} is negative", index)))?;

    let enabled = match parse_int(enabled).map_err(|e| err(format!("invalid enable flag: {}", e)))? {
        0 => false,
        1 => true,
        other => return Err(err(format!("enable flag must be 0 or 1, found {}", other))),
    };

    let value = parse_hex(value).map_err(|e| err(format!("invalid coefficient value: {}", e)))?;

    Ok(CoefficientRow {
        index,
        enabled,
        value,
    })
}
