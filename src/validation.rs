//! Chip-hold validation results
//!
//! CSV files with a header line and `chip_index,hold[,...]` rows, as written
//! by the chip validation runs. Only the first two columns are used.

use std::fs;
use std::path::Path;

use crate::error::{FirError, Result};
use crate::io::parse_int;
use crate::output::LabeledSeries;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipHoldData {
    /// Chip identifiers, kept verbatim
    pub chip_indices: Vec<String>,
    pub chip_hold: Vec<i64>,
}

impl ChipHoldData {
    pub fn len(&self) -> usize {
        self.chip_hold.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chip_hold.is_empty()
    }

    /// Hold values as a series keyed by chip identifier
    pub fn to_series(&self, label: impl Into<String>) -> LabeledSeries {
        LabeledSeries::from_samples(label, &self.chip_hold)
            .with_x_labels(self.chip_indices.clone())
    }
}

pub fn load_chip_hold<P: AsRef<Path>>(path: P) -> Result<ChipHoldData> {
    let path = path.as_ref();
    log::debug!("Reading chip hold file {}", path.display());

    let text = fs::read_to_string(path).map_err(|source| FirError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data = parse_chip_hold(&text, path)?;

    log::debug!(
        "Finished reading {}, found {} items",
        path.display(),
        data.len()
    );
    Ok(data)
}

pub fn parse_chip_hold(text: &str, origin: &Path) -> Result<ChipHoldData> {
    let mut data = ChipHoldData::default();

    for (i, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        let (Some(index), Some(hold)) = (fields.next(), fields.next()) else {
            return Err(FirError::parse(
                origin,
                i + 1,
                line,
                "expected at least 2 fields (index,hold)",
            ));
        };
        let hold = parse_int(hold)
            .map_err(|e| FirError::parse(origin, i + 1, line, format!("invalid hold value: {}", e)))?;

        data.chip_indices.push(index.to_string());
        data.chip_hold.push(hold);
    }

    Ok(data)
}
