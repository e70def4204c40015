use std::fs;
use std::path::Path;

use super::literal::parse_int;
use crate::error::{FirError, Result};

/// Input sample, one per line of a vector file
pub type Sample = i64;

/// Load a sample vector from a file
///
/// The file holds one integer literal per line; blank lines are skipped.
/// See [`crate::io::literal`] for the accepted literal forms.
///
/// # Errors
/// `FirError::Io` if the file cannot be read, `FirError::Parse` naming the
/// first line that is not a valid literal.
pub fn load_vector<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    log::debug!("Opening vector file {}", path.display());

    let text = fs::read_to_string(path).map_err(|source| FirError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let samples = parse_vector(&text, path)?;

    log::info!("Loaded {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Parse vector file contents; `origin` is only used in error messages.
pub fn parse_vector(text: &str, origin: &Path) -> Result<Vec<Sample>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            parse_int(line).map_err(|reason| FirError::parse(origin, i + 1, line, reason))
        })
        .collect()
}
