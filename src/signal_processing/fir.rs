use super::FirFilterCore;
use crate::error::Result;

/// Direct-form causal FIR filter
///
/// Computes `y[i] = sum(x[i-j] * h[j])` over `j` in `0..taps.len()`, with
/// samples before the start of the input treated as zero. Every call to
/// [`FirFilter::apply`] starts from an empty delay line, so the output only
/// depends on the input and the taps.
///
/// # Example
/// ```
/// use firlab::signal_processing::FirFilter;
///
/// let filter = FirFilter::new(vec![1, 1]);
/// assert_eq!(filter.apply(&[1, 2, 3, 4, 5])?, vec![1, 3, 5, 7, 9]);
/// # Ok::<(), firlab::FirError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirFilter {
    taps: Vec<i64>,
}

impl FirFilter {
    pub fn new(taps: Vec<i64>) -> Self {
        Self { taps }
    }

    pub fn taps(&self) -> &[i64] {
        &self.taps
    }

    /// Filter `samples`; the output has the same length as the input.
    ///
    /// # Errors
    /// `FirError::Overflow` if a sum of products does not fit in `i128`.
    pub fn apply(&self, samples: &[i64]) -> Result<Vec<i128>> {
        log::debug!(
            "Filtering {} samples with {} taps",
            samples.len(),
            self.taps.len()
        );
        FirFilterCore::new(self.taps.clone()).process_buffer(samples)
    }
}

/// Filter `samples` with `taps` in one call.
pub fn apply_fir(samples: &[i64], taps: &[i64]) -> Result<Vec<i128>> {
    FirFilter::new(taps.to_vec()).apply(samples)
}
