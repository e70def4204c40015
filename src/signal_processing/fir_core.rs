use crate::error::{FirError, Result};

/// Integer FIR filter core with a ring-buffer delay line
///
/// Accumulates in `i128` with checked arithmetic: a single product of 64-bit
/// values always fits, but a sum of extreme products can exceed `i128` and is
/// reported instead of wrapping. Shared by [`super::FirFilter`] and the
/// device emulator.
pub struct FirFilterCore {
    taps: Vec<i64>,
    delay_line: Vec<i64>,
    pos: usize,
}

impl FirFilterCore {
    /// Create a new FIR filter core with the given tap coefficients
    pub fn new(taps: Vec<i64>) -> Self {
        Self {
            delay_line: vec![0; taps.len()],
            taps,
            pos: 0,
        }
    }

    /// Process a single sample through the filter
    ///
    /// Returns `None` if the accumulated sum does not fit in `i128`; the
    /// sample is still pushed into the delay line.
    pub fn process(&mut self, sample: i64) -> Option<i128> {
        let n = self.taps.len();
        if n == 0 {
            return Some(0);
        }

        self.delay_line[self.pos] = sample;

        let mut output = Some(0i128);

        // Walk the ring buffer newest-first as two contiguous reverse ranges
        // so the inner loop needs no modulo.
        let mut tap_i = 0usize;
        for delay_idx in (0..=self.pos).rev() {
            output = output.and_then(|acc| self.mac(acc, tap_i, delay_idx));
            tap_i += 1;
        }
        for delay_idx in ((self.pos + 1)..n).rev() {
            output = output.and_then(|acc| self.mac(acc, tap_i, delay_idx));
            tap_i += 1;
        }
        debug_assert_eq!(tap_i, n);

        self.pos += 1;
        if self.pos == n {
            self.pos = 0;
        }
        output
    }

    fn mac(&self, acc: i128, tap_i: usize, delay_idx: usize) -> Option<i128> {
        i128::from(self.taps[tap_i])
            .checked_mul(i128::from(self.delay_line[delay_idx]))
            .and_then(|product| acc.checked_add(product))
    }

    /// Process a buffer of samples, returning one output per input
    ///
    /// # Errors
    /// `FirError::Overflow` naming the first sample whose sum exceeds `i128`.
    pub fn process_buffer(&mut self, samples: &[i64]) -> Result<Vec<i128>> {
        samples
            .iter()
            .enumerate()
            .map(|(index, &s)| self.process(s).ok_or(FirError::Overflow { index }))
            .collect()
    }

    /// Zero the delay line
    pub fn reset(&mut self) {
        self.delay_line.fill(0);
        self.pos = 0;
    }

    /// Replace the taps; a length change also resets the delay line.
    pub fn set_taps(&mut self, taps: &[i64]) {
        if taps.len() != self.taps.len() {
            self.delay_line = vec![0; taps.len()];
            self.pos = 0;
        }
        self.taps.clear();
        self.taps.extend_from_slice(taps);
    }

    /// Get the number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    pub fn taps(&self) -> &[i64] {
        &self.taps
    }
}
