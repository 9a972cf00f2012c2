//! Hull moving average built from three weighted moving average passes.

use super::wma::wma;

/// Window lengths derived from a Hull length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HullLengths {
    pub full: usize,
    pub half: usize,
    pub sqrt: usize,
}

impl HullLengths {
    pub fn from_length(length: usize) -> Self {
        let full = length.max(1);
        Self {
            full,
            half: (full / 2).max(1),
            sqrt: ((full as f64).sqrt().round() as usize).max(1),
        }
    }

    /// Index of the first sample that can be present on a gap-free input
    pub fn warmup(&self) -> usize {
        (self.full.max(self.half) - 1).saturating_add(self.sqrt - 1)
    }
}

/// Hull moving average: `WMA(2 * WMA(x, L/2) - WMA(x, L), sqrt(L))`.
///
/// Missing samples in either inner average make the difference missing, and
/// that gap propagates through the outer pass like any missing input. A
/// difference that is not representable as a finite `f64` is missing too.
pub fn hma(values: &[Option<f64>], length: usize) -> Vec<Option<f64>> {
    let lengths = HullLengths::from_length(length);
    let wma_half = wma(values, lengths.half);
    let wma_full = wma(values, lengths.full);

    let diff: Vec<Option<f64>> = wma_half
        .iter()
        .zip(&wma_full)
        .map(|(half, full)| match (half, full) {
            (Some(half), Some(full)) => Some(half + (half - full)).filter(|d| d.is_finite()),
            _ => None,
        })
        .collect();

    wma(&diff, lengths.sqrt)
}
