use std::f32::consts::TAU;

/*
Hann Window
===========

Each grain is faded in and out with a raised-cosine (Hann) window so the
overlap-add of many grains has no clicks at grain boundaries.

    w[i] = 0.5 · (1 − cos(2π · i / (L − 1)))      for i in 0..L

  Amplitude
    1.0 ┤        ▁▃▅▇█▇▅▃▁
        │     ▁▃▅         ▅▃▁
    0.0 ┼▁▃▅▇               ▇▅▃▁ ─→ i
        0                     L-1

The table is symmetric, starts and ends at exactly 0.0, and peaks at 1.0 in
the middle. At 50% overlap two Hann windows sum to (almost) a constant,
which is why 50% is the default grain spacing.

The table is precomputed because cos() per grain sample per block is wasted
work; it only changes when the grain length changes. Storage is reserved for
the largest length up front so `resize` never reallocates on the audio thread.
*/

#[derive(Debug, Clone)]
pub struct HannWindow {
    table: Vec<f32>,
}

impl HannWindow {
    /// Build a table of `len` frames, reserving room for `max_len`.
    pub fn with_capacity(len: usize, max_len: usize) -> Self {
        let mut window = Self {
            table: Vec::with_capacity(max_len.max(len)),
        };
        window.resize(len);
        window
    }

    pub fn new(len: usize) -> Self {
        Self::with_capacity(len, len)
    }

    /// Recompute the table for a new length. Lengths below 2 are raised to 2.
    pub fn resize(&mut self, len: usize) {
        let len = len.max(2);
        self.table.clear();
        let denom = (len - 1) as f32;
        self.table
            .extend((0..len).map(|i| 0.5 * (1.0 - (TAU * i as f32 / denom).cos())));
    }

    /// Window gain at `index`; 1.0 past the end of the table.
    #[inline]
    pub fn gain(&self, index: usize) -> f32 {
        self.table.get(index).copied().unwrap_or(1.0)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_zero_and_peak_is_one() {
        let window = HannWindow::new(101);
        assert!(window.gain(0).abs() < 1e-6);
        assert!(window.gain(100).abs() < 1e-6);
        assert!((window.gain(50) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn is_symmetric() {
        let window = HannWindow::new(64);
        let table = window.as_slice();
        for i in 0..table.len() {
            let mirrored = table[table.len() - 1 - i];
            assert!((table[i] - mirrored).abs() < 1e-5, "asymmetry at {i}");
        }
    }

    #[test]
    fn past_end_is_unity() {
        let window = HannWindow::new(8);
        assert_eq!(window.gain(8), 1.0);
        assert_eq!(window.gain(1_000), 1.0);
    }

    #[test]
    fn degenerate_length_is_raised_to_two() {
        let window = HannWindow::new(0);
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn resize_within_capacity_keeps_allocation() {
        let mut window = HannWindow::with_capacity(64, 4096);
        let before = window.as_slice().as_ptr();
        window.resize(2400);
        window.resize(32);
        assert_eq!(window.as_slice().as_ptr(), before);
        assert_eq!(window.len(), 32);
    }
}
