use crate::types::Cut;
use serde::{Deserialize, Serialize};

/// Tolerance for length comparisons, absorbs drift from summing padded lengths.
pub const LENGTH_EPSILON: f64 = 1e-9;

/// One physical board and the cuts assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    capacity: f64,
    cuts: Vec<Cut>,
}

impl Bin {
    pub fn new(capacity: f64) -> Self {
        Self {
            capacity,
            cuts: Vec::new(),
        }
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn cuts(&self) -> &[Cut] {
        &self.cuts
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    pub fn used_length(&self) -> f64 {
        self.cuts.iter().map(|c| c.length).sum()
    }

    /// Free length on the board, never below zero.
    pub fn remainder(&self) -> f64 {
        self.free_length().max(0.0)
    }

    pub fn fits(&self, length: f64) -> bool {
        length <= self.free_length() + LENGTH_EPSILON
    }

    // May dip a hair below zero after a tolerated fit
    fn free_length(&self) -> f64 {
        self.capacity - self.used_length()
    }

    /// Appends a cut the caller has already checked with [`Bin::fits`].
    pub(crate) fn push(&mut self, cut: Cut) {
        debug_assert!(self.fits(cut.length));
        self.cuts.push(cut);
    }

    /// Moves every cut of `other` onto the end of this bin.
    pub(crate) fn absorb(&mut self, other: Bin) {
        debug_assert!(other.fits(self.used_length()));
        self.cuts.extend(other.cuts);
    }

    /// True if any cut on this bin belongs to `part`.
    pub fn holds_part(&self, part: &str) -> bool {
        self.cuts.iter().any(|c| c.part.as_deref() == Some(part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remainder_tracks_cuts() {
        let mut bin = Bin::new(96.0);
        assert!(bin.is_empty());
        assert_eq!(bin.remainder(), 96.0);

        bin.push(Cut::ungrouped(30.0));
        bin.push(Cut::for_part(40.0, "leg"));
        assert_eq!(bin.used_length(), 70.0);
        assert_eq!(bin.remainder(), 26.0);
        assert!(bin.fits(26.0));
        assert!(!bin.fits(26.5));
        assert!(bin.holds_part("leg"));
        assert!(!bin.holds_part("shelf"));
    }

    #[test]
    fn test_fits_tolerates_float_drift() {
        let mut bin = Bin::new(0.3);
        bin.push(Cut::ungrouped(0.1));
        bin.push(Cut::ungrouped(0.1));
        // 0.3 - 0.2 comes out just below 0.1
        assert!(bin.remainder() < 0.1);
        assert!(bin.fits(0.1));
    }

    #[test]
    fn test_remainder_never_negative_after_tolerated_fit() {
        let mut bin = Bin::new(0.3);
        for _ in 0..3 {
            assert!(bin.fits(0.1));
            bin.push(Cut::ungrouped(0.1));
        }
        // 0.1 + 0.1 + 0.1 sums past 0.3
        assert!(bin.used_length() > 0.3);
        assert_eq!(bin.remainder(), 0.0);
        assert!(!bin.fits(1e-6));
    }

    #[test]
    fn test_absorb_appends_in_order() {
        let mut a = Bin::new(96.0);
        a.push(Cut::for_part(50.0, "a"));
        let mut b = Bin::new(96.0);
        b.push(Cut::for_part(20.0, "b"));

        a.absorb(b);
        let lengths: Vec<f64> = a.cuts().iter().map(|c| c.length).collect();
        assert_eq!(lengths, vec![50.0, 20.0]);
    }
}
