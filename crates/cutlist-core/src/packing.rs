use crate::bins::{Bin, LENGTH_EPSILON};
use crate::types::*;
use std::cmp::Ordering;
use tracing::debug;

/// Packs cuts onto boards using best-fit decreasing.
///
/// Cuts are placed longest first. Each cut goes onto the bin it fills most
/// tightly (smallest remainder that still holds it), the lowest index winning
/// ties. A new bin is opened only when no bin has room.
///
/// Packing continues from `existing` when given, otherwise from a single empty
/// bin. Bins present on entry are returned even if nothing was added to them.
pub fn pack(cuts: &[Cut], usable_length: f64, existing: Option<Vec<Bin>>) -> Result<Vec<Bin>> {
    if !usable_length.is_finite() || usable_length <= 0.0 {
        return Err(CutlistError::InvalidCut(format!(
            "usable length must be positive, got {}",
            usable_length
        )));
    }

    for cut in cuts {
        if !cut.length.is_finite() || cut.length <= 0.0 {
            return Err(CutlistError::InvalidCut(format!(
                "cut length must be positive, got {}",
                cut.length
            )));
        }
        if cut.length > usable_length + LENGTH_EPSILON {
            return Err(CutlistError::InvalidCut(format!(
                "cut of {} exceeds usable length {}",
                cut.length, usable_length
            )));
        }
    }

    if let Some(bin) = existing
        .iter()
        .flatten()
        .find(|bin| (bin.capacity() - usable_length).abs() > LENGTH_EPSILON)
    {
        return Err(CutlistError::InvalidCut(format!(
            "existing bin has capacity {}, expected {}",
            bin.capacity(),
            usable_length
        )));
    }

    let mut bins = existing.unwrap_or_else(|| vec![Bin::new(usable_length)]);

    let mut sorted = cuts.to_vec();
    // Stable, so equal lengths keep their input order
    sorted.sort_by(|a, b| b.length.partial_cmp(&a.length).unwrap_or(Ordering::Equal));

    for cut in sorted {
        match best_fit(&bins, cut.length) {
            Some(idx) => bins[idx].push(cut),
            None => {
                let mut bin = Bin::new(usable_length);
                bin.push(cut);
                bins.push(bin);
            }
        }
    }

    debug!(cuts = cuts.len(), bins = bins.len(), "packed cuts");
    Ok(bins)
}

/// Index of the bin with the smallest remainder that still holds `length`.
fn best_fit(bins: &[Bin], length: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, bin) in bins.iter().enumerate() {
        if !bin.fits(length) {
            continue;
        }
        let remainder = bin.remainder();
        match best {
            Some((_, best_remainder)) if remainder >= best_remainder => {}
            _ => best = Some((idx, remainder)),
        }
    }

    best.map(|(idx, _)| idx)
}
