use super::*;
use std::collections::{BTreeMap, BTreeSet};

impl Planner {
    /// Converts packed bins into numbered board layouts with kerf removed.
    pub(super) fn build_layouts(&self, bins: &[Bin]) -> Vec<BoardLayout> {
        let kerf = self.request.kerf;
        bins.iter()
            .enumerate()
            .map(|(idx, bin)| BoardLayout {
                board_number: idx as u32 + 1,
                cuts: bin
                    .cuts()
                    .iter()
                    .map(|cut| PlacedCut {
                        part: cut.part.clone(),
                        length: cut.length - kerf,
                        padded_length: cut.length,
                    })
                    .collect(),
                leftover: bin.remainder(),
            })
            .collect()
    }

    /// Computes board usage, waste, and how widely each part is spread.
    pub(super) fn calculate_summary(&self, layouts: &[BoardLayout]) -> Summary {
        let total_boards = layouts.len() as u32;
        let total_cuts = layouts.iter().map(|l| l.cuts.len() as u32).sum();
        let total_length = total_boards as f64 * self.request.board_length;
        let used_length: f64 = layouts
            .iter()
            .flat_map(|l| &l.cuts)
            .map(|c| c.length)
            .sum();
        let waste_length = total_length - used_length;
        let waste_percentage = if total_length > 0.0 {
            (waste_length / total_length) * 100.0
        } else {
            0.0
        };

        let mut boards_per_part: BTreeMap<String, u32> = self
            .request
            .named_parts()
            .map(|(name, _)| (name.to_string(), 0))
            .collect();
        for layout in layouts {
            let parts: BTreeSet<&str> = layout
                .cuts
                .iter()
                .filter_map(|c| c.part.as_deref())
                .collect();
            for part in parts {
                *boards_per_part.entry(part.to_string()).or_insert(0) += 1;
            }
        }

        Summary {
            total_boards,
            total_cuts,
            total_length,
            used_length,
            waste_length,
            waste_percentage,
            boards_per_part,
        }
    }
}
