use crate::bins::Bin;
use crate::packing::pack;
use crate::types::*;
use std::cmp::Ordering;
use tracing::debug;

/// A way of assigning every cut of a request to boards.
pub trait Strategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn solve(&self, request: &CutRequest) -> Result<Vec<Bin>>;
}

impl StrategyKind {
    pub fn strategy(self) -> &'static dyn Strategy {
        match self {
            StrategyKind::Global => &GlobalStrategy,
            StrategyKind::Grouped => &GroupedStrategy,
        }
    }
}

/// Packs all cuts as one list. Fewest boards, parts may be scattered.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalStrategy;

impl Strategy for GlobalStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Global
    }

    fn solve(&self, request: &CutRequest) -> Result<Vec<Bin>> {
        let bins = pack(&request.all_cuts(), request.usable_length, None)?;
        debug!(boards = bins.len(), "global allocation finished");
        Ok(bins)
    }
}

/// Packs each part on its own boards, merges boards that fit together, then
/// fills leftover space with the ungrouped cuts.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupedStrategy;

impl Strategy for GroupedStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Grouped
    }

    fn solve(&self, request: &CutRequest) -> Result<Vec<Bin>> {
        let mut bins = Vec::new();
        for (name, lengths) in request.named_parts() {
            if lengths.is_empty() {
                continue;
            }
            let cuts: Vec<Cut> = lengths.iter().map(|&l| Cut::for_part(l, name)).collect();
            bins.extend(pack(&cuts, request.usable_length, None)?);
        }

        let per_part = bins.len();
        let bins = merge_bins(bins);
        debug!(before = per_part, after = bins.len(), "merged part boards");

        let misc: Vec<Cut> = request
            .ungrouped()
            .iter()
            .map(|&l| Cut::ungrouped(l))
            .collect();
        let existing = if bins.is_empty() { None } else { Some(bins) };
        let bins = pack(&misc, request.usable_length, existing)?;

        debug!(boards = bins.len(), "grouped allocation finished");
        Ok(bins)
    }
}

/// Folds bins into one another where a whole bin fits in another's free space.
///
/// Bins are ordered fullest first. Each bin `i` takes in the first later bin
/// whose remainder can hold all of `i`'s cuts, at most one per `i`.
pub fn merge_bins(mut bins: Vec<Bin>) -> Vec<Bin> {
    bins.sort_by(|a, b| {
        b.used_length()
            .partial_cmp(&a.used_length())
            .unwrap_or(Ordering::Equal)
    });

    let mut i = 0;
    while i + 1 < bins.len() {
        let used = bins[i].used_length();
        if let Some(j) = (i + 1..bins.len()).find(|&j| bins[j].fits(used)) {
            let other = bins.remove(j);
            bins[i].absorb(other);
        }
        i += 1;
    }

    bins
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(parts: Vec<(&str, Vec<f64>)>, ungrouped: Vec<f64>, usable: f64) -> CutRequest {
        let mut all: Vec<PartCuts> = parts
            .into_iter()
            .map(|(name, cuts)| PartCuts::Grouped {
                name: name.to_string(),
                cuts,
            })
            .collect();
        all.push(PartCuts::Ungrouped { cuts: ungrouped });
        CutRequest {
            board_length: usable,
            usable_length: usable,
            kerf: 0.0,
            parts: all,
        }
    }

    fn bin_with(parts: &[(&str, f64)]) -> Bin {
        let mut bin = Bin::new(96.0);
        for &(part, length) in parts {
            bin.push(Cut::for_part(length, part));
        }
        bin
    }

    fn sorted_lengths(bins: &[Bin]) -> Vec<f64> {
        let mut all: Vec<f64> = bins
            .iter()
            .flat_map(|b| b.cuts().iter().map(|c| c.length))
            .collect();
        all.sort_by(|a, b| a.partial_cmp(b).unwrap());
        all
    }

    #[test]
    fn test_global_ignores_parts() {
        let req = request(
            vec![("a", vec![50.0]), ("b", vec![40.0])],
            vec![6.0],
            96.0,
        );
        let bins = GlobalStrategy.solve(&req).unwrap();
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].remainder(), 0.0);
    }

    #[test]
    fn test_grouped_fills_tightest_part_board_with_misc() {
        let req = request(
            vec![("partA", vec![30.0, 30.0]), ("partB", vec![40.0])],
            vec![10.0],
            96.0,
        );
        let bins = GroupedStrategy.solve(&req).unwrap();

        assert_eq!(bins.len(), 2);
        let a = bins.iter().find(|b| b.holds_part("partA")).unwrap();
        let b = bins.iter().find(|b| b.holds_part("partB")).unwrap();
        assert!(!a.holds_part("partB"));
        assert_eq!(a.cuts().len(), 3);
        assert_eq!(a.remainder(), 26.0);
        assert_eq!(b.remainder(), 56.0);
    }

    #[test]
    fn test_grouped_merges_small_parts() {
        let req = request(
            vec![("a", vec![30.0]), ("b", vec![20.0]), ("c", vec![25.0])],
            vec![],
            96.0,
        );
        let bins = GroupedStrategy.solve(&req).unwrap();
        // a(30) takes in c(25), then b(20) is last and left alone
        assert_eq!(bins.len(), 2);
        assert_eq!(sorted_lengths(&bins), vec![20.0, 25.0, 30.0]);
        for bin in &bins {
            assert!(bin.used_length() <= 96.0);
        }
    }

    #[test]
    fn test_grouped_with_only_ungrouped_cuts_matches_global() {
        let req = request(vec![], vec![48.0, 48.0, 48.0], 96.0);
        let grouped = GroupedStrategy.solve(&req).unwrap();
        let global = GlobalStrategy.solve(&req).unwrap();
        assert_eq!(grouped, global);
        assert_eq!(grouped.len(), 2);
    }

    #[test]
    fn test_empty_request_yields_single_empty_board() {
        let req = request(vec![], vec![], 96.0);
        assert_eq!(GlobalStrategy.solve(&req).unwrap().len(), 1);
        assert_eq!(GroupedStrategy.solve(&req).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_named_part_contributes_no_board() {
        let req = request(vec![("empty", vec![]), ("a", vec![10.0])], vec![], 96.0);
        let bins = GroupedStrategy.solve(&req).unwrap();
        assert_eq!(bins.len(), 1);
        assert!(!bins[0].holds_part("empty"));
    }

    #[test]
    fn test_empty_named_part_leaves_no_empty_board_after_merge() {
        let req = request(
            vec![("a", vec![50.0]), ("b", vec![40.0]), ("c", vec![])],
            vec![],
            96.0,
        );
        let bins = GroupedStrategy.solve(&req).unwrap();
        // a and b share a board; c never gets one
        assert_eq!(bins.len(), 1);
        assert!(bins.iter().all(|b| !b.is_empty()));
    }

    #[test]
    fn test_merge_orders_fullest_first_and_takes_first_match() {
        let bins = vec![
            bin_with(&[("small", 10.0)]),
            bin_with(&[("big", 70.0)]),
            bin_with(&[("mid", 40.0)]),
        ];
        let merged = merge_bins(bins);
        // big(70): mid rem 56 < 70, small rem 86 >= 70 -> big+small
        // mid(40) is then last and left alone
        assert_eq!(merged.len(), 2);
        let lengths: Vec<f64> = merged[0].cuts().iter().map(|c| c.length).collect();
        assert_eq!(lengths, vec![70.0, 10.0]);
        assert!(merged[1].holds_part("mid"));
    }

    #[test]
    fn test_merge_never_exceeds_capacity() {
        let bins = vec![
            bin_with(&[("a", 60.0)]),
            bin_with(&[("b", 50.0)]),
            bin_with(&[("c", 46.0)]),
        ];
        let merged = merge_bins(bins);
        // no pair fits together except b+c (96 exactly)
        assert_eq!(merged.len(), 2);
        for bin in &merged {
            assert!(bin.used_length() <= 96.0);
        }
    }

    #[test]
    fn test_global_never_uses_more_boards_than_grouped() {
        let req = request(
            vec![
                ("legs", vec![28.0, 28.0, 28.0, 28.0]),
                ("rails", vec![45.0, 45.0, 18.0, 18.0]),
                ("top", vec![60.0, 60.0, 60.0]),
            ],
            vec![12.0, 9.0, 30.0],
            96.0,
        );
        let global = GlobalStrategy.solve(&req).unwrap();
        let grouped = GroupedStrategy.solve(&req).unwrap();

        assert!(global.len() <= grouped.len());
        assert_eq!(sorted_lengths(&global), sorted_lengths(&grouped));
        assert_eq!(
            global.iter().map(|b| b.cuts().len()).sum::<usize>(),
            req.cut_count()
        );
        for bin in global.iter().chain(grouped.iter()) {
            assert!(bin.used_length() <= req.usable_length);
        }
    }

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(StrategyKind::Global.strategy().kind(), StrategyKind::Global);
        assert_eq!(StrategyKind::Grouped.strategy().kind(), StrategyKind::Grouped);
    }
}
