use crate::types::KeepMask;

/// Aggregate statistics over one observed-polarity mask.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskStats {
    /// Total number of cells in the mask.
    pub cells: usize,
    /// Number of masked (`false`) cells.
    pub masked_cells: usize,
    /// `masked_cells / cells`.
    pub masked_fraction: f64,
    /// Number of maximal masked runs, summed over feature columns.
    pub masked_runs: usize,
    /// Mean length of masked runs; 0.0 when there are none.
    pub mean_masked_run_length: f64,
}

/// Decompose one sequence into the lengths of its maximal masked runs.
///
/// A run is a maximal streak of `false` (masked) values; `true` values only
/// separate runs and never contribute.
pub fn masked_run_lengths<I>(values: I) -> Vec<usize>
where
    I: IntoIterator<Item = bool>,
{
    let mut runs = Vec::new();
    let mut current = 0usize;
    for keep in values {
        if keep {
            if current > 0 {
                runs.push(current);
                current = 0;
            }
        } else {
            current += 1;
        }
    }
    if current > 0 {
        runs.push(current);
    }
    runs
}

/// Compute [`MaskStats`] for a `(seq_len, feat_dim)` keep mask.
///
/// Runs are counted per feature column (the walk that produced them is
/// per-column too). Returns `None` for empty input.
pub fn mask_stats(keep_mask: &KeepMask) -> Option<MaskStats> {
    if keep_mask.is_empty() {
        return None;
    }
    let cells = keep_mask.len();
    let masked_cells = keep_mask.iter().filter(|&&keep| !keep).count();
    let mut runs = Vec::new();
    for column in keep_mask.columns() {
        runs.extend(masked_run_lengths(column.iter().copied()));
    }
    let masked_runs = runs.len();
    let mean_masked_run_length = if masked_runs == 0 {
        0.0
    } else {
        runs.iter().sum::<usize>() as f64 / masked_runs as f64
    };
    Some(MaskStats {
        cells,
        masked_cells,
        masked_fraction: masked_cells as f64 / cells as f64,
        masked_runs,
        mean_masked_run_length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn run_decomposition_handles_edges() {
        assert_eq!(masked_run_lengths(Vec::new()), Vec::<usize>::new());
        assert_eq!(masked_run_lengths(vec![true, true]), Vec::<usize>::new());
        assert_eq!(masked_run_lengths(vec![false, false, false]), vec![3]);
        assert_eq!(
            masked_run_lengths(vec![false, true, false, false, true, false]),
            vec![1, 2, 1]
        );
    }

    #[test]
    fn stats_count_runs_per_column() {
        let mask = array![
            [false, true],
            [false, true],
            [true, false],
            [false, false],
        ];
        let stats = mask_stats(&mask).expect("stats");
        assert_eq!(stats.cells, 8);
        assert_eq!(stats.masked_cells, 5);
        assert_abs_diff_eq!(stats.masked_fraction, 5.0 / 8.0);
        // Column 0 has runs [2, 1]; column 1 has [2].
        assert_eq!(stats.masked_runs, 3);
        assert_abs_diff_eq!(stats.mean_masked_run_length, 5.0 / 3.0);
    }

    #[test]
    fn empty_masks_yield_no_stats() {
        let mask = KeepMask::from_elem((0, 3), true);
        assert!(mask_stats(&mask).is_none());
    }

    #[test]
    fn all_kept_masks_have_zero_runs() {
        let mask = KeepMask::from_elem((5, 2), true);
        let stats = mask_stats(&mask).expect("stats");
        assert_eq!(stats.masked_runs, 0);
        assert_abs_diff_eq!(stats.mean_masked_run_length, 0.0);
        assert_abs_diff_eq!(stats.masked_fraction, 0.0);
    }
}
