use missingness::stats::{mask_stats, masked_run_lengths};
use missingness::{MaskConfig, MaskDistribution, MaskGenerator, MaskMode};
use ndarray::Array2;

const SEQ_LEN: usize = 2000;
const TRIALS: usize = 20;
const RATIO_TOLERANCE: f64 = 0.05;

fn geometric_generator(masking_ratio: f64, mean_run_length: f64, seed: u64) -> MaskGenerator {
    MaskGenerator::new(MaskConfig {
        masking_ratio,
        mean_run_length,
        mode: MaskMode::Separate,
        distribution: MaskDistribution::Geometric,
        exclude_features: Vec::new(),
        seed,
    })
    .expect("valid statistical config")
}

fn column_mask(values: Vec<bool>) -> Array2<bool> {
    let len = values.len();
    Array2::from_shape_vec((len, 1), values).expect("column shape")
}

#[test]
fn masked_fraction_converges_to_the_masking_ratio() {
    for (combo, &masking_ratio) in [0.1, 0.3, 0.5].iter().enumerate() {
        for (inner, &mean_run_length) in [1.0, 3.0, 10.0].iter().enumerate() {
            let seed = 1000 + (combo * 3 + inner) as u64;
            let mut generator = geometric_generator(masking_ratio, mean_run_length, seed);
            let mut masked = 0usize;
            for _ in 0..TRIALS {
                let mask = generator.single_sequence_mask(SEQ_LEN);
                masked += mask.iter().filter(|&&keep| !keep).count();
            }
            let fraction = masked as f64 / (TRIALS * SEQ_LEN) as f64;
            assert!(
                (fraction - masking_ratio).abs() < RATIO_TOLERANCE,
                "ratio {masking_ratio}, run length {mean_run_length}: got fraction {fraction}"
            );
        }
    }
}

#[test]
fn masked_run_lengths_converge_to_the_configured_mean() {
    for (combo, &mean_run_length) in [1.0, 3.0, 10.0].iter().enumerate() {
        let seed = 2000 + combo as u64;
        let mut generator = geometric_generator(0.3, mean_run_length, seed);
        let mut runs = Vec::new();
        for _ in 0..TRIALS {
            let mask = generator.single_sequence_mask(SEQ_LEN);
            runs.extend(masked_run_lengths(mask));
        }
        assert!(!runs.is_empty());
        let mean = runs.iter().sum::<usize>() as f64 / runs.len() as f64;
        let tolerance = (mean_run_length * 0.2).max(0.4);
        assert!(
            (mean - mean_run_length).abs() < tolerance,
            "run length {mean_run_length}: got mean {mean} over {} runs",
            runs.len()
        );
    }
}

#[test]
fn bernoulli_masking_hits_the_ratio_without_run_structure() {
    let mut generator = MaskGenerator::new(MaskConfig {
        masking_ratio: 0.3,
        distribution: MaskDistribution::Bernoulli,
        seed: 3000,
        ..MaskConfig::default()
    })
    .expect("config");
    let mask = generator.sample_mask(SEQ_LEN, 4).expect("mask");
    let stats = mask_stats(&mask).expect("stats");
    assert!((stats.masked_fraction - 0.3).abs() < RATIO_TOLERANCE);
    // Independent draws keep runs short: mean length is 1/(1-ratio), far
    // below what a geometric chain with the default mean would produce.
    assert!(stats.mean_masked_run_length < 2.0);
}

#[test]
fn stats_helpers_agree_with_a_hand_checked_walk() {
    let mask = column_mask(vec![false, false, true, false, true, true, false, false]);
    let stats = mask_stats(&mask).expect("stats");
    assert_eq!(stats.masked_cells, 5);
    assert_eq!(stats.masked_runs, 3);
    assert!((stats.mean_masked_run_length - 5.0 / 3.0).abs() < 1e-12);
}

#[test]
fn concurrent_masks_share_one_walk_across_features() {
    let mut generator = MaskGenerator::new(MaskConfig {
        masking_ratio: 0.4,
        mode: MaskMode::Concurrent,
        seed: 4000,
        ..MaskConfig::default()
    })
    .expect("config");
    for _ in 0..8 {
        let mask = generator.sample_mask(200, 6).expect("mask");
        for row in mask.rows() {
            let first = row[0];
            assert!(row.iter().all(|&keep| keep == first));
        }
    }
}

#[test]
fn excluded_features_never_mask_under_separate_geometric() {
    for excluded in 0..4 {
        let mut generator = MaskGenerator::new(MaskConfig {
            masking_ratio: 0.5,
            exclude_features: vec![excluded],
            seed: 5000 + excluded as u64,
            ..MaskConfig::default()
        })
        .expect("config");
        for _ in 0..8 {
            let mask = generator.sample_mask(256, 4).expect("mask");
            assert!(mask.column(excluded).iter().all(|&keep| keep));
            // The other columns are genuinely masked at this ratio and length.
            let stats = mask_stats(&mask).expect("stats");
            assert!(stats.masked_cells > 0);
        }
    }
}
