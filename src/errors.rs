use thiserror::Error;

/// Error type for mask generation, collation, and loader failures.
#[derive(Debug, Error)]
pub enum MaskError {
    #[error("masking ratio {0} must lie strictly between 0 and 1")]
    MaskingRatio(f64),
    #[error("mean run length {0} must be positive and finite")]
    MeanRunLength(f64),
    #[error("excluded feature index {index} is out of range for {feat_dim} features")]
    ExcludedFeature { index: usize, feat_dim: usize },
    #[error("mask shape ({seq_len}, {feat_dim}) must have positive dimensions")]
    DegenerateShape { seq_len: usize, feat_dim: usize },
    #[error("sample {sample} has a zero-length sequence")]
    EmptySequence { sample: usize },
    #[error("sample {sample} has {found} features but the batch expects {expected}")]
    FeatureDimMismatch {
        sample: usize,
        expected: usize,
        found: usize,
    },
    #[error("sample {sample} mask shape {mask:?} does not match feature shape {features:?}")]
    MaskShape {
        sample: usize,
        features: (usize, usize),
        mask: (usize, usize),
    },
    #[error("cannot collate an empty batch")]
    EmptyBatch,
    #[error("maximum sequence length must be positive")]
    ZeroMaxLen,
    #[error("sample index {index} is out of range for a set of {len}")]
    SampleIndex { index: usize, len: usize },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("background batch worker stopped")]
    WorkerStopped,
}
