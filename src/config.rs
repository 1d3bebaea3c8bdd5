use serde::{Deserialize, Serialize};

use crate::constants::loader::{DEFAULT_BATCH_SIZE, DEFAULT_LOADER_SEED};
use crate::constants::mask::{DEFAULT_MASKING_RATIO, DEFAULT_MASK_SEED, DEFAULT_MEAN_RUN_LENGTH};
use crate::errors::MaskError;

/// Whether features of one sample are masked independently or in lockstep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskMode {
    /// Each feature column gets its own independently drawn mask.
    Separate,
    /// One mask per time step, replicated across all feature columns.
    Concurrent,
}

/// Which stochastic process drives per-position mask draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskDistribution {
    /// Stateful two-state Markov walk; masked runs are geometrically distributed.
    Geometric,
    /// Independent per-position Bernoulli draws; no run-length structure.
    Bernoulli,
}

/// Mask generation configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaskConfig {
    /// Target long-run fraction of positions masked, strictly inside (0, 1).
    pub masking_ratio: f64,
    /// Mean length of masked runs; ignored for the Bernoulli distribution.
    pub mean_run_length: f64,
    /// Per-feature vs. lockstep masking.
    pub mode: MaskMode,
    /// Markov-chain vs. independent Bernoulli draws.
    pub distribution: MaskDistribution,
    /// Feature columns that are never masked (kept all-`true`), in any mode.
    pub exclude_features: Vec<usize>,
    /// RNG seed that makes generated masks reproducible.
    pub seed: u64,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            masking_ratio: DEFAULT_MASKING_RATIO,
            mean_run_length: DEFAULT_MEAN_RUN_LENGTH,
            mode: MaskMode::Separate,
            distribution: MaskDistribution::Geometric,
            exclude_features: Vec::new(),
            seed: DEFAULT_MASK_SEED,
        }
    }
}

impl MaskConfig {
    /// Check the value-range preconditions that do not depend on a sample shape.
    ///
    /// Exact 0 and 1 ratios leave the Markov chain without defined stopping
    /// probabilities and are rejected rather than special-cased.
    pub fn validate(&self) -> Result<(), MaskError> {
        if !(self.masking_ratio > 0.0 && self.masking_ratio < 1.0) {
            return Err(MaskError::MaskingRatio(self.masking_ratio));
        }
        if !(self.mean_run_length.is_finite() && self.mean_run_length > 0.0) {
            return Err(MaskError::MeanRunLength(self.mean_run_length));
        }
        Ok(())
    }

    /// Check excluded feature indices against a concrete feature dimensionality.
    pub fn validate_features(&self, feat_dim: usize) -> Result<(), MaskError> {
        for &index in &self.exclude_features {
            if index >= feat_dim {
                return Err(MaskError::ExcludedFeature { index, feat_dim });
            }
        }
        Ok(())
    }
}

/// Options recognized by [`crate::collate`].
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct CollateOptions {
    /// Fixed padded length; defaults to the longest sequence in the batch.
    /// Longer sequences are truncated, never extended beyond true length.
    pub max_len: Option<usize>,
    /// Rescale surviving input values to compensate for masked-out magnitude.
    pub compensate: bool,
}

/// Batch loader configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Target number of samples per batch; the final batch of an epoch may be
    /// shorter.
    pub batch_size: usize,
    /// Reshuffle the sample order at every epoch boundary.
    pub shuffle: bool,
    /// Seed for per-epoch order derivation (`seed ^ epoch`).
    pub seed: u64,
    /// Collation options applied to every produced batch.
    pub collate: CollateOptions,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            shuffle: true,
            seed: DEFAULT_LOADER_SEED,
            collate: CollateOptions::default(),
        }
    }
}
