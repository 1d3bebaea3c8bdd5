use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::types::{BatchMask, BatchTensor, FeatureMatrix, KeepMask};

/// Per-feature standardization statistics, consumed as given.
///
/// The crate never computes these; a sample set applies them once at
/// construction as `(x - mean) / std`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NormStats {
    /// Per-feature means, length `feat_dim`.
    pub mean: Array1<f64>,
    /// Per-feature standard deviations, length `feat_dim`; strictly positive.
    pub std: Array1<f64>,
}

/// One sample together with its freshly drawn keep mask and pass-through label.
///
/// `keep_mask` uses observed polarity: `true` = keep/observe, `false` =
/// drop/predict. The batch-level inverted view is [`ImputationBatch::predict_mask`];
/// the two polarities are never mixed under one name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaskedSample<L> {
    /// Feature matrix, shape `(seq_len, feat_dim)`.
    pub features: FeatureMatrix,
    /// Keep mask aligned with `features`.
    pub keep_mask: KeepMask,
    /// Opaque label, passed through collation untouched.
    pub label: L,
}

/// A collated, padded training batch for the imputation objective.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImputationBatch<L> {
    /// Masked (and optionally compensated) features, shape `(batch, max_len, feat_dim)`.
    pub input: BatchTensor,
    /// Unmasked original features; padding positions are zero-filled.
    pub target: BatchTensor,
    /// `true` = masked position that must be predicted; `false` = observed or
    /// padding. Padding never counts as a prediction target.
    pub predict_mask: BatchMask,
    /// `true` = real (non-padding) time step, shape `(batch, max_len)`.
    pub padding_mask: Array2<bool>,
    /// Labels in input order, one per sample.
    pub labels: Vec<L>,
}

impl<L> ImputationBatch<L> {
    /// Number of samples in the batch.
    pub fn batch_size(&self) -> usize {
        self.input.dim().0
    }

    /// Padded sequence length shared by every sample in the batch.
    pub fn max_len(&self) -> usize {
        self.input.dim().1
    }

    /// Feature dimensionality shared by every sample in the batch.
    pub fn feat_dim(&self) -> usize {
        self.input.dim().2
    }
}
