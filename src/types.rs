use ndarray::{Array2, Array3};

/// Per-sample feature matrix with shape `(seq_len, feat_dim)`.
/// Example: a 120-step recording of 7 sensor channels is `(120, 7)`.
pub type FeatureMatrix = Array2<f64>;
/// Observed-polarity mask aligned 1:1 with a [`FeatureMatrix`] (`true` = keep).
pub type KeepMask = Array2<bool>;
/// Batched real-valued tensor with shape `(batch, max_len, feat_dim)`.
pub type BatchTensor = Array3<f64>;
/// Batched boolean tensor with shape `(batch, max_len, feat_dim)`.
pub type BatchMask = Array3<bool>;
