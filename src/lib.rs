#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Batch collation and magnitude compensation.
pub mod collate;
/// Masking, collation, and loader configuration types.
pub mod config;
/// Centralized constants used across masking and loading.
pub mod constants;
/// Sample, batch, and normalization data types.
pub mod data;
/// In-memory sample sets with per-access mask draws.
pub mod dataset;
/// Epoch-aware batch loading and background prefetching.
pub mod loader;
/// Stochastic missingness mask generation.
pub mod mask;
/// Padding mask construction from true sequence lengths.
pub mod padding;
/// Empirical mask statistics helpers.
pub mod stats;
/// Shared type aliases.
pub mod types;

mod errors;
mod rng;

pub use collate::{collate, compensate_masking};
pub use config::{CollateOptions, LoaderConfig, MaskConfig, MaskDistribution, MaskMode};
pub use data::{ImputationBatch, MaskedSample, NormStats};
pub use dataset::SampleSet;
pub use errors::MaskError;
pub use loader::{BatchLoader, BatchPrefetcher};
pub use mask::MaskGenerator;
pub use padding::padding_mask;
pub use stats::{mask_stats, masked_run_lengths, MaskStats};
pub use types::{BatchMask, BatchTensor, FeatureMatrix, KeepMask};
