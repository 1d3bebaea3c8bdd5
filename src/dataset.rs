use crate::config::MaskConfig;
use crate::data::{MaskedSample, NormStats};
use crate::errors::MaskError;
use crate::mask::MaskGenerator;
use crate::types::FeatureMatrix;

/// In-memory sample set that draws a fresh missingness mask per access.
///
/// Features are standardized once at construction when statistics are given
/// (`(x - mean) / std`, per feature); accesses after that only clone the
/// stored matrix and attach a newly drawn keep mask, so the same index
/// yields a different mask on every call while the features stay fixed.
pub struct SampleSet<L> {
    samples: Vec<FeatureMatrix>,
    labels: Vec<L>,
    generator: MaskGenerator,
    feat_dim: usize,
}

impl<L: Clone> SampleSet<L> {
    /// Build a sample set over pre-loaded feature matrices and labels.
    ///
    /// Rejects empty sets, sample/label count mismatches, inconsistent
    /// feature dimensionality, zero-length sequences, mis-sized statistics,
    /// and non-positive standard deviations, along with any mask-config
    /// violation surfaced by [`MaskGenerator::new`].
    pub fn new(
        samples: Vec<FeatureMatrix>,
        labels: Vec<L>,
        stats: Option<&NormStats>,
        mask_config: MaskConfig,
    ) -> Result<Self, MaskError> {
        if samples.is_empty() {
            return Err(MaskError::Configuration("sample set is empty".into()));
        }
        if samples.len() != labels.len() {
            return Err(MaskError::Configuration(format!(
                "{} samples but {} labels",
                samples.len(),
                labels.len()
            )));
        }
        let feat_dim = samples[0].ncols();
        for (index, features) in samples.iter().enumerate() {
            if features.nrows() == 0 {
                return Err(MaskError::EmptySequence { sample: index });
            }
            if features.ncols() != feat_dim {
                return Err(MaskError::FeatureDimMismatch {
                    sample: index,
                    expected: feat_dim,
                    found: features.ncols(),
                });
            }
        }
        mask_config.validate_features(feat_dim)?;

        let mut samples = samples;
        if let Some(stats) = stats {
            if stats.mean.len() != feat_dim || stats.std.len() != feat_dim {
                return Err(MaskError::Configuration(format!(
                    "statistics cover {} features but samples have {}",
                    stats.mean.len().min(stats.std.len()),
                    feat_dim
                )));
            }
            if stats.std.iter().any(|&std| !std.is_finite() || std <= 0.0) {
                return Err(MaskError::Configuration(
                    "standard deviations must be positive and finite".into(),
                ));
            }
            for features in &mut samples {
                for (feature, mut column) in features.columns_mut().into_iter().enumerate() {
                    let mean = stats.mean[feature];
                    let std = stats.std[feature];
                    column.mapv_inplace(|value| (value - mean) / std);
                }
            }
        }

        let generator = MaskGenerator::new(mask_config)?;
        Ok(Self {
            samples,
            labels,
            generator,
            feat_dim,
        })
    }

    /// Number of samples in the set.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the set holds no samples. Construction rejects this state,
    /// so it only exists for API completeness.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Feature dimensionality shared by every sample.
    pub fn feat_dim(&self) -> usize {
        self.feat_dim
    }

    /// Standardized features of one sample, without drawing a mask.
    pub fn features(&self, index: usize) -> Option<&FeatureMatrix> {
        self.samples.get(index)
    }

    /// Return sample `index` with a freshly drawn keep mask and its label.
    pub fn sample(&mut self, index: usize) -> Result<MaskedSample<L>, MaskError> {
        let features = self
            .samples
            .get(index)
            .ok_or(MaskError::SampleIndex {
                index,
                len: self.samples.len(),
            })?
            .clone();
        let keep_mask = self.generator.sample_mask(features.nrows(), self.feat_dim)?;
        Ok(MaskedSample {
            features,
            keep_mask,
            label: self.labels[index].clone(),
        })
    }
}
