use ndarray::{Array1, Array2};
use rand::Rng;

use crate::config::{MaskConfig, MaskDistribution, MaskMode};
use crate::errors::MaskError;
use crate::rng::DeterministicRng;
use crate::types::KeepMask;

/// Stochastic missingness mask generator for one sample stream.
///
/// Masks use observed polarity throughout: `true` = keep, `false` = drop and
/// predict. In geometric mode, masked and kept runs both follow geometric
/// length distributions whose parameters are derived from the configured
/// masking ratio and mean masked-run length; the chain is started from its
/// stationary distribution so the expected masked fraction holds even for
/// short sequences.
///
/// The generator owns a seeded RNG, so two generators built from the same
/// config produce identical mask streams.
pub struct MaskGenerator {
    config: MaskConfig,
    rng: DeterministicRng,
}

impl MaskGenerator {
    /// Build a generator, rejecting out-of-range ratio or run-length values.
    pub fn new(config: MaskConfig) -> Result<Self, MaskError> {
        config.validate()?;
        let rng = DeterministicRng::new(config.seed);
        Ok(Self { config, rng })
    }

    /// The configuration this generator draws from.
    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    /// Draw one keep mask over a single sequence of `seq_len` positions.
    ///
    /// The walk is a strict left-to-right fold carrying one state bit:
    /// the value written at each position is the current state (`true` while
    /// keeping), after which the state flips with probability `1/mean_run_length`
    /// while masking, or with the keep-side stopping probability while keeping.
    pub fn single_sequence_mask(&mut self, seq_len: usize) -> Vec<bool> {
        let ratio = self.config.masking_ratio;
        let p_mask = 1.0 / self.config.mean_run_length;
        let p_keep = p_mask * ratio / (1.0 - ratio);

        // Stationary start: begin in the masking state with probability `ratio`.
        let mut keeping = self.rng.random::<f64>() > ratio;
        let mut mask = vec![true; seq_len];
        for slot in mask.iter_mut() {
            *slot = keeping;
            let stop = if keeping { p_keep } else { p_mask };
            if self.rng.random::<f64>() < stop {
                keeping = !keeping;
            }
        }
        mask
    }

    /// Draw a `(seq_len, feat_dim)` keep mask for one sample.
    ///
    /// Excluded feature columns stay all-`true` under every mode and
    /// distribution; in `Concurrent` mode the exclusion is applied as a final
    /// override on top of the replicated mask.
    pub fn sample_mask(
        &mut self,
        seq_len: usize,
        feat_dim: usize,
    ) -> Result<KeepMask, MaskError> {
        if seq_len == 0 || feat_dim == 0 {
            return Err(MaskError::DegenerateShape { seq_len, feat_dim });
        }
        self.config.validate_features(feat_dim)?;

        let ratio = self.config.masking_ratio;
        let mut mask = match (self.config.distribution, self.config.mode) {
            (MaskDistribution::Geometric, MaskMode::Separate) => {
                let mut mask = Array2::from_elem((seq_len, feat_dim), true);
                for feature in 0..feat_dim {
                    // Excluded columns draw nothing, keeping the stream
                    // identical to a run without exclusions elsewhere.
                    if self.config.exclude_features.contains(&feature) {
                        continue;
                    }
                    let column = self.single_sequence_mask(seq_len);
                    mask.column_mut(feature).assign(&Array1::from(column));
                }
                mask
            }
            (MaskDistribution::Geometric, MaskMode::Concurrent) => {
                let shared = self.single_sequence_mask(seq_len);
                Array2::from_shape_fn((seq_len, feat_dim), |(step, _)| shared[step])
            }
            (MaskDistribution::Bernoulli, MaskMode::Separate) => {
                let mut mask = Array2::from_elem((seq_len, feat_dim), true);
                for slot in mask.iter_mut() {
                    *slot = self.rng.random::<f64>() >= ratio;
                }
                mask
            }
            (MaskDistribution::Bernoulli, MaskMode::Concurrent) => {
                let shared: Vec<bool> = (0..seq_len)
                    .map(|_| self.rng.random::<f64>() >= ratio)
                    .collect();
                Array2::from_shape_fn((seq_len, feat_dim), |(step, _)| shared[step])
            }
        };

        for &feature in &self.config.exclude_features {
            mask.column_mut(feature).fill(true);
        }
        Ok(mask)
    }
}
