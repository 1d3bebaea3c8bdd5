use ndarray::{s, Array3, Zip};

use crate::config::CollateOptions;
use crate::data::{ImputationBatch, MaskedSample};
use crate::errors::MaskError;
use crate::padding::padding_mask;
use crate::types::{BatchMask, BatchTensor};

/// Assemble variable-length masked samples into one padded batch.
///
/// Sequences longer than the padded length are truncated; shorter ones are
/// zero-padded. The returned [`ImputationBatch`] carries the masked `input`,
/// the unmasked `target`, the inverted `predict_mask` (padding positions are
/// `false`, never prediction targets), the `padding_mask` over real time
/// steps, and the labels in input order. There is no partial-batch mode: the
/// call either returns a fully populated batch or fails.
pub fn collate<L>(
    samples: Vec<MaskedSample<L>>,
    options: &CollateOptions,
) -> Result<ImputationBatch<L>, MaskError> {
    if samples.is_empty() {
        return Err(MaskError::EmptyBatch);
    }
    if options.max_len == Some(0) {
        return Err(MaskError::ZeroMaxLen);
    }

    let feat_dim = samples[0].features.ncols();
    let mut lengths = Vec::with_capacity(samples.len());
    for (index, sample) in samples.iter().enumerate() {
        let (seq_len, sample_dim) = sample.features.dim();
        if seq_len == 0 {
            return Err(MaskError::EmptySequence { sample: index });
        }
        if sample_dim != feat_dim {
            return Err(MaskError::FeatureDimMismatch {
                sample: index,
                expected: feat_dim,
                found: sample_dim,
            });
        }
        if sample.keep_mask.dim() != (seq_len, sample_dim) {
            return Err(MaskError::MaskShape {
                sample: index,
                features: (seq_len, sample_dim),
                mask: sample.keep_mask.dim(),
            });
        }
        lengths.push(seq_len);
    }

    let batch_size = samples.len();
    let max_len = options
        .max_len
        .unwrap_or_else(|| *lengths.iter().max().expect("batch is non-empty"));

    let mut target = Array3::<f64>::zeros((batch_size, max_len, feat_dim));
    // Observed polarity over the padded grid; padding stays `false` so it is
    // excluded from compensation counts and never flips into a target.
    let mut observed: BatchMask = Array3::from_elem((batch_size, max_len, feat_dim), false);
    let mut predict_mask: BatchMask = Array3::from_elem((batch_size, max_len, feat_dim), false);

    for (index, sample) in samples.iter().enumerate() {
        let end = lengths[index].min(max_len);
        target
            .slice_mut(s![index, ..end, ..])
            .assign(&sample.features.slice(s![..end, ..]));
        observed
            .slice_mut(s![index, ..end, ..])
            .assign(&sample.keep_mask.slice(s![..end, ..]));
        predict_mask
            .slice_mut(s![index, ..end, ..])
            .assign(&sample.keep_mask.slice(s![..end, ..]).mapv(|keep| !keep));
    }

    let mut input = target.clone();
    Zip::from(&mut input)
        .and(&observed)
        .for_each(|value, &keep| {
            if !keep {
                *value = 0.0;
            }
        });
    if options.compensate {
        compensate_masking(&mut input, &observed);
    }

    let clipped: Vec<usize> = lengths.iter().map(|&len| len.min(max_len)).collect();
    let padding_mask = padding_mask(&clipped, Some(max_len))?;
    let labels = samples.into_iter().map(|sample| sample.label).collect();

    Ok(ImputationBatch {
        input,
        target,
        predict_mask,
        padding_mask,
        labels,
    })
}

/// Rescale masked inputs so linear combinations of features keep their
/// expected magnitude: each `(batch, step)` feature vector is multiplied by
/// `feat_dim / max(observed_count, 1)`.
///
/// `observed` uses keep polarity (`true` = surviving input). The clamped
/// divisor makes fully-masked steps a no-op on their all-zero rows rather
/// than an error.
pub fn compensate_masking(input: &mut BatchTensor, observed: &BatchMask) {
    let (batch_size, max_len, feat_dim) = input.dim();
    for sample in 0..batch_size {
        for step in 0..max_len {
            let active = observed
                .slice(s![sample, step, ..])
                .iter()
                .filter(|&&keep| keep)
                .count();
            if active == feat_dim {
                continue;
            }
            let scale = feat_dim as f64 / active.max(1) as f64;
            input
                .slice_mut(s![sample, step, ..])
                .mapv_inplace(|value| value * scale);
        }
    }
}
