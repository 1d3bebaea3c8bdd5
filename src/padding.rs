use ndarray::Array2;

use crate::errors::MaskError;

/// Build a `(batch, max_len)` keep/ignore mask from true sequence lengths.
///
/// `out[i, t]` is `true` exactly when `t < lengths[i]`, i.e. when position
/// `t` holds a real time step rather than padding. `max_len` defaults to the
/// longest sequence. Pure function, no state.
pub fn padding_mask(lengths: &[usize], max_len: Option<usize>) -> Result<Array2<bool>, MaskError> {
    if lengths.is_empty() {
        return Err(MaskError::EmptyBatch);
    }
    let max_len = match max_len {
        Some(0) => return Err(MaskError::ZeroMaxLen),
        Some(value) => value,
        None => *lengths.iter().max().expect("lengths is non-empty"),
    };
    Ok(Array2::from_shape_fn(
        (lengths.len(), max_len),
        |(sample, step)| step < lengths[sample],
    ))
}
