use crate::error::{InputError, Result};

/// Returns `start, start + step, ...` for every value strictly below `stop`.
///
/// With `with_last`, `stop` itself is appended unless the sequence already
/// ends on it. An empty or inverted interval yields `[start]` (plus `stop`
/// when requested and distinct).
///
/// # Errors
///
/// Returns `InputError::ParameterOutOfRange` if `step` is not a positive
/// finite number.
pub fn arange(start: f64, stop: f64, step: f64, with_last: bool) -> Result<Vec<f64>> {
    if !(step > 0.0 && step.is_finite()) {
        return Err(InputError::ParameterOutOfRange {
            parameter: "step",
            value: step,
        }
        .into());
    }
    let mut values = vec![start];
    let mut i = 1.0;
    loop {
        let v = start + step * i;
        if v >= stop {
            break;
        }
        values.push(v);
        i += 1.0;
    }
    if with_last && values.last().is_some_and(|&last| last < stop) {
        values.push(stop);
    }
    Ok(values)
}

/// Converts a retain mask into the sorted list of retained indexes.
#[must_use]
pub fn mask_to_indexes(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &keep)| keep.then_some(i))
        .collect()
}

/// Selects the items whose mask entry is set, preserving order.
#[must_use]
pub fn select_by_mask<T: Clone>(items: &[T], mask: &[bool]) -> Vec<T> {
    items
        .iter()
        .zip(mask)
        .filter(|(_, keep)| **keep)
        .map(|(item, _)| item.clone())
        .collect()
}
