//! Small shape and list helpers shared by the samplers and transforms.

use crate::error::{Error, Result};

/// Normalize a list to exactly `size` entries.
///
/// Shorter lists are extended by repeating their last element, longer
/// lists are truncated. An empty list stays empty.
pub fn ensure_list<T: Clone>(values: &[T], size: usize) -> Vec<T> {
    let Some(last) = values.last() else {
        return Vec::new();
    };
    let mut out: Vec<T> = values.iter().take(size).cloned().collect();
    while out.len() < size {
        out.push(last.clone());
    }
    out
}

/// Spatial extent of a channel-first array (every axis but the first).
pub fn spatial_shape(shape: &[usize]) -> Result<&[usize]> {
    if shape.is_empty() {
        return Err(Error::InvalidDimensions(
            "expected a channel-first array with at least one axis".into(),
        ));
    }
    Ok(&shape[1..])
}

/// Resolve a possibly negative axis index against `ndim`.
pub fn normalize_axis(axis: isize, ndim: usize) -> Result<usize> {
    let resolved = if axis < 0 {
        ndim as isize + axis
    } else {
        axis
    };
    if resolved < 0 || resolved as usize >= ndim {
        return Err(Error::InvalidDimensions(format!(
            "axis {} out of bounds for {}D array",
            axis, ndim
        )));
    }
    Ok(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_list_broadcasts_last() {
        assert_eq!(ensure_list(&[3], 3), vec![3, 3, 3]);
        assert_eq!(ensure_list(&[1, 2], 4), vec![1, 2, 2, 2]);
        assert_eq!(ensure_list(&[1, 2, 3], 2), vec![1, 2]);
        assert!(ensure_list::<i32>(&[], 3).is_empty());
    }

    #[test]
    fn test_normalize_axis() {
        assert_eq!(normalize_axis(-1, 4).unwrap(), 3);
        assert_eq!(normalize_axis(1, 4).unwrap(), 1);
        assert!(normalize_axis(4, 4).is_err());
        assert!(normalize_axis(-5, 4).is_err());
    }

    #[test]
    fn test_spatial_shape() {
        assert_eq!(spatial_shape(&[2, 5, 6]).unwrap(), &[5, 6]);
        assert!(spatial_shape(&[]).is_err());
    }
}
