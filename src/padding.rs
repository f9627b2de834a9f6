//! Boundary extension for N-dimensional arrays.
//!
//! Padded voxels are synthesized by folding each out-of-range index back
//! into the source extent according to a [`Bound`] mode. Folding is
//! periodic, so amounts larger than the extent are allowed.

use crate::error::{Error, Result};
use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Boundary condition used to synthesize values outside the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    /// Fill with a constant value.
    Constant,
    /// Repeat the edge sample (`aaa|abc|ccc`).
    Replicate,
    /// Mirror around the edge sample (`cb|abc|ba`).
    Dct1,
    /// Mirror including the edge sample (`ba|abc|cb`).
    #[default]
    Dct2,
    /// Wrap around (`bc|abc|ab`).
    Dft,
}

impl FromStr for Bound {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "constant" | "const" | "zero" | "zeros" => Ok(Self::Constant),
            "replicate" | "nearest" | "border" | "edge" => Ok(Self::Replicate),
            "dct1" | "mirror" | "reflect" => Ok(Self::Dct1),
            "dct2" | "symmetric" | "reflection" => Ok(Self::Dct2),
            "dft" | "circular" | "wrap" => Ok(Self::Dft),
            other => Err(Error::configuration(format!(
                "unknown boundary mode '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Constant => "constant",
            Self::Replicate => "replicate",
            Self::Dct1 => "dct1",
            Self::Dct2 => "dct2",
            Self::Dft => "dft",
        };
        f.write_str(name)
    }
}

impl Bound {
    /// Map a possibly out-of-range index into `0..len`.
    ///
    /// Returns `None` when the voxel should take the constant fill value.
    pub fn fold(self, index: isize, len: usize) -> Option<usize> {
        let n = len as isize;
        if (0..n).contains(&index) {
            return Some(index as usize);
        }
        if n == 0 {
            return None;
        }
        let folded = match self {
            Self::Constant => return None,
            Self::Replicate => index.clamp(0, n - 1),
            Self::Dct2 => {
                let period = 2 * n;
                let m = index.rem_euclid(period);
                if m < n {
                    m
                } else {
                    period - 1 - m
                }
            }
            Self::Dct1 => {
                if n == 1 {
                    0
                } else {
                    let period = 2 * (n - 1);
                    let m = index.rem_euclid(period);
                    if m < n {
                        m
                    } else {
                        period - m
                    }
                }
            }
            Self::Dft => index.rem_euclid(n),
        };
        Some(folded as usize)
    }
}

/// Pad the trailing axes of `x`.
///
/// # Arguments
///
/// * `x` - Input array
/// * `padding` - `(before, after)` amounts, one pair per trailing axis
/// * `bound` - Boundary condition
/// * `value` - Fill value for [`Bound::Constant`]
///
/// # Example
///
/// ```ignore
/// // Pad the two spatial axes of a [C, H, W] array by one voxel
/// let padded = pad(&x, &[(1, 1), (1, 1)], Bound::Dct2, 0.0)?;
/// ```
#[must_use = "this function returns a new array and does not modify the original"]
pub fn pad(
    x: &ArrayD<f32>,
    padding: &[(usize, usize)],
    bound: Bound,
    value: f32,
) -> Result<ArrayD<f32>> {
    let ndim = x.ndim();
    if padding.len() > ndim {
        return Err(Error::InvalidDimensions(format!(
            "{} padding pairs given for a {}D array",
            padding.len(),
            ndim
        )));
    }
    if padding.iter().all(|&(b, a)| b == 0 && a == 0) {
        return Ok(x.to_owned());
    }

    let offset = ndim - padding.len();
    let in_shape = x.shape();
    for (i, &(before, after)) in padding.iter().enumerate() {
        let axis = offset + i;
        if in_shape[axis] == 0 && bound != Bound::Constant && before + after > 0 {
            return Err(Error::InvalidDimensions(format!(
                "cannot extend empty axis {} with {} boundary",
                axis, bound
            )));
        }
    }

    let lookup: Vec<Vec<Option<usize>>> = padding
        .iter()
        .zip(&in_shape[offset..])
        .map(|(&(before, after), &n)| {
            (0..(n + before + after) as isize)
                .map(|o| bound.fold(o - before as isize, n))
                .collect()
        })
        .collect();
    let out = gather(x, &lookup, value);
    tracing::debug!(?padding, %bound, from = ?in_shape, to = ?out.shape(), "padding array");
    Ok(out)
}

/// Build an array whose trailing axes read `x` through index tables.
///
/// `lookup[i][o]` is the source index for output index `o` along trailing
/// axis `i`, or `None` for the fill value. Leading axes are copied as is.
pub(crate) fn gather(x: &ArrayD<f32>, lookup: &[Vec<Option<usize>>], value: f32) -> ArrayD<f32> {
    let ndim = x.ndim();
    let offset = ndim - lookup.len();
    let mut out_shape = x.shape().to_vec();
    for (i, table) in lookup.iter().enumerate() {
        out_shape[offset + i] = table.len();
    }

    let mut src = vec![0usize; ndim];
    ArrayD::from_shape_fn(IxDyn(&out_shape), |idx| {
        for (axis, s) in src.iter_mut().enumerate() {
            if axis < offset {
                *s = idx[axis];
                continue;
            }
            match lookup[axis - offset][idx[axis]] {
                Some(i) => *s = i,
                None => return value,
            }
        }
        x[src.as_slice()]
    })
}
