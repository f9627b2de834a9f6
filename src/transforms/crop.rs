//! Region geometry for patch, crop and pad transforms.
//!
//! Requests (a patch size and relative center, or crop/pad amounts in
//! voxels or percent) are resolved here into a [`Region`]: a slice range
//! per spatial axis plus the padding needed to reach the requested size.
//! Nothing in this module allocates voxel data except [`Region::extract`].

use crate::error::{Error, Result};
use crate::padding::{gather, Bound};
use crate::utils::ensure_list;
use ndarray::{ArrayD, Axis, Slice};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Slice bounds and padding for the spatial axes of an array.
///
/// Invariant: every crop range lies within the source extent, and
/// `range.len() + before + after` is the output size along that axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region {
    /// `[start, stop)` per spatial axis.
    pub crop: Vec<Range<usize>>,
    /// `(before, after)` padding per spatial axis.
    pub padding: Vec<(usize, usize)>,
}

impl Region {
    /// Region covering `extent` as is.
    pub fn full(extent: &[usize]) -> Self {
        Self {
            crop: extent.iter().map(|&n| 0..n).collect(),
            padding: vec![(0, 0); extent.len()],
        }
    }

    /// Spatial shape of the extracted region.
    pub fn shape(&self) -> Vec<usize> {
        self.crop
            .iter()
            .zip(&self.padding)
            .map(|(r, &(before, after))| r.len() + before + after)
            .collect()
    }

    /// Whether extraction needs the boundary primitive.
    pub fn needs_padding(&self) -> bool {
        self.padding.iter().any(|&(b, a)| b > 0 || a > 0)
    }

    /// Slice the trailing axes of `x`, then pad them with `bound`.
    ///
    /// Padding folds into the sliced range. An empty range on a non-empty
    /// axis folds into the whole axis instead, so a patch lying entirely
    /// outside the array still reads its nearest voxels.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCropRegion`] when a range does not fit `x`, e.g.
    /// when a region resolved on one array is applied to a smaller one.
    pub fn extract(&self, x: &ArrayD<f32>, bound: Bound, value: f32) -> Result<ArrayD<f32>> {
        let ndim = x.ndim();
        if self.crop.len() > ndim || self.padding.len() != self.crop.len() {
            return Err(Error::InvalidDimensions(format!(
                "region has {} axes, array only {}",
                self.crop.len(),
                ndim
            )));
        }
        let offset = ndim - self.crop.len();
        for (i, range) in self.crop.iter().enumerate() {
            let axis = offset + i;
            let extent = x.shape()[axis];
            if range.start > range.end || range.end > extent {
                return Err(Error::InvalidCropRegion(format!(
                    "range {:?} does not fit axis {} of extent {}",
                    range, axis, extent
                )));
            }
        }

        if !self.needs_padding() {
            let mut view = x.view();
            for (i, range) in self.crop.iter().enumerate() {
                view.slice_axis_inplace(Axis(offset + i), Slice::from(range.clone()));
            }
            return Ok(view.to_owned());
        }

        let mut lookup = Vec::with_capacity(self.crop.len());
        for (i, (range, &(before, after))) in self.crop.iter().zip(&self.padding).enumerate() {
            let extent = x.shape()[offset + i];
            let size = (range.len() + before + after) as isize;
            let table: Vec<Option<usize>> = if !range.is_empty() {
                (0..size)
                    .map(|o| {
                        bound
                            .fold(o - before as isize, range.len())
                            .map(|j| range.start + j)
                    })
                    .collect()
            } else if extent > 0 {
                let first = range.start as isize - before as isize;
                (0..size).map(|o| bound.fold(first + o, extent)).collect()
            } else if bound == Bound::Constant || size == 0 {
                vec![None; size as usize]
            } else {
                return Err(Error::InvalidDimensions(format!(
                    "cannot extend empty axis {} with {} boundary",
                    offset + i,
                    bound
                )));
            };
            lookup.push(table);
        }
        tracing::debug!(region = ?self, %bound, "extracting padded region");
        Ok(gather(x, &lookup, value))
    }
}

/// Resolve a patch of `shape` voxels around a relative `center`.
///
/// Center `-1` is the first voxel and `1` the last one; values outside
/// `[-1, 1]` are clamped. Parts of the patch that fall outside the extent
/// become padding, so the patch always has exactly `shape` voxels.
///
/// ```ignore
/// // 4-voxel patch in the middle of a 6-voxel axis: slices [0, 4)
/// let region = compute_patch_region(&[6], &[4], &[0.0])?;
/// assert_eq!(region.crop, vec![0..4]);
/// ```
pub fn compute_patch_region(extent: &[usize], shape: &[usize], center: &[f64]) -> Result<Region> {
    if shape.len() != extent.len() || center.len() != extent.len() {
        return Err(Error::InvalidDimensions(format!(
            "patch of rank {} (center rank {}) for a {}D extent",
            shape.len(),
            center.len(),
            extent.len()
        )));
    }
    let mut crop = Vec::with_capacity(extent.len());
    let mut padding = Vec::with_capacity(extent.len());
    for ((&n, &size), &c) in extent.iter().zip(shape).zip(center) {
        if !c.is_finite() {
            return Err(Error::configuration(format!(
                "patch center must be finite, got {}",
                c
            )));
        }
        let c = c.clamp(-1.0, 1.0);
        let voxel = (c + 1.0) / 2.0 * n.saturating_sub(1) as f64;
        let first = (voxel - size as f64 / 2.0).floor() as isize;
        let last = first + size as isize;
        let start = first.clamp(0, n as isize);
        let stop = last.clamp(start, n as isize);
        crop.push(start as usize..stop as usize);
        padding.push(((start - first) as usize, (last - stop) as usize));
    }
    Ok(Region { crop, padding })
}

/// Range of relative centers that keeps a `patch`-voxel patch inside `extent`.
///
/// When the patch is larger than the extent no center keeps it inside,
/// and the full `[-1, 1]` range is returned.
pub fn random_center_range(patch: usize, extent: usize) -> (f64, f64) {
    if extent == 0 || patch > extent {
        return (-1.0, 1.0);
    }
    let ratio = patch as f64 / extent as f64;
    ((ratio - 1.0).max(-1.0), (1.0 - ratio).min(1.0))
}

/// Side of an axis that one-sided amounts apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Before the first voxel.
    Pre,
    /// After the last voxel.
    Post,
    /// The same amount on both sides.
    Both,
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pre" | "before" | "left" => Ok(Self::Pre),
            "post" | "after" | "right" => Ok(Self::Post),
            "both" => Ok(Self::Both),
            other => Err(Error::configuration(format!("unknown side '{}'", other))),
        }
    }
}

/// Unit of crop/pad amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    /// Whole voxels.
    #[default]
    #[serde(rename = "vox", alias = "voxels")]
    Voxels,
    /// Fraction of the axis extent.
    #[serde(rename = "pct", alias = "percent")]
    Percent,
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "vox" | "voxel" | "voxels" => Ok(Self::Voxels),
            "pct" | "%" | "percent" => Ok(Self::Percent),
            other => Err(Error::configuration(format!("unknown unit '{}'", other))),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Voxels => "vox",
            Self::Percent => "pct",
        })
    }
}

/// Convert drawn or configured values into voxel counts.
pub(crate) fn voxel_counts(values: &[f64], what: &str) -> Result<Vec<usize>> {
    values
        .iter()
        .map(|&v| {
            if v.is_finite() && v >= 0.0 && v.fract() == 0.0 {
                Ok(v as usize)
            } else {
                Err(Error::configuration(format!(
                    "{} must be non-negative whole numbers, got {}",
                    what, v
                )))
            }
        })
        .collect()
}

fn to_voxels(amount: f64, unit: Unit, extent: usize) -> Result<usize> {
    match unit {
        Unit::Voxels => Ok(voxel_counts(&[amount], "voxel amounts")?[0]),
        Unit::Percent => {
            if !amount.is_finite() || amount < 0.0 {
                return Err(Error::configuration(format!(
                    "percent amounts must be non-negative, got {}",
                    amount
                )));
            }
            Ok((amount * extent as f64).ceil() as usize)
        }
    }
}

/// Resolve crop/pad amounts into `(before, after)` voxels per spatial axis.
///
/// # Arguments
///
/// * `amounts` - One value per axis (broadcast) when `side` is set;
///   interleaved `[pre0, post0, pre1, post1, ...]` when it is `None`,
///   with missing trailing entries treated as zero
/// * `unit` - Voxels, or a fraction of the extent rounded up
/// * `side` - Which side one-sided amounts apply to
/// * `extent` - Spatial shape of the array
pub fn resolve_amounts(
    amounts: &[f64],
    unit: Unit,
    side: Option<Side>,
    extent: &[usize],
) -> Result<Vec<(usize, usize)>> {
    let ndim = extent.len();
    match side {
        Some(side) => {
            if amounts.is_empty() {
                return Err(Error::configuration("expected at least one amount"));
            }
            ensure_list(amounts, ndim)
                .into_iter()
                .zip(extent)
                .map(|(a, &n)| -> Result<(usize, usize)> {
                    let v = to_voxels(a, unit, n)?;
                    Ok(match side {
                        Side::Pre => (v, 0),
                        Side::Post => (0, v),
                        Side::Both => (v, v),
                    })
                })
                .collect()
        }
        None => {
            if amounts.len() > 2 * ndim {
                return Err(Error::configuration(format!(
                    "{} two-sided amounts given for {} spatial axes",
                    amounts.len(),
                    ndim
                )));
            }
            let at = |i: usize| amounts.get(i).copied().unwrap_or(0.0);
            extent
                .iter()
                .enumerate()
                .map(|(d, &n)| -> Result<(usize, usize)> {
                    Ok((
                        to_voxels(at(2 * d), unit, n)?,
                        to_voxels(at(2 * d + 1), unit, n)?,
                    ))
                })
                .collect()
        }
    }
}

/// Smallest multiple of `2^exponent` that is at least each extent.
///
/// Exponents are broadcast to the spatial rank. Empty axes are given one
/// full block.
pub fn power_two_shape(extent: &[usize], exponents: &[u32]) -> Result<Vec<usize>> {
    if exponents.is_empty() {
        return Err(Error::configuration("expected at least one exponent"));
    }
    ensure_list(exponents, extent.len())
        .into_iter()
        .zip(extent)
        .map(|(e, &n)| -> Result<usize> {
            let block = 1usize.checked_shl(e).filter(|&b| b > 0).ok_or_else(|| {
                Error::configuration(format!("exponent {} overflows the index type", e))
            })?;
            Ok(n.div_ceil(block).max(1) * block)
        })
        .collect()
}
