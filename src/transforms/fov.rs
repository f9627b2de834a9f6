//! Field-of-view transforms: flip, patch, crop, pad and power-of-two sizing.
//!
//! All geometry acts on the spatial axes of channel-first arrays. Each
//! deterministic transform resolves a [`Region`] (or axis list, or padding
//! amounts) in `get_parameters` and applies it in `apply_transform`, so a
//! shared parameter set extracts the same location from every related
//! array.
//!
//! ```ignore
//! let mut rng = get_rng(Some(42));
//! let patch = RandomPatchTransform::new(&[32, 32, 32]).bound(Bound::Replicate);
//! let [image, label]: [ArrayD<f32>; 2] = patch
//!     .call_many(&[image, label], &mut rng)?
//!     .try_into()
//!     .map_err(|_| Error::transform("patch", "expected two outputs"))?;
//! ```

use super::base::{SharePolicy, Transform};
use super::crop::{
    compute_patch_region, power_two_shape, random_center_range, resolve_amounts, voxel_counts,
    Region, Side, Unit,
};
use super::randomized::{check_fields, Config, Draws, Materialize, RandomizedTransform};
use crate::error::{Error, Result};
use crate::padding::{pad, Bound};
use crate::random::Sampler;
use crate::utils::{ensure_list, normalize_axis, spatial_shape};
use ndarray::{ArrayD, Axis};
use rand::RngCore;

fn to_axes(values: &[f64]) -> Result<Vec<isize>> {
    values
        .iter()
        .map(|&v| {
            if v.is_finite() && v.fract() == 0.0 {
                Ok(v as isize)
            } else {
                Err(Error::configuration(format!(
                    "flip axes must be whole numbers, got {}",
                    v
                )))
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Flip
// ---------------------------------------------------------------------------

/// Flip array axes.
///
/// Axes index the full channel-first array (axis 0 is the channel axis);
/// negative axes count from the end. `None` flips every spatial axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlipTransform {
    axis: Option<Vec<isize>>,
    shared: SharePolicy,
}

impl FlipTransform {
    /// Flip every spatial axis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip only these axes.
    pub fn axis(mut self, axis: impl Into<Vec<isize>>) -> Self {
        self.axis = Some(axis.into());
        self
    }

    /// Set the sharing policy.
    pub fn with_policy(mut self, policy: impl Into<SharePolicy>) -> Self {
        self.shared = policy.into();
        self
    }

    /// Configured axes (`None` = all spatial axes).
    pub fn axes(&self) -> Option<&[isize]> {
        self.axis.as_deref()
    }
}

impl Transform for FlipTransform {
    /// Array axes to invert.
    type Parameters = Vec<usize>;

    fn shared(&self) -> SharePolicy {
        self.shared
    }

    fn get_parameters(&self, x: &ArrayD<f32>, _rng: &mut dyn RngCore) -> Result<Vec<usize>> {
        let spatial = spatial_shape(x.shape())?.len();
        match &self.axis {
            None => Ok((1..=spatial).collect()),
            Some(axes) => axes.iter().map(|&a| normalize_axis(a, x.ndim())).collect(),
        }
    }

    fn apply_transform(&self, x: &ArrayD<f32>, axes: &Self::Parameters) -> Result<ArrayD<f32>> {
        let mut view = x.view();
        for &axis in axes {
            if axis >= view.ndim() {
                return Err(Error::InvalidDimensions(format!(
                    "cannot flip axis {} of a {}D array",
                    axis,
                    view.ndim()
                )));
            }
            view.invert_axis(Axis(axis));
        }
        Ok(view.as_standard_layout().into_owned())
    }
}

impl Materialize for FlipTransform {
    fn materialize(&self, draws: &Draws) -> Result<Self> {
        check_fields(draws, &["axis"], "FlipTransform")?;
        let mut out = self.clone();
        if let Some(axis) = draws.list("axis") {
            out.axis = Some(to_axes(&axis)?);
        }
        Ok(out)
    }
}

/// Flip a random subset of axes.
///
/// Without explicit candidates a random non-empty subset of all spatial
/// axes is flipped. With candidates, a random non-empty subset of those.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomFlipTransform {
    axis: Option<Vec<isize>>,
    shared: SharePolicy,
}

impl Default for RandomFlipTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomFlipTransform {
    /// Random subset of all spatial axes.
    pub fn new() -> Self {
        Self {
            axis: None,
            shared: SharePolicy::Both,
        }
    }

    /// Restrict the candidates.
    pub fn axis(mut self, axis: impl Into<Vec<isize>>) -> Self {
        self.axis = Some(axis.into());
        self
    }

    /// Set the sharing policy.
    pub fn with_policy(mut self, policy: impl Into<SharePolicy>) -> Self {
        self.shared = policy.into();
        self
    }

    fn randomized(&self, spatial: usize) -> Result<RandomizedTransform<FlipTransform>> {
        let candidates: Vec<f64> = match &self.axis {
            Some(axes) => axes.iter().map(|&a| a as f64).collect(),
            None => (-(spatial as isize)..0).map(|a| a as f64).collect(),
        };
        let config = Config::new().with("axis", Sampler::rand_k_from(candidates, None, false)?);
        Ok(RandomizedTransform::new(FlipTransform::new(), config).with_policy(self.shared))
    }
}

impl Transform for RandomFlipTransform {
    type Parameters = (FlipTransform, Vec<usize>);

    fn shared(&self) -> SharePolicy {
        self.shared
    }

    fn get_parameters(&self, x: &ArrayD<f32>, rng: &mut dyn RngCore) -> Result<Self::Parameters> {
        let spatial = spatial_shape(x.shape())?.len();
        let nothing_to_flip = match &self.axis {
            Some(axes) => axes.is_empty(),
            None => spatial == 0,
        };
        if nothing_to_flip {
            return Ok((FlipTransform::new().axis(Vec::new()), Vec::new()));
        }
        let parameters = self.randomized(spatial)?.get_parameters(x, rng)?;
        tracing::debug!(axes = ?parameters.1, "random flip");
        Ok(parameters)
    }

    fn apply_transform(
        &self,
        x: &ArrayD<f32>,
        parameters: &Self::Parameters,
    ) -> Result<ArrayD<f32>> {
        let (flip, axes) = parameters;
        flip.apply_transform(x, axes)
    }
}

// ---------------------------------------------------------------------------
// Patch
// ---------------------------------------------------------------------------

/// Extract a fixed-size patch around a relative center.
///
/// Shape and center are broadcast to the spatial rank. Parts of the patch
/// outside the array are synthesized with the boundary mode.
///
/// # Example
///
/// ```ignore
/// let patch = PatchTransform::new(&[64])
///     .center(&[0.0, -0.5, 0.5])
///     .bound(Bound::Dct2);
/// let out = patch.call(&volume, &mut rng)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PatchTransform {
    shape: Vec<usize>,
    center: Vec<f64>,
    bound: Bound,
    shared: SharePolicy,
}

impl Default for PatchTransform {
    fn default() -> Self {
        Self::new(&[64])
    }
}

impl PatchTransform {
    /// Centered patch of `shape` voxels.
    pub fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            center: vec![0.0],
            bound: Bound::Dct2,
            shared: SharePolicy::Both,
        }
    }

    /// Relative center per axis, in `[-1, 1]`.
    pub fn center(mut self, center: &[f64]) -> Self {
        self.center = center.to_vec();
        self
    }

    /// Boundary mode for out-of-bounds voxels.
    pub fn bound(mut self, bound: Bound) -> Self {
        self.bound = bound;
        self
    }

    /// Set the sharing policy.
    pub fn with_policy(mut self, policy: impl Into<SharePolicy>) -> Self {
        self.shared = policy.into();
        self
    }

    /// Patch region for a given spatial extent.
    pub fn region(&self, extent: &[usize]) -> Result<Region> {
        if self.shape.is_empty() || self.center.is_empty() {
            return Err(Error::configuration("patch shape and center cannot be empty"));
        }
        let nd = extent.len();
        compute_patch_region(
            extent,
            &ensure_list(&self.shape, nd),
            &ensure_list(&self.center, nd),
        )
    }
}

impl Transform for PatchTransform {
    type Parameters = Region;

    fn shared(&self) -> SharePolicy {
        self.shared
    }

    fn get_parameters(&self, x: &ArrayD<f32>, _rng: &mut dyn RngCore) -> Result<Region> {
        let region = self.region(spatial_shape(x.shape())?)?;
        tracing::debug!(crop = ?region.crop, padding = ?region.padding, "patch region");
        Ok(region)
    }

    fn apply_transform(&self, x: &ArrayD<f32>, region: &Region) -> Result<ArrayD<f32>> {
        region.extract(x, self.bound, 0.0)
    }
}

impl Materialize for PatchTransform {
    fn materialize(&self, draws: &Draws) -> Result<Self> {
        check_fields(draws, &["shape", "center"], "PatchTransform")?;
        let mut out = self.clone();
        if let Some(shape) = draws.list("shape") {
            out.shape = voxel_counts(&shape, "patch shape")?;
        }
        if let Some(center) = draws.list("center") {
            out.center = center;
        }
        Ok(out)
    }
}

/// Extract a patch at a random location.
///
/// Centers are drawn uniformly from `[p/n - 1, 1 - p/n]` per axis, which
/// keeps the patch inside the array up to one voxel of rounding. Along
/// axes where the patch is larger than the array the full `[-1, 1]` range
/// is used and the excess is padded.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomPatchTransform {
    patch_size: Vec<usize>,
    bound: Bound,
    shared: SharePolicy,
}

impl RandomPatchTransform {
    /// Random patch of `patch_size` voxels (broadcast to the spatial rank).
    pub fn new(patch_size: &[usize]) -> Self {
        Self {
            patch_size: patch_size.to_vec(),
            bound: Bound::Dct2,
            shared: SharePolicy::Both,
        }
    }

    /// Boundary mode for out-of-bounds voxels.
    pub fn bound(mut self, bound: Bound) -> Self {
        self.bound = bound;
        self
    }

    /// Set the sharing policy.
    pub fn with_policy(mut self, policy: impl Into<SharePolicy>) -> Self {
        self.shared = policy.into();
        self
    }

    fn randomized(&self, extent: &[usize]) -> Result<RandomizedTransform<PatchTransform>> {
        if self.patch_size.is_empty() {
            return Err(Error::configuration("patch size cannot be empty"));
        }
        let size = ensure_list(&self.patch_size, extent.len());
        let (lo, hi): (Vec<f64>, Vec<f64>) = size
            .iter()
            .zip(extent)
            .map(|(&p, &n)| random_center_range(p, n))
            .unzip();
        let template = PatchTransform::new(&size).bound(self.bound);
        let config = Config::new().with("center", Sampler::uniform(lo, hi)?);
        Ok(RandomizedTransform::new(template, config).with_policy(self.shared))
    }
}

impl Transform for RandomPatchTransform {
    type Parameters = (PatchTransform, Region);

    fn shared(&self) -> SharePolicy {
        self.shared
    }

    fn get_parameters(&self, x: &ArrayD<f32>, rng: &mut dyn RngCore) -> Result<Self::Parameters> {
        let extent = spatial_shape(x.shape())?;
        self.randomized(extent)?.get_parameters(x, rng)
    }

    fn apply_transform(
        &self,
        x: &ArrayD<f32>,
        parameters: &Self::Parameters,
    ) -> Result<ArrayD<f32>> {
        let (patch, region) = parameters;
        patch.apply_transform(x, region)
    }
}

// ---------------------------------------------------------------------------
// Crop / Pad
// ---------------------------------------------------------------------------

/// Remove voxels from the borders of the spatial axes.
///
/// # Arguments
///
/// * `cropping` - Amounts per axis (one-sided) or interleaved pre/post
///   amounts (two-sided, `side(None)`)
/// * `unit` - Voxels (default) or fraction of the extent
/// * `side` - `Some(Side::Both)` by default
#[derive(Debug, Clone, PartialEq)]
pub struct CropTransform {
    cropping: Vec<f64>,
    unit: Unit,
    side: Option<Side>,
    shared: SharePolicy,
}

impl CropTransform {
    /// Crop `cropping` voxels from both sides of every axis.
    pub fn new(cropping: impl Into<Vec<f64>>) -> Self {
        Self {
            cropping: cropping.into(),
            unit: Unit::Voxels,
            side: Some(Side::Both),
            shared: SharePolicy::Both,
        }
    }

    /// Unit of the amounts.
    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Side the amounts apply to (`None` = interleaved two-sided amounts).
    pub fn side(mut self, side: Option<Side>) -> Self {
        self.side = side;
        self
    }

    /// Set the sharing policy.
    pub fn with_policy(mut self, policy: impl Into<SharePolicy>) -> Self {
        self.shared = policy.into();
        self
    }
}

impl Transform for CropTransform {
    type Parameters = Region;

    fn shared(&self) -> SharePolicy {
        self.shared
    }

    fn get_parameters(&self, x: &ArrayD<f32>, _rng: &mut dyn RngCore) -> Result<Region> {
        let extent = spatial_shape(x.shape())?;
        let amounts = resolve_amounts(&self.cropping, self.unit, self.side, extent)?;
        // Amounts beyond the extent clamp to an empty axis
        let crop = amounts
            .iter()
            .zip(extent)
            .map(|(&(before, after), &n)| {
                let start = before.min(n);
                start..n.saturating_sub(after).max(start)
            })
            .collect();
        Ok(Region {
            crop,
            padding: vec![(0, 0); extent.len()],
        })
    }

    fn apply_transform(&self, x: &ArrayD<f32>, region: &Region) -> Result<ArrayD<f32>> {
        region.extract(x, Bound::Constant, 0.0)
    }
}

impl Materialize for CropTransform {
    fn materialize(&self, draws: &Draws) -> Result<Self> {
        check_fields(draws, &["cropping"], "CropTransform")?;
        let mut out = self.clone();
        if let Some(cropping) = draws.list("cropping") {
            out.cropping = cropping;
        }
        Ok(out)
    }
}

/// Add voxels to the borders of the spatial axes.
///
/// Same amount conventions as [`CropTransform`]; new voxels follow the
/// boundary mode (`value` is the fill for [`Bound::Constant`]).
#[derive(Debug, Clone, PartialEq)]
pub struct PadTransform {
    padding: Vec<f64>,
    unit: Unit,
    side: Option<Side>,
    bound: Bound,
    value: f32,
    shared: SharePolicy,
}

impl PadTransform {
    /// Pad `padding` voxels on both sides of every axis.
    pub fn new(padding: impl Into<Vec<f64>>) -> Self {
        Self {
            padding: padding.into(),
            unit: Unit::Voxels,
            side: Some(Side::Both),
            bound: Bound::Dct2,
            value: 0.0,
            shared: SharePolicy::Both,
        }
    }

    /// Unit of the amounts.
    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Side the amounts apply to (`None` = interleaved two-sided amounts).
    pub fn side(mut self, side: Option<Side>) -> Self {
        self.side = side;
        self
    }

    /// Boundary mode.
    pub fn bound(mut self, bound: Bound) -> Self {
        self.bound = bound;
        self
    }

    /// Fill value for constant padding.
    pub fn value(mut self, value: f32) -> Self {
        self.value = value;
        self
    }

    /// Set the sharing policy.
    pub fn with_policy(mut self, policy: impl Into<SharePolicy>) -> Self {
        self.shared = policy.into();
        self
    }
}

impl Transform for PadTransform {
    /// `(before, after)` voxels per spatial axis.
    type Parameters = Vec<(usize, usize)>;

    fn shared(&self) -> SharePolicy {
        self.shared
    }

    fn get_parameters(&self, x: &ArrayD<f32>, _rng: &mut dyn RngCore) -> Result<Self::Parameters> {
        resolve_amounts(
            &self.padding,
            self.unit,
            self.side,
            spatial_shape(x.shape())?,
        )
    }

    fn apply_transform(
        &self,
        x: &ArrayD<f32>,
        amounts: &Self::Parameters,
    ) -> Result<ArrayD<f32>> {
        pad(x, amounts, self.bound, self.value)
    }
}

impl Materialize for PadTransform {
    fn materialize(&self, draws: &Draws) -> Result<Self> {
        check_fields(draws, &["padding", "value"], "PadTransform")?;
        let mut out = self.clone();
        if let Some(padding) = draws.list("padding") {
            out.padding = padding;
        }
        if let Some(value) = draws.scalar("value")? {
            out.value = value as f32;
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// PowerTwo
// ---------------------------------------------------------------------------

/// Pad (centered) each spatial axis up to a multiple of `2^exponent`.
///
/// An axis of 10 voxels with exponent 3 becomes 16 voxels. Useful before
/// networks that downsample `exponent` times.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerTwoTransform {
    exponent: Vec<u32>,
    bound: Bound,
    shared: SharePolicy,
}

impl Default for PowerTwoTransform {
    fn default() -> Self {
        Self::new(&[1])
    }
}

impl PowerTwoTransform {
    /// Exponent per axis (broadcast).
    pub fn new(exponent: &[u32]) -> Self {
        Self {
            exponent: exponent.to_vec(),
            bound: Bound::Dct2,
            shared: SharePolicy::Channels,
        }
    }

    /// Boundary mode.
    pub fn bound(mut self, bound: Bound) -> Self {
        self.bound = bound;
        self
    }

    /// Set the sharing policy.
    pub fn with_policy(mut self, policy: impl Into<SharePolicy>) -> Self {
        self.shared = policy.into();
        self
    }
}

impl Transform for PowerTwoTransform {
    type Parameters = Region;

    fn shared(&self) -> SharePolicy {
        self.shared
    }

    fn get_parameters(&self, x: &ArrayD<f32>, rng: &mut dyn RngCore) -> Result<Region> {
        let target = power_two_shape(spatial_shape(x.shape())?, &self.exponent)?;
        PatchTransform::new(&target)
            .bound(self.bound)
            .get_parameters(x, rng)
    }

    fn apply_transform(&self, x: &ArrayD<f32>, region: &Region) -> Result<ArrayD<f32>> {
        region.extract(x, self.bound, 0.0)
    }
}
