//! Intensity augmentation transforms.
//!
//! Deterministic elementwise transforms (noise, scaling, shifting, gamma)
//! plus randomized variants that sample their strength per call-unit
//! through [`RandomizedTransform`]. Elementwise work runs in parallel with
//! rayon over the contiguous buffer.

use super::base::{SharePolicy, Transform};
use super::randomized::{check_fields, Config, Draws, Materialize, RandomizedTransform};
use crate::error::{Error, Result};
use crate::random::{sym_range, upper_range, Param, Sampler, SamplerArg, SamplerKind};
use ndarray::ArrayD;
use rand::RngCore;
use rayon::prelude::*;

/// Apply `f` to every voxel of `x` in parallel.
#[must_use = "this function returns a new array and does not modify the original"]
fn map_voxels<F>(x: &ArrayD<f32>, operation: &str, f: F) -> Result<ArrayD<f32>>
where
    F: Fn(f32) -> f32 + Sync + Send,
{
    let mut out = x.to_owned();
    let slice = out.as_slice_memory_order_mut().ok_or_else(|| {
        Error::NonContiguousArray(format!("Array must be contiguous for {} operation", operation))
    })?;
    slice.par_iter_mut().for_each(|v| *v = f(*v));
    Ok(out)
}

fn check_scalar(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::configuration(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

// ---------------------------------------------------------------------------
// Gaussian noise
// ---------------------------------------------------------------------------

/// Add zero-mean Gaussian noise with standard deviation `sigma`.
///
/// The noise field is drawn in `get_parameters`, so related arrays that
/// share parameters receive the exact same field.
///
/// # Example
///
/// ```ignore
/// let noisy = GaussianNoiseTransform::new(0.05).call(&image, &mut rng)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianNoiseTransform {
    sigma: f64,
    shared: SharePolicy,
}

impl Default for GaussianNoiseTransform {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl GaussianNoiseTransform {
    /// Noise with standard deviation `sigma` (default: 0.1).
    pub fn new(sigma: f64) -> Self {
        Self {
            sigma,
            shared: SharePolicy::Independent,
        }
    }

    /// Set the sharing policy (default: fresh noise per channel).
    pub fn with_policy(mut self, policy: impl Into<SharePolicy>) -> Self {
        self.shared = policy.into();
        self
    }

    /// Standard deviation of the noise.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Transform for GaussianNoiseTransform {
    /// Noise field with the shape of the array it was drawn for.
    type Parameters = ArrayD<f32>;

    fn shared(&self) -> SharePolicy {
        self.shared
    }

    fn get_parameters(&self, x: &ArrayD<f32>, rng: &mut dyn RngCore) -> Result<ArrayD<f32>> {
        let field = Sampler::normal(0.0, self.sigma)?.sample_array(rng, x.shape())?;
        Ok(field.mapv(|v| v as f32))
    }

    fn apply_transform(&self, x: &ArrayD<f32>, noise: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        if x.shape() != noise.shape() {
            return Err(Error::ShapeMismatch(format!(
                "noise field {:?} does not match array {:?}",
                noise.shape(),
                x.shape()
            )));
        }
        let mut out = x.as_standard_layout().into_owned();
        let noise = noise.as_standard_layout();
        let (Some(dst), Some(src)) = (out.as_slice_mut(), noise.as_slice()) else {
            return Err(Error::NonContiguousArray(
                "Array must be contiguous for noise operation".to_string(),
            ));
        };
        dst.par_iter_mut()
            .zip(src.par_iter())
            .for_each(|(v, &n)| *v += n);
        Ok(out)
    }
}

impl Materialize for GaussianNoiseTransform {
    fn materialize(&self, draws: &Draws) -> Result<Self> {
        check_fields(draws, &["sigma"], "GaussianNoiseTransform")?;
        let mut out = self.clone();
        if let Some(sigma) = draws.scalar("sigma")? {
            out.sigma = sigma;
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Multiply / AddValue
// ---------------------------------------------------------------------------

/// Multiply intensities by a constant factor.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiplyTransform {
    factor: f64,
    shared: SharePolicy,
}

impl MultiplyTransform {
    /// Scale by `factor`.
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            shared: SharePolicy::Both,
        }
    }

    /// Set the sharing policy.
    pub fn with_policy(mut self, policy: impl Into<SharePolicy>) -> Self {
        self.shared = policy.into();
        self
    }
}

impl Transform for MultiplyTransform {
    type Parameters = ();

    fn shared(&self) -> SharePolicy {
        self.shared
    }

    fn get_parameters(&self, _x: &ArrayD<f32>, _rng: &mut dyn RngCore) -> Result<()> {
        check_scalar("factor", self.factor)
    }

    fn apply_transform(&self, x: &ArrayD<f32>, _: &()) -> Result<ArrayD<f32>> {
        let factor = self.factor as f32;
        map_voxels(x, "scale", |v| v * factor)
    }
}

impl Materialize for MultiplyTransform {
    fn materialize(&self, draws: &Draws) -> Result<Self> {
        check_fields(draws, &["factor"], "MultiplyTransform")?;
        let mut out = self.clone();
        if let Some(factor) = draws.scalar("factor")? {
            out.factor = factor;
        }
        Ok(out)
    }
}

/// Add a constant to intensities.
#[derive(Debug, Clone, PartialEq)]
pub struct AddValueTransform {
    value: f64,
    shared: SharePolicy,
}

impl AddValueTransform {
    /// Shift by `value`.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            shared: SharePolicy::Both,
        }
    }

    /// Set the sharing policy.
    pub fn with_policy(mut self, policy: impl Into<SharePolicy>) -> Self {
        self.shared = policy.into();
        self
    }
}

impl Transform for AddValueTransform {
    type Parameters = ();

    fn shared(&self) -> SharePolicy {
        self.shared
    }

    fn get_parameters(&self, _x: &ArrayD<f32>, _rng: &mut dyn RngCore) -> Result<()> {
        check_scalar("value", self.value)
    }

    fn apply_transform(&self, x: &ArrayD<f32>, _: &()) -> Result<ArrayD<f32>> {
        let value = self.value as f32;
        map_voxels(x, "shift", |v| v + value)
    }
}

impl Materialize for AddValueTransform {
    fn materialize(&self, draws: &Draws) -> Result<Self> {
        check_fields(draws, &["value"], "AddValueTransform")?;
        let mut out = self.clone();
        if let Some(value) = draws.scalar("value")? {
            out.value = value;
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Gamma
// ---------------------------------------------------------------------------

/// Gamma correction: `max(x, 0) ^ gamma`.
///
/// Intended for intensities normalized to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GammaTransform {
    gamma: f64,
    shared: SharePolicy,
}

impl GammaTransform {
    /// Raise intensities to `gamma`.
    pub fn new(gamma: f64) -> Self {
        Self {
            gamma,
            shared: SharePolicy::Both,
        }
    }

    /// Set the sharing policy.
    pub fn with_policy(mut self, policy: impl Into<SharePolicy>) -> Self {
        self.shared = policy.into();
        self
    }
}

impl Transform for GammaTransform {
    type Parameters = ();

    fn shared(&self) -> SharePolicy {
        self.shared
    }

    fn get_parameters(&self, _x: &ArrayD<f32>, _rng: &mut dyn RngCore) -> Result<()> {
        check_scalar("gamma", self.gamma)?;
        if self.gamma <= 0.0 {
            return Err(Error::configuration(format!(
                "gamma must be positive, got {}",
                self.gamma
            )));
        }
        Ok(())
    }

    fn apply_transform(&self, x: &ArrayD<f32>, _: &()) -> Result<ArrayD<f32>> {
        let gamma = self.gamma as f32;
        map_voxels(x, "gamma", |v| v.max(0.0).powf(gamma))
    }
}

impl Materialize for GammaTransform {
    fn materialize(&self, draws: &Draws) -> Result<Self> {
        check_fields(draws, &["gamma"], "GammaTransform")?;
        let mut out = self.clone();
        if let Some(gamma) = draws.scalar("gamma")? {
            out.gamma = gamma;
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Randomized variants
// ---------------------------------------------------------------------------

/// Gaussian noise with a random standard deviation.
pub type RandomGaussianNoiseTransform = RandomizedTransform<GaussianNoiseTransform>;
/// Multiplicative scaling by a random factor.
pub type RandomMultiplyTransform = RandomizedTransform<MultiplyTransform>;
/// Additive shift by a random value.
pub type RandomAddValueTransform = RandomizedTransform<AddValueTransform>;
/// Gamma correction with a random exponent.
pub type RandomGammaTransform = RandomizedTransform<GammaTransform>;

impl RandomizedTransform<GaussianNoiseTransform> {
    /// `sigma ~ Uniform(0, sigma)`; a pair or sampler is used as given.
    ///
    /// ```ignore
    /// let noise = RandomGaussianNoiseTransform::from_range(0.1)?;
    /// ```
    pub fn from_range(sigma: impl Into<SamplerArg>) -> Result<Self> {
        let sigma = SamplerKind::Uniform.make(upper_range(sigma, 0.0))?;
        Ok(Self::new(
            GaussianNoiseTransform::default(),
            Config::new().with("sigma", sigma),
        )
        .with_policy(SharePolicy::Independent))
    }
}

impl RandomizedTransform<MultiplyTransform> {
    /// `factor ~ Uniform(1 - r, 1 + r)`; a pair or sampler is used as given.
    pub fn from_range(range: impl Into<SamplerArg>) -> Result<Self> {
        let arg = match range.into() {
            SamplerArg::Value(Param::Scalar(r)) => (1.0 - r, 1.0 + r).into(),
            SamplerArg::Value(Param::List(r)) => SamplerArg::Pair(
                Param::List(r.iter().map(|v| 1.0 - v).collect()),
                Param::List(r.iter().map(|v| 1.0 + v).collect()),
            ),
            other => other,
        };
        Ok(Self::new(
            MultiplyTransform::new(1.0),
            Config::new().with("factor", SamplerKind::Uniform.make(arg)?),
        ))
    }
}

impl RandomizedTransform<AddValueTransform> {
    /// `value ~ Uniform(-v, v)`; a pair or sampler is used as given.
    pub fn from_range(value: impl Into<SamplerArg>) -> Result<Self> {
        Ok(Self::new(
            AddValueTransform::new(0.0),
            Config::new().with("value", SamplerKind::Uniform.make(sym_range(value))?),
        ))
    }
}

impl RandomizedTransform<GammaTransform> {
    /// `gamma ~ Uniform(min, max)`.
    pub fn from_range(min: f64, max: f64) -> Result<Self> {
        Ok(Self::new(
            GammaTransform::new(1.0),
            Config::new().with("gamma", Sampler::uniform(min, max)?),
        ))
    }
}
