//! Transform contract and sharing policy.
//!
//! Every transform splits its work in two:
//!
//! - [`Transform::get_parameters`] decides *what* to do for one call-unit
//!   (this is where all randomness lives)
//! - [`Transform::apply_transform`] does it, as a pure function of the
//!   input and the resolved parameters
//!
//! [`Transform::call_many`] drives the split over related arrays (e.g. an
//! image and its label map). The transform's [`SharePolicy`] decides how
//! often parameters are resolved: once for everything, once per array,
//! once per channel index, or once per (array, channel).
//!
//! Arrays are channel-first: axis 0 holds channels, the remaining axes are
//! spatial.

use crate::error::{Error, Result};
use ndarray::{concatenate, ArrayD, Axis, Slice};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Granularity at which parameters are shared within one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharePolicy {
    /// Fresh parameters for every channel of every array.
    Independent,
    /// One parameter set per array, shared by its channels.
    Channels,
    /// One parameter set per channel index, shared by all arrays.
    Tensors,
    /// One parameter set for the whole call.
    #[default]
    Both,
}

impl SharePolicy {
    /// Whether the channels of one array share parameters.
    pub fn shares_channels(self) -> bool {
        matches!(self, Self::Channels | Self::Both)
    }

    /// Whether related arrays share parameters.
    pub fn shares_tensors(self) -> bool {
        matches!(self, Self::Tensors | Self::Both)
    }
}

impl From<bool> for SharePolicy {
    fn from(shared: bool) -> Self {
        if shared {
            Self::Both
        } else {
            Self::Independent
        }
    }
}

impl FromStr for SharePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "true" | "both" | "all" => Ok(Self::Both),
            "false" | "none" | "independent" => Ok(Self::Independent),
            "channels" => Ok(Self::Channels),
            "tensors" => Ok(Self::Tensors),
            other => Err(Error::configuration(format!(
                "unknown sharing policy '{}' (expected true, false, channels or tensors)",
                other
            ))),
        }
    }
}

impl fmt::Display for SharePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Independent => "independent",
            Self::Channels => "channels",
            Self::Tensors => "tensors",
            Self::Both => "both",
        };
        f.write_str(name)
    }
}

/// A transform over channel-first arrays.
pub trait Transform {
    /// Resolved parameters for one call-unit.
    type Parameters;

    /// Sharing policy for composite inputs.
    fn shared(&self) -> SharePolicy;

    /// Resolve parameters for `x` (an array or a single channel of one).
    fn get_parameters(&self, x: &ArrayD<f32>, rng: &mut dyn RngCore) -> Result<Self::Parameters>;

    /// Apply resolved parameters. Must not draw random numbers.
    fn apply_transform(
        &self,
        x: &ArrayD<f32>,
        parameters: &Self::Parameters,
    ) -> Result<ArrayD<f32>>;

    /// Apply to a single array, honoring the channel half of the policy.
    fn call(&self, x: &ArrayD<f32>, rng: &mut dyn RngCore) -> Result<ArrayD<f32>> {
        let mut out = self.call_many(std::slice::from_ref(x), rng)?;
        out.pop()
            .ok_or_else(|| Error::transform("call", "transform produced no output"))
    }

    /// Apply to related arrays, resolving parameters per the sharing policy.
    fn call_many(&self, xs: &[ArrayD<f32>], rng: &mut dyn RngCore) -> Result<Vec<ArrayD<f32>>> {
        apply_shared(self, xs, rng)
    }
}

/// Drive `get_parameters`/`apply_transform` over `xs` per `t.shared()`.
pub fn apply_shared<T: Transform + ?Sized>(
    t: &T,
    xs: &[ArrayD<f32>],
    rng: &mut dyn RngCore,
) -> Result<Vec<ArrayD<f32>>> {
    let Some(first) = xs.first() else {
        return Ok(Vec::new());
    };
    let policy = t.shared();
    tracing::debug!(
        transform = std::any::type_name::<T>(),
        %policy,
        tensors = xs.len(),
        "applying transform"
    );

    match (policy.shares_tensors(), policy.shares_channels()) {
        (true, true) => {
            let parameters = t.get_parameters(first, rng)?;
            xs.iter()
                .map(|x| t.apply_transform(x, &parameters))
                .collect()
        }
        (false, true) => xs
            .iter()
            .map(|x| {
                let parameters = t.get_parameters(x, rng)?;
                t.apply_transform(x, &parameters)
            })
            .collect(),
        (true, false) => {
            let nc = channels(first)?;
            for x in &xs[1..] {
                if channels(x)? != nc {
                    return Err(Error::ShapeMismatch(format!(
                        "channel-wise sharing needs equal channel counts (got {} and {})",
                        nc,
                        x.shape()[0]
                    )));
                }
            }
            let parameters = (0..nc)
                .map(|c| t.get_parameters(&channel(first, c), rng))
                .collect::<Result<Vec<_>>>()?;
            xs.iter()
                .map(|x| {
                    let outs = parameters
                        .iter()
                        .enumerate()
                        .map(|(c, p)| t.apply_transform(&channel(x, c), p))
                        .collect::<Result<Vec<_>>>()?;
                    stack_channels(x, &outs)
                })
                .collect()
        }
        (false, false) => xs
            .iter()
            .map(|x| {
                let outs = (0..channels(x)?)
                    .map(|c| {
                        let xc = channel(x, c);
                        let parameters = t.get_parameters(&xc, rng)?;
                        t.apply_transform(&xc, &parameters)
                    })
                    .collect::<Result<Vec<_>>>()?;
                stack_channels(x, &outs)
            })
            .collect(),
    }
}

fn channels(x: &ArrayD<f32>) -> Result<usize> {
    x.shape().first().copied().ok_or_else(|| {
        Error::InvalidDimensions("expected a channel-first array, got a 0D array".into())
    })
}

/// Channel `c` of `x`, keeping the channel axis.
fn channel(x: &ArrayD<f32>, c: usize) -> ArrayD<f32> {
    x.slice_axis(Axis(0), Slice::from(c..c + 1)).to_owned()
}

/// Re-stack per-channel outputs; a channel-less input passes through.
fn stack_channels(x: &ArrayD<f32>, outs: &[ArrayD<f32>]) -> Result<ArrayD<f32>> {
    if outs.is_empty() {
        return Ok(x.to_owned());
    }
    let views: Vec<_> = outs.iter().map(|a| a.view()).collect();
    concatenate(Axis(0), &views).map_err(|e| {
        Error::ShapeMismatch(format!("per-channel outputs cannot be stacked: {}", e))
    })
}
