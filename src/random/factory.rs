//! Building samplers from loosely specified user values.
//!
//! Transform constructors accept "a number, a pair of numbers, or a
//! sampler" for their random fields. [`SamplerArg`] is that tagged union
//! and [`SamplerKind::make`] turns it into a concrete [`Sampler`].

use super::sampler::{Param, Sampler};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User-facing value for a random field.
#[derive(Debug, Clone, PartialEq)]
pub enum SamplerArg {
    /// Already a sampler; used as is.
    Sampler(Sampler),
    /// A single positional argument.
    Value(Param),
    /// Two positional arguments.
    Pair(Param, Param),
}

impl From<Sampler> for SamplerArg {
    fn from(s: Sampler) -> Self {
        Self::Sampler(s)
    }
}

impl From<Param> for SamplerArg {
    fn from(p: Param) -> Self {
        Self::Value(p)
    }
}

impl From<f64> for SamplerArg {
    fn from(v: f64) -> Self {
        Self::Value(Param::Scalar(v))
    }
}

impl From<Vec<f64>> for SamplerArg {
    fn from(v: Vec<f64>) -> Self {
        Self::Value(Param::List(v))
    }
}

impl From<(f64, f64)> for SamplerArg {
    fn from((a, b): (f64, f64)) -> Self {
        Self::Pair(Param::Scalar(a), Param::Scalar(b))
    }
}

impl From<(Vec<f64>, Vec<f64>)> for SamplerArg {
    fn from((a, b): (Vec<f64>, Vec<f64>)) -> Self {
        Self::Pair(Param::List(a), Param::List(b))
    }
}

/// Distribution family used when a [`SamplerArg`] is not already a sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplerKind {
    /// [`Sampler::Fixed`]
    Fixed,
    /// [`Sampler::Uniform`]
    Uniform,
    /// [`Sampler::RandInt`]
    RandInt,
    /// [`Sampler::Normal`]
    Normal,
    /// [`Sampler::LogNormal`]
    LogNormal,
}

impl SamplerKind {
    /// Build a sampler of this kind from positional arguments.
    ///
    /// A single value is the upper bound for `Uniform`/`RandInt` and the
    /// mean for `Normal`/`LogNormal`; a pair is `(min, max)` or
    /// `(mu, sigma)`. An existing sampler is returned unchanged.
    pub fn make(self, arg: impl Into<SamplerArg>) -> Result<Sampler> {
        match arg.into() {
            SamplerArg::Sampler(s) => Ok(s),
            SamplerArg::Value(v) => match self {
                Self::Fixed => Ok(Sampler::fixed(v)),
                Self::Uniform => Sampler::uniform(0.0, v),
                Self::RandInt => Sampler::randint(0.0, v),
                Self::Normal => Sampler::normal(v, 1.0),
                Self::LogNormal => Sampler::lognormal(v, 1.0),
            },
            SamplerArg::Pair(a, b) => match self {
                Self::Fixed => Err(Error::configuration(
                    "Fixed takes a single value, got a pair",
                )),
                Self::Uniform => Sampler::uniform(a, b),
                Self::RandInt => Sampler::randint(a, b),
                Self::Normal => Sampler::normal(a, b),
                Self::LogNormal => Sampler::lognormal(a, b),
            },
        }
    }

    /// Build a sampler of this kind from named parameters.
    pub fn from_theta(self, theta: &BTreeMap<String, Param>) -> Result<Sampler> {
        let allowed: &[&str] = match self {
            Self::Fixed => &["value"],
            Self::Uniform | Self::RandInt => &["min", "max"],
            Self::Normal | Self::LogNormal => &["mu", "sigma"],
        };
        if let Some(unknown) = theta.keys().find(|k| !allowed.contains(&k.as_str())) {
            return Err(Error::configuration(format!(
                "unknown parameter '{}' for {:?} (expected one of {:?})",
                unknown, self, allowed
            )));
        }
        let get = |name: &str| theta.get(name).cloned();

        match self {
            Self::Fixed => get("value")
                .map(Sampler::fixed)
                .ok_or_else(|| Error::configuration("Fixed: expected a value")),
            Self::Uniform | Self::RandInt => {
                let max = get("max").ok_or_else(|| {
                    Error::configuration(format!("{:?}: expected at least a max", self))
                })?;
                let min = get("min").unwrap_or_default();
                if self == Self::Uniform {
                    Sampler::uniform(min, max)
                } else {
                    Sampler::randint(min, max)
                }
            }
            Self::Normal | Self::LogNormal => {
                let mu = get("mu").unwrap_or_default();
                let sigma = get("sigma").unwrap_or(Param::Scalar(1.0));
                if self == Self::Normal {
                    Sampler::normal(mu, sigma)
                } else {
                    Sampler::lognormal(mu, sigma)
                }
            }
        }
    }
}

fn negate(p: &Param) -> Param {
    match p {
        Param::Scalar(v) => Param::Scalar(-v),
        Param::List(v) => Param::List(v.iter().map(|x| -x).collect()),
    }
}

/// `x` becomes the symmetric range `(-x, x)`; pairs and samplers pass through.
pub fn sym_range(x: impl Into<SamplerArg>) -> SamplerArg {
    match x.into() {
        SamplerArg::Value(v) => SamplerArg::Pair(negate(&v), v),
        other => other,
    }
}

/// `x` becomes the range `(min, x)`; pairs and samplers pass through.
pub fn upper_range(x: impl Into<SamplerArg>, min: f64) -> SamplerArg {
    match x.into() {
        SamplerArg::Value(v) => SamplerArg::Pair(Param::Scalar(min), v),
        other => other,
    }
}

/// `x` becomes the range `(x, max)`; pairs and samplers pass through.
pub fn lower_range(x: impl Into<SamplerArg>, max: f64) -> SamplerArg {
    match x.into() {
        SamplerArg::Value(v) => SamplerArg::Pair(v, Param::Scalar(max)),
        other => other,
    }
}
