//! Random samplers for transform parameters.
//!
//! A [`Sampler`] holds a handful of named parameters ("theta") and draws
//! values from its distribution in one of three forms:
//!
//! - [`SampleShape::One`]: a single scalar, or one value per position when
//!   any parameter is vector-valued (e.g. per-axis bounds)
//! - [`SampleShape::Count`]: a flat list, parameters broadcast in lock-step
//! - [`SampleShape::Shape`]: a dense array drawn i.i.d. per element
//!
//! # Example
//!
//! ```ignore
//! use medaug::random::{get_rng, Sampler, SampleShape};
//!
//! let mut rng = get_rng(Some(42));
//! // One value per axis: [0, 10], [5, 20], [5, 20]
//! let per_axis = Sampler::uniform(vec![0.0, 5.0], vec![10.0, 20.0, 20.0])?;
//! let values = per_axis.sample(&mut rng, SampleShape::One)?;
//! ```

use crate::error::{Error, Result};
use crate::utils::ensure_list;
use ndarray::{ArrayD, IxDyn};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, LogNormal, Normal, StandardNormal};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Parameters and samples
// ============================================================================

/// Scalar or per-position sampler parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    /// Same value at every position.
    Scalar(f64),
    /// One value per position.
    List(Vec<f64>),
}

impl Default for Param {
    fn default() -> Self {
        Self::Scalar(0.0)
    }
}

impl Param {
    /// Whether the parameter is vector-valued.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Values as a list (a scalar becomes a one-element list).
    pub fn to_list(&self) -> Vec<f64> {
        match self {
            Self::Scalar(v) => vec![*v],
            Self::List(v) => v.clone(),
        }
    }

    /// Values broadcast to exactly `size` positions.
    pub fn broadcast(&self, size: usize) -> Vec<f64> {
        match self {
            Self::Scalar(v) => vec![*v; size],
            Self::List(v) => ensure_list(v, size),
        }
    }

    fn scalar(&self, name: &str) -> Result<f64> {
        match self {
            Self::Scalar(v) => Ok(*v),
            Self::List(_) => Err(Error::sample_request(format!(
                "parameter '{}' must be scalar to sample a dense array",
                name
            ))),
        }
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<i32> for Param {
    fn from(v: i32) -> Self {
        Self::Scalar(f64::from(v))
    }
}

impl From<Vec<f64>> for Param {
    fn from(v: Vec<f64>) -> Self {
        Self::List(v)
    }
}

impl From<&[f64]> for Param {
    fn from(v: &[f64]) -> Self {
        Self::List(v.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Param {
    fn from(v: [f64; N]) -> Self {
        Self::List(v.to_vec())
    }
}

/// How many values to draw.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SampleShape {
    /// One scalar, or one value per broadcast position.
    #[default]
    One,
    /// A flat list of this many values.
    Count(usize),
    /// A dense array with this shape.
    Shape(Vec<usize>),
}

/// Values drawn from a [`Sampler`].
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    /// A single value.
    Scalar(f64),
    /// One value per position.
    List(Vec<f64>),
    /// Dense array of i.i.d. draws.
    Array(ArrayD<f64>),
}

impl Sample {
    /// The value if this is a scalar sample.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Flatten into a list (a scalar becomes a one-element list).
    pub fn to_list(&self) -> Vec<f64> {
        match self {
            Self::Scalar(v) => vec![*v],
            Self::List(v) => v.clone(),
            Self::Array(a) => a.iter().copied().collect(),
        }
    }

    /// The dense array, if this is one.
    pub fn into_array(self) -> Option<ArrayD<f64>> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl From<Param> for Sample {
    fn from(p: Param) -> Self {
        match p {
            Param::Scalar(v) => Self::Scalar(v),
            Param::List(v) => Self::List(v),
        }
    }
}

// ============================================================================
// Sampler
// ============================================================================

fn unit_param() -> Param {
    Param::Scalar(1.0)
}

/// A probability distribution over transform parameters.
///
/// Deserialized samplers are validated like constructed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "kind", rename_all = "snake_case")]
pub enum Sampler {
    /// Always returns `value`.
    Fixed {
        /// The fixed value.
        value: Param,
    },
    /// Continuous uniform on `[min, max]`.
    Uniform {
        /// Lower bound (inclusive).
        #[serde(default)]
        min: Param,
        /// Upper bound (inclusive).
        max: Param,
    },
    /// Discrete uniform on the closed integer interval `[min, max]`.
    RandInt {
        /// Lower bound (inclusive).
        #[serde(default)]
        min: Param,
        /// Upper bound (inclusive).
        max: Param,
    },
    /// Gaussian.
    Normal {
        /// Mean.
        #[serde(default)]
        mu: Param,
        /// Standard deviation.
        #[serde(default = "unit_param")]
        sigma: Param,
    },
    /// Log-normal: `exp` of a Gaussian.
    LogNormal {
        /// Mean of the log.
        #[serde(default)]
        mu: Param,
        /// Standard deviation of the log.
        #[serde(default = "unit_param")]
        sigma: Param,
    },
    /// Pick `k` items from a finite candidate list.
    RandKFrom(RandKFrom),
}

/// Selector drawing `k` items from `range`, with or without replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct RandKFrom {
    /// Candidate values.
    pub range: Vec<f64>,
    /// Number of picks (`None` = uniform on `1..=range.len()` per call).
    #[serde(default)]
    pub k: Option<usize>,
    /// Whether the same candidate can be picked twice.
    #[serde(default)]
    pub replacement: bool,
}

impl Serialize for RandKFrom {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        RandKFrom::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for RandKFrom {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let selector = RandKFrom::deserialize(deserializer)?;
        selector.validate().map_err(de::Error::custom)?;
        Ok(selector)
    }
}

impl Serialize for Sampler {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Sampler::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Sampler {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let sampler = Sampler::deserialize(deserializer)?;
        sampler.validate().map_err(de::Error::custom)?;
        Ok(sampler)
    }
}

impl RandKFrom {
    fn validate(&self) -> Result<()> {
        if self.range.is_empty() {
            return Err(Error::configuration(
                "RandKFrom needs at least one candidate value",
            ));
        }
        match self.k {
            Some(0) => Err(Error::configuration("RandKFrom: k must be positive")),
            Some(k) if !self.replacement && k > self.range.len() => {
                Err(Error::configuration(format!(
                    "cannot sample {} elements from {} without replacement \
                     (use replacement=true)",
                    k,
                    self.range.len()
                )))
            }
            _ => Ok(()),
        }
    }

    /// Draw one selection set.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<f64>> {
        self.validate()?;
        let len = self.range.len();
        let k = match self.k {
            Some(k) => k,
            None => rng.gen_range(1..=len),
        };
        if self.replacement {
            Ok((0..k).map(|_| self.range[rng.gen_range(0..len)]).collect())
        } else {
            let mut pool = self.range.clone();
            pool.shuffle(rng);
            pool.truncate(k);
            Ok(pool)
        }
    }
}

impl Sampler {
    /// Fixed value (no randomness).
    pub fn fixed(value: impl Into<Param>) -> Self {
        Self::Fixed {
            value: value.into(),
        }
    }

    /// Continuous uniform on `[min, max]`.
    pub fn uniform(min: impl Into<Param>, max: impl Into<Param>) -> Result<Self> {
        Self::Uniform {
            min: min.into(),
            max: max.into(),
        }
        .validated()
    }

    /// Continuous uniform on `[0, max]`.
    pub fn uniform_max(max: impl Into<Param>) -> Result<Self> {
        Self::uniform(0.0, max)
    }

    /// Discrete uniform on the closed interval `[min, max]`.
    pub fn randint(min: impl Into<Param>, max: impl Into<Param>) -> Result<Self> {
        Self::RandInt {
            min: min.into(),
            max: max.into(),
        }
        .validated()
    }

    /// Discrete uniform on `[0, max]`.
    pub fn randint_max(max: impl Into<Param>) -> Result<Self> {
        Self::randint(0.0, max)
    }

    /// Gaussian with mean `mu` and standard deviation `sigma`.
    pub fn normal(mu: impl Into<Param>, sigma: impl Into<Param>) -> Result<Self> {
        Self::Normal {
            mu: mu.into(),
            sigma: sigma.into(),
        }
        .validated()
    }

    /// Log-normal whose log has mean `mu` and standard deviation `sigma`.
    pub fn lognormal(mu: impl Into<Param>, sigma: impl Into<Param>) -> Result<Self> {
        Self::LogNormal {
            mu: mu.into(),
            sigma: sigma.into(),
        }
        .validated()
    }

    /// Pick `k` values from `range` (random `k` when `None`).
    ///
    /// Fails eagerly when more unique picks are requested than available.
    pub fn rand_k_from(
        range: impl IntoIterator<Item = f64>,
        k: Option<usize>,
        replacement: bool,
    ) -> Result<Self> {
        Self::RandKFrom(RandKFrom {
            range: range.into_iter().collect(),
            k,
            replacement,
        })
        .validated()
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Check the parameters at every broadcast position.
    pub fn validate(&self) -> Result<()> {
        let width = self.nsamples().unwrap_or(1);
        match self {
            Self::Fixed { .. } => Ok(()),
            Self::Uniform { min, max } => {
                for (lo, hi) in min.broadcast(width).into_iter().zip(max.broadcast(width)) {
                    check_bounds("Uniform", lo, hi)?;
                }
                Ok(())
            }
            Self::RandInt { min, max } => {
                for (lo, hi) in min.broadcast(width).into_iter().zip(max.broadcast(width)) {
                    check_int_bounds(lo, hi)?;
                }
                Ok(())
            }
            Self::Normal { mu, sigma } | Self::LogNormal { mu, sigma } => {
                for (m, s) in mu.broadcast(width).into_iter().zip(sigma.broadcast(width)) {
                    check_gaussian(m, s)?;
                }
                Ok(())
            }
            Self::RandKFrom(inner) => inner.validate(),
        }
    }

    /// Named parameters of this sampler, in declaration order.
    pub fn theta(&self) -> Vec<(&'static str, &Param)> {
        match self {
            Self::Fixed { value } => vec![("value", value)],
            Self::Uniform { min, max } | Self::RandInt { min, max } => {
                vec![("min", min), ("max", max)]
            }
            Self::Normal { mu, sigma } | Self::LogNormal { mu, sigma } => {
                vec![("mu", mu), ("sigma", sigma)]
            }
            Self::RandKFrom(_) => Vec::new(),
        }
    }

    /// Broadcast width implied by vector-valued parameters, if any.
    pub fn nsamples(&self) -> Option<usize> {
        self.theta()
            .into_iter()
            .filter_map(|(_, p)| match p {
                Param::List(v) => Some(v.len()),
                Param::Scalar(_) => None,
            })
            .max()
    }

    /// A parameter by name, broadcast to the common width.
    pub fn param(&self, name: &str) -> Option<Param> {
        let width = self.nsamples();
        self.theta()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| match width {
                Some(w) => Param::List(p.broadcast(w)),
                None => p.clone(),
            })
    }

    /// Draw values from the distribution.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: SampleShape) -> Result<Sample> {
        if let Self::RandKFrom(inner) = self {
            if n != SampleShape::One {
                return Err(Error::sample_request(
                    "RandKFrom cannot sample multiple elements",
                ));
            }
            return inner.sample(rng).map(Sample::List);
        }

        let sample = match n {
            SampleShape::One => match self.nsamples() {
                Some(width) => Sample::List(self.sample_positions(rng, width)?),
                None => Sample::Scalar(self.sample_scalar(rng)?),
            },
            SampleShape::Count(count) => Sample::List(self.sample_positions(rng, count)?),
            SampleShape::Shape(shape) => Sample::Array(self.sample_array(rng, &shape)?),
        };
        tracing::trace!(sampler = ?self, ?sample, "sampled");
        Ok(sample)
    }

    /// Draw a single value (or one per broadcast position).
    pub fn sample_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Sample> {
        self.sample(rng, SampleShape::One)
    }

    /// Draw `count` values with parameters broadcast in lock-step.
    pub fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Result<Vec<f64>> {
        Ok(self.sample(rng, SampleShape::Count(count))?.to_list())
    }

    fn sample_scalar<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        let values: Vec<f64> = self
            .theta()
            .into_iter()
            .map(|(name, p)| p.scalar(name))
            .collect::<Result<_>>()?;
        draw(self, rng, &values)
    }

    fn sample_positions<R: Rng + ?Sized>(&self, rng: &mut R, width: usize) -> Result<Vec<f64>> {
        let columns: Vec<Vec<f64>> = self
            .theta()
            .into_iter()
            .map(|(_, p)| p.broadcast(width))
            .collect();
        (0..width)
            .map(|i| {
                let row: Vec<f64> = columns.iter().map(|c| c[i]).collect();
                draw(self, rng, &row)
            })
            .collect()
    }

    /// Draw a dense array; every parameter must be scalar.
    pub fn sample_array<R: Rng + ?Sized>(&self, rng: &mut R, shape: &[usize]) -> Result<ArrayD<f64>> {
        let dim = IxDyn(shape);
        match self {
            Self::Fixed { value } => Ok(ArrayD::from_elem(dim, value.scalar("value")?)),
            Self::Uniform { min, max } => {
                let (lo, hi) = (min.scalar("min")?, max.scalar("max")?);
                check_bounds("Uniform", lo, hi)?;
                Ok(ArrayD::from_shape_simple_fn(dim, || rng.gen::<f64>() * (hi - lo) + lo))
            }
            Self::RandInt { min, max } => {
                let (lo, hi) = (min.scalar("min")?, max.scalar("max")?);
                check_int_bounds(lo, hi)?;
                let (lo, width) = (lo as i64, (hi - lo) as i64 + 1);
                Ok(ArrayD::from_shape_simple_fn(dim, || {
                    (rng.gen_range(0..width) + lo) as f64
                }))
            }
            Self::Normal { mu, sigma } => {
                let (m, s) = (mu.scalar("mu")?, sigma.scalar("sigma")?);
                check_gaussian(m, s)?;
                Ok(ArrayD::from_shape_simple_fn(dim, || {
                    rng.sample::<f64, _>(StandardNormal) * s + m
                }))
            }
            Self::LogNormal { mu, sigma } => {
                let (m, s) = (mu.scalar("mu")?, sigma.scalar("sigma")?);
                check_gaussian(m, s)?;
                Ok(ArrayD::from_shape_simple_fn(dim, || {
                    (rng.sample::<f64, _>(StandardNormal) * s + m).exp()
                }))
            }
            Self::RandKFrom(_) => Err(Error::sample_request(
                "RandKFrom cannot sample multiple elements",
            )),
        }
    }
}

/// One draw given the theta values at a single position.
fn draw<R: Rng + ?Sized>(sampler: &Sampler, rng: &mut R, theta: &[f64]) -> Result<f64> {
    match sampler {
        Sampler::Fixed { .. } => Ok(theta[0]),
        Sampler::Uniform { .. } => {
            let (lo, hi) = (theta[0], theta[1]);
            check_bounds("Uniform", lo, hi)?;
            Ok(rng.gen_range(lo..=hi))
        }
        Sampler::RandInt { .. } => {
            let (lo, hi) = (theta[0], theta[1]);
            check_int_bounds(lo, hi)?;
            Ok(rng.gen_range(lo as i64..=hi as i64) as f64)
        }
        Sampler::Normal { .. } => Normal::new(theta[0], theta[1])
            .map(|d| d.sample(rng))
            .map_err(|e| Error::configuration(format!("Normal: {}", e))),
        Sampler::LogNormal { .. } => LogNormal::new(theta[0], theta[1])
            .map(|d| d.sample(rng))
            .map_err(|e| Error::configuration(format!("LogNormal: {}", e))),
        Sampler::RandKFrom(_) => Err(Error::sample_request(
            "RandKFrom only produces selection sets",
        )),
    }
}

fn check_bounds(kind: &str, lo: f64, hi: f64) -> Result<()> {
    if !lo.is_finite() || !hi.is_finite() {
        return Err(Error::configuration(format!(
            "{}: bounds must be finite (got [{}, {}])",
            kind, lo, hi
        )));
    }
    if lo > hi {
        return Err(Error::configuration(format!(
            "{}: min ({}) cannot be greater than max ({})",
            kind, lo, hi
        )));
    }
    Ok(())
}

fn check_int_bounds(lo: f64, hi: f64) -> Result<()> {
    check_bounds("RandInt", lo, hi)?;
    if lo.fract() != 0.0 || hi.fract() != 0.0 {
        return Err(Error::configuration(format!(
            "RandInt: bounds must be integers (got [{}, {}])",
            lo, hi
        )));
    }
    Ok(())
}

fn check_gaussian(mu: f64, sigma: f64) -> Result<()> {
    if !mu.is_finite() || !sigma.is_finite() || sigma < 0.0 {
        return Err(Error::configuration(format!(
            "Gaussian parameters must be finite with sigma >= 0 (got mu={}, sigma={})",
            mu, sigma
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::get_rng;

    #[test]
    fn test_uniform_scalar_in_range() {
        let mut rng = get_rng(Some(0));
        let s = Sampler::uniform(-2.0, 3.0).unwrap();
        for _ in 0..10_000 {
            let v = s.sample_one(&mut rng).unwrap().as_scalar().unwrap();
            assert!((-2.0..=3.0).contains(&v));
        }
    }

    #[test]
    fn test_randint_closed_interval() {
        let mut rng = get_rng(Some(1));
        let s = Sampler::randint(2, 4).unwrap();
        let mut seen = [false; 3];
        for _ in 0..10_000 {
            let v = s.sample_one(&mut rng).unwrap().as_scalar().unwrap();
            assert!((2.0..=4.0).contains(&v));
            assert_eq!(v.fract(), 0.0);
            seen[(v as usize) - 2] = true;
        }
        // Both ends are reachable
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_per_axis_broadcast_pairs_positions() {
        let mut rng = get_rng(Some(2));
        let s = Sampler::uniform(vec![0.0, 100.0], vec![1.0, 101.0, 200.0]).unwrap();
        assert_eq!(s.nsamples(), Some(3));
        // Shorter `min` repeats its last entry
        assert_eq!(s.param("min"), Some(Param::List(vec![0.0, 100.0, 100.0])));

        let v = s.sample_one(&mut rng).unwrap().to_list();
        assert_eq!(v.len(), 3);
        assert!((0.0..=1.0).contains(&v[0]));
        assert!((100.0..=101.0).contains(&v[1]));
        assert!((100.0..=200.0).contains(&v[2]));
    }

    #[test]
    fn test_count_broadcasts_scalars() {
        let mut rng = get_rng(Some(3));
        let s = Sampler::randint(5, 5).unwrap();
        assert_eq!(s.sample_n(&mut rng, 4).unwrap(), vec![5.0; 4]);
        assert!(s.sample_n(&mut rng, 0).unwrap().is_empty());
    }

    #[test]
    fn test_dense_requires_scalar_params() {
        let mut rng = get_rng(Some(4));
        let s = Sampler::normal(vec![0.0, 1.0], 1.0).unwrap();
        let err = s.sample(&mut rng, SampleShape::Shape(vec![2, 2])).unwrap_err();
        assert!(matches!(err, Error::InvalidSampleRequest(_)));
    }

    #[test]
    fn test_dense_randint_and_lognormal() {
        let mut rng = get_rng(Some(5));
        let ints = Sampler::randint(-1, 1)
            .unwrap()
            .sample_array(&mut rng, &[8, 8])
            .unwrap();
        assert_eq!(ints.shape(), &[8, 8]);
        assert!(ints.iter().all(|v| (-1.0..=1.0).contains(v) && v.fract() == 0.0));

        let pos = Sampler::lognormal(0.0, 0.5)
            .unwrap()
            .sample_array(&mut rng, &[16])
            .unwrap();
        assert!(pos.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_fixed_is_deterministic() {
        let mut rng = get_rng(None);
        let s = Sampler::fixed(vec![1.5, 2.5]);
        assert_eq!(
            s.sample_one(&mut rng).unwrap(),
            Sample::List(vec![1.5, 2.5])
        );
        let scalar = Sampler::fixed(0.25);
        let arr = scalar.sample_array(&mut rng, &[3, 2]).unwrap();
        assert!(arr.iter().all(|&v| v == 0.25));
    }

    #[test]
    fn test_rand_k_from_distinct() {
        let mut rng = get_rng(Some(6));
        let s = Sampler::rand_k_from((0..5).map(f64::from), Some(3), false).unwrap();
        for _ in 0..200 {
            let mut picks = s.sample_one(&mut rng).unwrap().to_list();
            assert_eq!(picks.len(), 3);
            picks.sort_by(|a, b| a.partial_cmp(b).unwrap());
            picks.dedup();
            assert_eq!(picks.len(), 3);
            assert!(picks.iter().all(|v| (0.0..5.0).contains(v)));
        }
    }

    #[test]
    fn test_rand_k_from_random_k() {
        let mut rng = get_rng(Some(7));
        let s = Sampler::rand_k_from([1.0, 2.0, 3.0], None, false).unwrap();
        for _ in 0..500 {
            let len = s.sample_one(&mut rng).unwrap().to_list().len();
            assert!((1..=3).contains(&len));
        }
    }

    #[test]
    fn test_rand_k_from_with_replacement_repeats() {
        let mut rng = get_rng(Some(8));
        let s = Sampler::rand_k_from([0.0, 1.0], Some(6), true).unwrap();
        let picks = s.sample_one(&mut rng).unwrap().to_list();
        assert_eq!(picks.len(), 6);
        let mut distinct = picks.clone();
        distinct.sort_by(|a, b| a.partial_cmp(b).unwrap());
        distinct.dedup();
        assert!(distinct.len() < picks.len());
    }

    #[test]
    fn test_rand_k_from_rejects_counts() {
        let mut rng = get_rng(Some(9));
        let s = Sampler::rand_k_from([0.0, 1.0], Some(1), false).unwrap();
        assert!(matches!(
            s.sample(&mut rng, SampleShape::Count(2)),
            Err(Error::InvalidSampleRequest(_))
        ));
        assert!(s.sample(&mut rng, SampleShape::Shape(vec![2])).is_err());
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            Sampler::rand_k_from([0.0, 1.0], Some(3), false),
            Err(Error::Configuration(_))
        ));
        assert!(Sampler::rand_k_from([0.0, 1.0], Some(3), true).is_ok());
        assert!(Sampler::rand_k_from(Vec::new(), None, false).is_err());
        assert!(Sampler::uniform(2.0, 1.0).is_err());
        assert!(Sampler::randint(0.5, 3.0).is_err());
        assert!(Sampler::normal(0.0, -1.0).is_err());
    }
}
