//! Randomized wrapper around deterministic transforms.
//!
//! A [`RandomizedTransform`] holds a template of some deterministic
//! transform `T` and a [`Config`] of named fields, each either a literal
//! or a [`Sampler`]. Resolving parameters draws every field once, writes
//! the draws into a copy of the template, and lets that copy resolve its
//! own (now deterministic) parameters.
//!
//! ```ignore
//! // Patch of random size, same location for image and label
//! let random_patch = RandomizedTransform::new(
//!     PatchTransform::new(&[64]),
//!     Config::new()
//!         .with("shape", Sampler::randint(32, 96)?)
//!         .with("center", Sampler::uniform(-0.5, 0.5)?),
//! );
//! let out = random_patch.call_many(&[image, label], &mut rng)?;
//! ```

use super::base::{SharePolicy, Transform};
use crate::error::{Error, Result};
use crate::random::{Param, Sample, SampleShape, Sampler, SamplerArg, SamplerKind};
use ndarray::ArrayD;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A configuration field: fixed literal or sampled per call-unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    /// Drawn once per call-unit.
    Sampled(Sampler),
    /// Passed through unchanged.
    Literal(Param),
}

impl Field {
    /// Build a sampled field, turning plain values into a `kind` sampler.
    pub fn random(kind: SamplerKind, arg: impl Into<SamplerArg>) -> Result<Self> {
        kind.make(arg).map(Self::Sampled)
    }

    /// One draw of this field.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Sample> {
        match self {
            Self::Sampled(s) => s.sample(rng, SampleShape::One),
            Self::Literal(p) => Ok(Sample::from(p.clone())),
        }
    }
}

impl From<Sampler> for Field {
    fn from(s: Sampler) -> Self {
        Self::Sampled(s)
    }
}

impl From<Param> for Field {
    fn from(p: Param) -> Self {
        Self::Literal(p)
    }
}

impl From<f64> for Field {
    fn from(v: f64) -> Self {
        Self::Literal(Param::Scalar(v))
    }
}

impl From<Vec<f64>> for Field {
    fn from(v: Vec<f64>) -> Self {
        Self::Literal(Param::List(v))
    }
}

/// Named fields of a randomized transform.
///
/// Fields are drawn in name order so that a seeded generator always
/// produces the same parameters for the same configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    fields: BTreeMap<String, Field>,
}

impl Config {
    /// Empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field (builder style).
    pub fn with(mut self, name: impl Into<String>, field: impl Into<Field>) -> Self {
        self.set(name, field);
        self
    }

    /// Add or replace a field.
    pub fn set(&mut self, name: impl Into<String>, field: impl Into<Field>) {
        self.fields.insert(name.into(), field.into());
    }

    /// A field by name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Whether a field is configured.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Draw every field exactly once.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Draws> {
        let values = self
            .fields
            .iter()
            .map(|(name, field)| Ok((name.clone(), field.draw(rng)?)))
            .collect::<Result<_>>()?;
        Ok(Draws { values })
    }
}

/// Values drawn from a [`Config`] for one call-unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draws {
    values: BTreeMap<String, Sample>,
}

impl Draws {
    /// A drawn value by name.
    pub fn get(&self, name: &str) -> Option<&Sample> {
        self.values.get(name)
    }

    /// A drawn value that must be a single number.
    pub fn scalar(&self, name: &str) -> Result<Option<f64>> {
        match self.values.get(name) {
            None => Ok(None),
            Some(Sample::Scalar(v)) => Ok(Some(*v)),
            Some(Sample::List(v)) if v.len() == 1 => Ok(Some(v[0])),
            Some(other) => Err(Error::configuration(format!(
                "field '{}' must be a single value, got {:?}",
                name, other
            ))),
        }
    }

    /// A drawn value as a list (scalars become one-element lists).
    pub fn list(&self, name: &str) -> Option<Vec<f64>> {
        self.values.get(name).map(Sample::to_list)
    }
}

/// Deterministic transforms that can be rebuilt from drawn fields.
pub trait Materialize: Transform + Clone {
    /// Copy of `self` with the drawn fields written in.
    ///
    /// Fields absent from `draws` keep the template's value; unknown
    /// fields are a configuration error.
    fn materialize(&self, draws: &Draws) -> Result<Self>;
}

/// Reject draws for fields a transform does not have.
pub(crate) fn check_fields(draws: &Draws, known: &[&str], transform: &str) -> Result<()> {
    match draws.values.keys().find(|k| !known.contains(&k.as_str())) {
        Some(unknown) => Err(Error::configuration(format!(
            "{} has no randomizable field '{}' (expected one of {:?})",
            transform, unknown, known
        ))),
        None => Ok(()),
    }
}

/// Samples a fresh `T` for every call-unit.
#[derive(Debug, Clone)]
pub struct RandomizedTransform<T> {
    template: T,
    config: Config,
    shared: SharePolicy,
}

impl<T: Materialize> RandomizedTransform<T> {
    /// Wrap `template`, randomizing the fields named in `config`.
    pub fn new(template: T, config: Config) -> Self {
        Self {
            template,
            config,
            shared: SharePolicy::Both,
        }
    }

    /// Set the sharing policy (default: shared across tensors and channels).
    pub fn with_policy(mut self, policy: impl Into<SharePolicy>) -> Self {
        self.shared = policy.into();
        self
    }

    /// The randomized fields.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The template the draws are written into.
    pub fn template(&self) -> &T {
        &self.template
    }

    /// Draw one concrete transform.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<T> {
        let draws = self.config.draw(rng)?;
        self.template.materialize(&draws)
    }
}

impl<T: Materialize> Transform for RandomizedTransform<T> {
    type Parameters = (T, T::Parameters);

    fn shared(&self) -> SharePolicy {
        self.shared
    }

    fn get_parameters(&self, x: &ArrayD<f32>, rng: &mut dyn RngCore) -> Result<Self::Parameters> {
        let sub = self.sample(rng)?;
        let parameters = sub.get_parameters(x, rng)?;
        Ok((sub, parameters))
    }

    fn apply_transform(
        &self,
        x: &ArrayD<f32>,
        parameters: &Self::Parameters,
    ) -> Result<ArrayD<f32>> {
        let (sub, sub_parameters) = parameters;
        sub.apply_transform(x, sub_parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::get_rng;
    use ndarray::IxDyn;

    #[derive(Debug, Clone)]
    struct Scale {
        factor: f64,
    }

    impl Transform for Scale {
        type Parameters = ();

        fn shared(&self) -> SharePolicy {
            SharePolicy::Both
        }

        fn get_parameters(&self, _x: &ArrayD<f32>, _rng: &mut dyn RngCore) -> Result<()> {
            Ok(())
        }

        fn apply_transform(&self, x: &ArrayD<f32>, _: &()) -> Result<ArrayD<f32>> {
            Ok(x.mapv(|v| v * self.factor as f32))
        }
    }

    impl Materialize for Scale {
        fn materialize(&self, draws: &Draws) -> Result<Self> {
            check_fields(draws, &["factor"], "Scale")?;
            Ok(Self {
                factor: draws.scalar("factor")?.unwrap_or(self.factor),
            })
        }
    }

    #[test]
    fn test_literal_passes_through() {
        let mut rng = get_rng(Some(0));
        let t = RandomizedTransform::new(Scale { factor: 1.0 }, Config::new().with("factor", 3.0));
        let x = ArrayD::<f32>::ones(IxDyn(&[1, 2]));
        let y = t.call(&x, &mut rng).unwrap();
        assert!(y.iter().all(|&v| v == 3.0));
    }

    #[test]
    fn test_sampled_field_within_bounds() {
        let mut rng = get_rng(Some(1));
        let t = RandomizedTransform::new(
            Scale { factor: 1.0 },
            Config::new().with("factor", Sampler::uniform(2.0, 4.0).unwrap()),
        );
        for _ in 0..50 {
            let sub = t.sample(&mut rng).unwrap();
            assert!((2.0..=4.0).contains(&sub.factor));
        }
    }

    #[test]
    fn test_channels_draw_independently() {
        let mut rng = get_rng(Some(2));
        let t = RandomizedTransform::new(
            Scale { factor: 1.0 },
            Config::new().with("factor", Sampler::uniform(0.0, 100.0).unwrap()),
        )
        .with_policy(false);
        let x = ArrayD::<f32>::ones(IxDyn(&[2, 1]));
        let y = t.call(&x, &mut rng).unwrap();
        assert_ne!(y[[0, 0]], y[[1, 0]]);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut rng = get_rng(Some(3));
        let t = RandomizedTransform::new(Scale { factor: 1.0 }, Config::new().with("offset", 1.0));
        assert!(matches!(t.sample(&mut rng), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_config_from_json() {
        let config: Config =
            serde_json::from_str(r#"{"factor": {"kind": "uniform", "min": 1, "max": 2}}"#)
                .unwrap();
        assert!(matches!(config.get("factor"), Some(Field::Sampled(_))));
        let literal: Config = serde_json::from_str(r#"{"factor": [1.0, 2.0]}"#).unwrap();
        assert_eq!(
            literal.get("factor"),
            Some(&Field::Literal(Param::List(vec![1.0, 2.0])))
        );
    }
}
