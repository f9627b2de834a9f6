//! Parameter samplers and the random source they draw from.

pub mod factory;
pub mod rng;
pub mod sampler;

pub use factory::{lower_range, sym_range, upper_range, SamplerArg, SamplerKind};
pub use rng::{get_rng, TransformRng};
pub use sampler::{Param, RandKFrom, Sample, SampleShape, Sampler};
