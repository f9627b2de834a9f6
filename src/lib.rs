//! # medaug
//!
//! Randomized field-of-view and intensity transforms for N-dimensional
//! (medical) arrays.
//!
//! ## Features
//!
//! - **Samplers**: Fixed, Uniform, RandInt, Normal, LogNormal and
//!   RandKFrom distributions with per-position broadcasting of list
//!   parameters
//! - **Parameter sharing**: one draw for the whole call, per array, per
//!   channel index, or per (array, channel)
//! - **Geometry**: flip, patch, crop, pad and power-of-two sizing with
//!   boundary-extended out-of-bounds voxels
//! - **Intensity**: Gaussian noise, scaling, shifting and gamma, in
//!   parallel via rayon
//!
//! ## Quick Start
//!
//! ```ignore
//! use medaug::random::get_rng;
//! use medaug::transforms::{RandomPatchTransform, Transform};
//!
//! let mut rng = get_rng(Some(42));
//! let patch = RandomPatchTransform::new(&[64, 64, 64]);
//! // Same location in the image and its label map
//! let outputs = patch.call_many(&[image, label], &mut rng)?;
//! ```
//!
//! Arrays are channel-first `ndarray::ArrayD<f32>`: axis 0 holds channels
//! and the remaining axes are spatial.

#![warn(missing_docs)]

pub mod error;
pub mod padding;
pub mod random;
pub mod transforms;
pub mod utils;

pub use error::{Error, Result};
pub use padding::{pad, Bound};
pub use random::{get_rng, Param, RandKFrom, Sample, SampleShape, Sampler, TransformRng};
pub use transforms::{SharePolicy, Transform};
