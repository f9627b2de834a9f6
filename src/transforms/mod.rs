//! Transforms over channel-first arrays.
//!
//! - [`base`]: the [`Transform`] contract and [`SharePolicy`] dispatch
//! - [`randomized`]: sampling transform fields per call-unit
//! - [`crop`]: patch/crop/pad region geometry
//! - [`fov`]: field-of-view transforms
//! - [`augment`]: intensity transforms

pub mod augment;
pub mod base;
pub mod crop;
pub mod fov;
pub mod randomized;

pub use augment::{
    AddValueTransform, GammaTransform, GaussianNoiseTransform, MultiplyTransform,
    RandomAddValueTransform, RandomGammaTransform, RandomGaussianNoiseTransform,
    RandomMultiplyTransform,
};
pub use base::{apply_shared, SharePolicy, Transform};
pub use crop::{
    compute_patch_region, power_two_shape, random_center_range, resolve_amounts, Region, Side,
    Unit,
};
pub use fov::{
    CropTransform, FlipTransform, PadTransform, PatchTransform, PowerTwoTransform,
    RandomFlipTransform, RandomPatchTransform,
};
pub use randomized::{Config, Draws, Field, Materialize, RandomizedTransform};
