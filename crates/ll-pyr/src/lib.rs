//! Pyramid primitives for multi-resolution image filtering.
//!
//! Downsampling applies a separable `[1, 3, 3, 1] / 8` binomial filter before
//! 2x decimation; upsampling zooms 2x by linear interpolation with alternating
//! 1/4 - 3/4 weights. The two are phase-matched: collapsing an unmodified
//! Laplacian pyramid reconstructs the Gaussian base level exactly.
//!
//! Drop-odd policy:
//! - Downsample output size is `(src.width() / 2, src.height() / 2)`.
//! - Upsampling is driven by the destination size, with edge taps clamped, so
//!   odd base dimensions survive a down/up round trip.
//!
//! Border handling is edge replication (`ll_core::map_clamp`) throughout.

mod downsample;
mod pyramid;
mod upsample;

pub use downsample::{downsample_binomial_f32, downsample_binomial_f32_into};
pub use pyramid::{GaussianPyramid, LaplacianPyramid, collapse_laplacian_into, max_levels_for};
pub use upsample::upsample_lerp_f32_into;
