//! Local Laplacian detail and tone enhancement.
//!
//! The operator builds a stack of remapped Laplacian pyramids of the input
//! luminance, one per intensity level, then assembles an output pyramid by
//! interpolating between the two stack entries nearest to each pixel's local
//! brightness. Collapsing that pyramid and rescaling the original chroma
//! against the new luminance yields the enhanced image.
//!
//! Two execution variants share all pixel arithmetic and produce identical
//! buffers:
//! - [`local_laplacian`] runs single-threaded;
//! - [`local_laplacian_parallel`] distributes the intensity-level stack and
//!   the per-row stages over a rayon pool.
//!
//! Inputs and outputs are planar 16-bit RGB ([`ll_core::Planar`]); the working
//! domain is `f32` in `[0, 1]`.

mod error;
mod filter;
mod parallel;
mod remap;
mod variant;

pub use error::Error;
pub use filter::{Params, local_laplacian};
pub use parallel::local_laplacian_parallel;
pub use remap::RemapLut;
pub use variant::Variant;
