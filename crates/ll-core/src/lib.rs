//! Foundational buffers for the local-laplacian workspace.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//!
//! ## Planar Buffers
//! Multi-channel images are stored channel-major: all of channel 0's plane,
//! then channel 1's, and so on. Each plane is row-major and exposed as a
//! borrowed 2-D view.
//!
//! ## Sample Widths
//! The processing pipeline works on 16-bit samples. 8-bit sources are widened
//! with `v * 257` (so 255 maps to 65535) and narrowed back with integer
//! division by 257, which round-trips every 8-bit value exactly.

mod border;
mod convert;
mod error;
mod image;
mod planar;

pub use border::map_clamp;
pub use convert::{narrow_u16_to_u8, widen_u8_to_u16};
pub use error::Error;
pub use image::{Image, ImageView, ImageViewMut};
pub use planar::Planar;
