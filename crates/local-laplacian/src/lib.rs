//! Umbrella crate for the `local-laplacian` workspace.
//!
//! Re-exports the buffer, pyramid, and filter crates so applications can
//! depend on a single name. The filter's error type is re-exported as
//! [`FilterError`] to keep it distinct from the buffer error.

pub use ll_core::*;
pub use ll_filter::Error as FilterError;
pub use ll_filter::{Params, RemapLut, Variant, local_laplacian, local_laplacian_parallel};
pub use ll_pyr::*;
