//! Finite fields.
//!
//! This module re-exports the two modular integer types used by the
//! curve: `GFp` (the base field, integers modulo the 256-bit prime p)
//! and `Scalar` (integers modulo the curve order n). Both are defined
//! in the `backend` module.

pub use crate::backend::GFp;
pub use crate::backend::Scalar;
