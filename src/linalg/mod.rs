//! Linear algebra module.
//!
//! Contains the low level in-place elimination routines, which operate on a [`MatMut`] and
//! let the caller decide where the result lives, and their corresponding high level wrappers in
//! [`solvers`], which own their results and cache them.
//!
//! [`MatMut`]: crate::MatMut

pub mod echelon;

/// High level wrappers that own and cache reduction results.
pub mod solvers;
