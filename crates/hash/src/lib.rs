// Copyright 2025 Irreducible Inc.

//! A generic [BLAKE2](https://www.blake2.net/blake2.pdf) engine covering both word widths.
//!
//! BLAKE2b (64-bit words) and BLAKE2s (32-bit words) share one implementation parameterized by
//! a [`Variant`] descriptor. The full parameter block is exposed through [`HashConfig`], so
//! keyed, salted, personalized and tree-mode hashing are all supported, and [`BinaryTree`]
//! assembles tree-mode nodes into whole binary hash trees.

pub mod compress;
mod error;
pub mod hasher;
pub mod params;
pub mod tree;
pub mod var_core;
pub mod variant;

pub use error::*;
pub use hasher::*;
pub use params::*;
pub use tree::*;
pub use var_core::*;
pub use variant::*;
