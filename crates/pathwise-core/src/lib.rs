//! Pathwise Core: shared errors and traits.
//!
//! This crate provides the foundational types used across all Pathwise crates.
//! It has no internal Pathwise dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Configuration abstraction shared by the CLI and embedders

pub mod error;
pub mod traits;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigProvider;
