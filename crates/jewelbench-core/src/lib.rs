//! # jewelbench-core
//!
//! Core crate for JewelBench. Contains configuration schemas, the
//! precious-metal [`Material`] enumeration, and the unified error system.
//!
//! This crate has **no** internal dependencies on other JewelBench crates.

pub mod config;
pub mod error;
pub mod types;

pub use error::AppError;
pub use types::material::Material;
