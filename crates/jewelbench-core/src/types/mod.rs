//! Domain types shared across crates.

pub mod material;

pub use material::{Material, UnknownMaterial};
