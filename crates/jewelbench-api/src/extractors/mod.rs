//! Custom Axum extractors.

pub mod mesh_form;

pub use mesh_form::MeshForm;
