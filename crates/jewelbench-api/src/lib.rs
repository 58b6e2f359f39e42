//! # jewelbench-api
//!
//! HTTP API layer for JewelBench built on Axum.
//!
//! Exposes the valuation pipeline and CAD export over REST, with CORS,
//! compression, request logging, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
