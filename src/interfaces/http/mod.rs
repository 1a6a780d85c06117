//! HTTP REST API interfaces
//!
//! - `common`: envelope responses, validated query extraction, list decoding
//! - `modules`: per-resource handlers plus health, metrics and request ids
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc};
