//! Shared types and logic for the crop variety tracker
//!
//! This crate contains the variety model and the filter/sort/paginate query
//! engine, shared between the backend and the browser (via WASM).

pub mod models;
pub mod query;
pub mod types;
pub mod validation;

pub use models::*;
pub use query::*;
pub use types::*;
pub use validation::*;
