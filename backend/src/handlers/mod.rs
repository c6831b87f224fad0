//! HTTP handlers

mod health;
mod variety;

pub use health::*;
pub use variety::*;
