//! Domain models for the crop variety tracker

mod variety;

pub use variety::*;
