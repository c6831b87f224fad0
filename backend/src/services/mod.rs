//! Business logic services for the crop variety service

pub mod variety;

pub use variety::VarietyStore;
