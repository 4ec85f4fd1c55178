//! Core system components for the transition test
pub mod resources;
