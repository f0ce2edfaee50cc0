// Memoria - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: app or platform.

pub mod export;
pub mod filter;
pub mod label;
pub mod load;
pub mod model;
pub mod summary;
