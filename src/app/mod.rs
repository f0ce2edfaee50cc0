// Memoria - app/mod.rs
//
// Application layer: loading, feed state, run selection, session persistence.
// Dependencies: core, platform.

pub mod loader;
pub mod selection;
pub mod session;
pub mod state;
