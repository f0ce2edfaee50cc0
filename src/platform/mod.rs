// Memoria - platform/mod.rs
//
// Platform abstraction layer: directories, config.toml, file helpers.

pub mod config;
pub mod fs;
