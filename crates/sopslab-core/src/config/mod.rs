//! Configuration: compile-time constants and environment-derived settings

pub mod consts;
mod settings;

pub use settings::Settings;
