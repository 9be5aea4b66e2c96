//! Start-up settings
//!
//! The settings file is compiled in; there is no persistent storage.

pub mod loader;

pub use loader::load_settings;
