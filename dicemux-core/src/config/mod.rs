//! Configuration types
//!
//! Compile-time hardware constants, factory calibration, and the start-up
//! settings read from `dice.toml`.

pub mod calibration;
pub mod hardware;
pub mod settings;
pub mod toml;

pub use hardware::*;
pub use settings::*;
pub use toml::{parse_settings, ParseError};
