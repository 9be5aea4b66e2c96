//! Board-agnostic core logic for the LED dice display
//!
//! This crate contains everything that does not depend on a specific chip:
//!
//! - Hardware constants, calibration and start-up settings
//! - The die state table shared with the multiplex interrupt
//! - The multiplex scheduler and flash modulator (interrupt side)
//! - The roll session and the configuration/query API (main side)
//! - Switch press detection for the host loop

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod dice;
pub mod driver;
pub mod mux;
pub mod roll;
pub mod switches;

pub use dice::DieTable;
pub use driver::DiceDriver;
pub use mux::Multiplexer;
pub use switches::SwitchMonitor;
