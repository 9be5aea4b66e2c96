//! Multiplexing (interrupt side)
//!
//! The scheduler state machine, the flash modulator it steps once per
//! sweep, and the [`Multiplexer`] wrapper that ties them to a port and a
//! timer.

pub mod flash;
pub mod multiplexer;
pub mod scheduler;

pub use flash::{flash_ticks_for, FlashModulator};
pub use multiplexer::{Multiplexer, START_DELAY_TICKS};
pub use scheduler::{MuxScheduler, Phase, HOLD_TICKS};
