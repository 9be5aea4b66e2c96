//! RP2040-specific HAL for the dice firmware
//!
//! This crate provides RP2040 implementations of the shared `dicemux-hal`
//! traits:
//!
//! - Segment and select pin wrappers over embassy GPIO
//! - Multiplex timer backends (TIMER alarm 1 and SysTick)

#![no_std]

pub mod gpio;
pub mod timer;

use dicemux_core::config::MAX_DICE;
use dicemux_hal::PinMuxPort;

pub use gpio::{SegmentPin, SelectPin};
pub use timer::{AlarmTimer, MuxTimerBackend, SysTickTimer};

/// The dice port as wired on RP2040 boards
pub type DicePort = PinMuxPort<SegmentPin, SelectPin, MAX_DICE>;
