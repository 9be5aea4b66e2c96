//! dicemux Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the multiplex
//! scheduler needs. Chip-specific HALs implement them, which keeps the
//! scheduler algorithm itself platform independent.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (dicemux-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dicemux-core (scheduler, driver API)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dicemux-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ dicemux-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::FlexPin`] - Digital I/O
//! - [`mux::MuxPort`] - Segment and die-select lines as one port
//! - [`timer::MuxTimer`] - Re-armable interrupt source for the scheduler

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod mux;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use gpio::{FlexPin, InputPin, OutputPin};
pub use mux::{MuxPort, PinMuxPort, SegmentMask, SelectMode, SEGMENT_LINES};
pub use timer::MuxTimer;
