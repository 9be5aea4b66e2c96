//! Interrupt timer abstraction
//!
//! The multiplex scheduler runs from a one-shot style timer interrupt and
//! re-arms it every time with a delay measured in mux ticks (3.2 µs on
//! every backend).

/// Re-armable timer driving the multiplex interrupt
pub trait MuxTimer {
    /// Acknowledge the pending interrupt and arm the next one `ticks`
    /// mux ticks after the previous deadline.
    fn schedule(&mut self, ticks: u16);
}
