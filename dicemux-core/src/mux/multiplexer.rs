//! Interrupt-side bundle of scheduler, port and timer
//!
//! [`Multiplexer::on_interrupt`] is the whole interrupt handler body. It
//! has a single path, and that path always re-arms the timer; the
//! scheduler only computes the delay.

use dicemux_hal::{MuxPort, MuxTimer};

use super::scheduler::{MuxScheduler, Phase};
use crate::config::MUX_PERIOD_TICKS;
use crate::dice::DieTable;

/// Delay before the very first interrupt
pub const START_DELAY_TICKS: u16 = MUX_PERIOD_TICKS;

/// Owns everything the multiplex interrupt touches besides the die table
pub struct Multiplexer<P, T> {
    scheduler: MuxScheduler,
    port: P,
    timer: T,
}

impl<P: MuxPort, T: MuxTimer> Multiplexer<P, T> {
    pub fn new(port: P, timer: T) -> Self {
        Self {
            scheduler: MuxScheduler::new(),
            port,
            timer,
        }
    }

    /// Prepare the lines and arm the first interrupt
    pub fn start(&mut self) {
        self.scheduler.prime(&mut self.port);
        self.timer.schedule(START_DELAY_TICKS);
    }

    /// Interrupt handler body
    pub fn on_interrupt(&mut self, table: &DieTable) {
        let ticks = self.scheduler.step(table, &mut self.port);
        self.timer.schedule(ticks);
    }

    /// Current `(die, phase)` position
    pub fn position(&self) -> (usize, Phase) {
        (self.scheduler.die(), self.scheduler.phase())
    }

    pub fn scheduler(&self) -> &MuxScheduler {
        &self.scheduler
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }
}
