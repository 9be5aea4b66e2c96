//! Multiplex scheduler
//!
//! One call per timer interrupt. Each die gets a fixed slot of
//! [`MUX_PERIOD_TICKS`]: lit for `power` ticks (On), dark for the rest
//! (Off). Brightness is therefore the duty cycle within the slot.
//!
//! Switch sampling uses two phases with the select line released ahead:
//!
//! ```text
//!  Off(d)                         On(d')
//!  ├ blank all lines              ├ sample select(d') -> switch[d']
//!  ├ d' = next(d), flash on wrap  ├ select(d') back to output
//!  └ select(d') -> input pull-up  └ light d' if enabled and not blanked
//! ```
//!
//! A select line is pulled up for the whole off window before it is read,
//! so each switch is sampled once per sweep with `MUX_PERIOD_TICKS - power`
//! ticks of settling time. Debounce latency is one sweep
//! (`active_count * 1024 µs`).

use dicemux_hal::{MuxPort, SegmentMask, SelectMode};

use super::flash::FlashModulator;
use crate::config::calibration::is_enabled;
use crate::config::hardware::{face_pattern, MAX_FACE, MAX_POWER, MUX_PERIOD_TICKS, POWER_OFF};
use crate::dice::DieTable;

/// Reschedule interval while a diagnostic pattern is held
pub const HOLD_TICKS: u16 = MUX_PERIOD_TICKS / 2;

/// Position within a die slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Next interrupt samples and lights the current die
    On,
    /// Next interrupt blanks and moves to the next die
    Off,
}

/// Interrupt-owned multiplex state
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MuxScheduler {
    die: usize,
    phase: Phase,
    /// On time used for the current slot, so Off completes the same slot
    on_ticks: u16,
    flash: FlashModulator,
    holding: bool,
}

impl Default for MuxScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl MuxScheduler {
    pub const fn new() -> Self {
        Self {
            die: 0,
            phase: Phase::On,
            on_ticks: POWER_OFF,
            flash: FlashModulator::new(),
            holding: false,
        }
    }

    /// Current die
    pub const fn die(&self) -> usize {
        self.die
    }

    /// Current phase
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Flash state
    pub const fn flash(&self) -> &FlashModulator {
        &self.flash
    }

    /// Whether a diagnostic pattern is being held
    pub const fn is_holding(&self) -> bool {
        self.holding
    }

    /// Blank the display and release the first die's select line
    ///
    /// Call once before the first interrupt is armed.
    pub fn prime<P: MuxPort>(&mut self, port: &mut P) {
        port.drive(SegmentMask::NONE, None);
        port.set_select_mode(self.die, SelectMode::InputPullUp);
    }

    /// Advance one step and return the delay until the next call, in ticks
    pub fn step<P: MuxPort>(&mut self, table: &DieTable, port: &mut P) -> u16 {
        if let Some((die, value)) = table.test_pattern() {
            return self.hold(die, value, port);
        }
        if self.holding {
            return self.resume(port);
        }

        match self.phase {
            Phase::On => self.on(table, port),
            Phase::Off => self.off(table, port),
        }
    }

    fn on<P: MuxPort>(&mut self, table: &DieTable, port: &mut P) -> u16 {
        let die = self.die;

        table.set_switch(die, port.read_select(die));
        port.set_select_mode(die, SelectMode::Output);

        let power = table.power(die).clamp(POWER_OFF, MAX_POWER);
        if is_enabled(power) && self.flash.allows(table.flash(die)) {
            port.drive(face_pattern(table.value(die)), Some(die));
        }

        self.on_ticks = power;
        self.phase = Phase::Off;
        power
    }

    fn off<P: MuxPort>(&mut self, table: &DieTable, port: &mut P) -> u16 {
        port.drive(SegmentMask::NONE, None);

        let next = self.die + 1;
        self.die = if next >= table.active_count() {
            self.flash.sweep(table.flash_ticks());
            0
        } else {
            next
        };
        port.set_select_mode(self.die, SelectMode::InputPullUp);

        self.phase = Phase::On;
        MUX_PERIOD_TICKS - self.on_ticks
    }

    fn hold<P: MuxPort>(&mut self, die: usize, value: u8, port: &mut P) -> u16 {
        if !self.holding {
            self.holding = true;
            // The current die may have been released for sampling
            port.set_select_mode(self.die, SelectMode::Output);
        }
        port.set_select_mode(die, SelectMode::Output);
        if value <= MAX_FACE {
            port.drive(face_pattern(value), Some(die));
        } else {
            port.drive(SegmentMask::NONE, None);
        }
        HOLD_TICKS
    }

    fn resume<P: MuxPort>(&mut self, port: &mut P) -> u16 {
        self.holding = false;
        self.die = 0;
        self.phase = Phase::On;
        self.prime(port);
        HOLD_TICKS
    }
}
