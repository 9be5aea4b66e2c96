//! Die state table
//!
//! The table is the only data shared between the multiplex interrupt and
//! the main context. Every field is a single atomic load or store, so no
//! lock is needed and the interrupt never waits:
//!
//! - the main context writes value, power, flash, count and flash ticks
//! - the interrupt only reads those and writes the switch samples
//!
//! Nothing is read-modify-written from both sides. `Relaxed` ordering is
//! enough because each field stands on its own; a change that lands
//! mid-sweep is simply picked up on the next slot.

use core::sync::atomic::{AtomicBool, AtomicU16, AtomicU8, Ordering};

use crate::config::{MAX_DICE, POWER_OFF};

/// Packed value meaning "no test pattern"
const NO_TEST: u16 = u16::MAX;

/// Plain copy of one die's state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Die {
    /// Face value, 0 (blank) to 6
    pub value: u8,
    /// On time in ticks; below `MIN_POWER` the die is off
    pub power: u16,
    /// Die takes part in flashing
    pub flash: bool,
    /// Last sampled level of the select line (true = high)
    pub switch: bool,
}

struct DieCell {
    value: AtomicU8,
    power: AtomicU16,
    flash: AtomicBool,
    switch: AtomicBool,
}

impl DieCell {
    const fn new() -> Self {
        Self {
            value: AtomicU8::new(0),
            power: AtomicU16::new(POWER_OFF),
            flash: AtomicBool::new(false),
            switch: AtomicBool::new(false),
        }
    }
}

/// Fixed-capacity table of dice shared with the multiplex interrupt
///
/// Setters take raw, already-validated values; clamping is the job of
/// [`DiceDriver`](crate::DiceDriver). Out-of-range die indices are ignored
/// by setters and read back as zero/false.
pub struct DieTable {
    dice: [DieCell; MAX_DICE],
    active: AtomicU8,
    flash_ticks: AtomicU16,
    test: AtomicU16,
}

impl Default for DieTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DieTable {
    /// Create a table with every die blank and disabled
    pub const fn new() -> Self {
        Self {
            dice: [const { DieCell::new() }; MAX_DICE],
            active: AtomicU8::new(MAX_DICE as u8),
            flash_ticks: AtomicU16::new(100),
            test: AtomicU16::new(NO_TEST),
        }
    }

    /// Number of dice in the sweep, always within `1..=MAX_DICE`
    pub fn active_count(&self) -> usize {
        (self.active.load(Ordering::Relaxed) as usize).clamp(1, MAX_DICE)
    }

    pub fn set_active_count(&self, count: usize) {
        self.active
            .store(count.clamp(1, MAX_DICE) as u8, Ordering::Relaxed);
    }

    /// Sweeps per flash half-period
    pub fn flash_ticks(&self) -> u16 {
        self.flash_ticks.load(Ordering::Relaxed)
    }

    pub fn set_flash_ticks(&self, ticks: u16) {
        self.flash_ticks.store(ticks, Ordering::Relaxed);
    }

    pub fn value(&self, die: usize) -> u8 {
        self.dice
            .get(die)
            .map_or(0, |d| d.value.load(Ordering::Relaxed))
    }

    pub fn set_value(&self, die: usize, value: u8) {
        if let Some(d) = self.dice.get(die) {
            d.value.store(value, Ordering::Relaxed);
        }
    }

    pub fn power(&self, die: usize) -> u16 {
        self.dice
            .get(die)
            .map_or(POWER_OFF, |d| d.power.load(Ordering::Relaxed))
    }

    pub fn set_power(&self, die: usize, ticks: u16) {
        if let Some(d) = self.dice.get(die) {
            d.power.store(ticks, Ordering::Relaxed);
        }
    }

    pub fn flash(&self, die: usize) -> bool {
        self.dice
            .get(die)
            .is_some_and(|d| d.flash.load(Ordering::Relaxed))
    }

    pub fn set_flash(&self, die: usize, flash: bool) {
        if let Some(d) = self.dice.get(die) {
            d.flash.store(flash, Ordering::Relaxed);
        }
    }

    pub fn switch(&self, die: usize) -> bool {
        self.dice
            .get(die)
            .is_some_and(|d| d.switch.load(Ordering::Relaxed))
    }

    /// Record a switch sample. Interrupt side only.
    pub fn set_switch(&self, die: usize, level: bool) {
        if let Some(d) = self.dice.get(die) {
            d.switch.store(level, Ordering::Relaxed);
        }
    }

    /// Snapshot of one die
    pub fn die(&self, die: usize) -> Option<Die> {
        (die < MAX_DICE).then(|| Die {
            value: self.value(die),
            power: self.power(die),
            flash: self.flash(die),
            switch: self.switch(die),
        })
    }

    /// Diagnostic override: `(die, value)` held statically, if any
    pub fn test_pattern(&self) -> Option<(usize, u8)> {
        let packed = self.test.load(Ordering::Relaxed);
        (packed != NO_TEST).then_some(((packed >> 8) as usize, packed as u8))
    }

    /// Set or clear the diagnostic override in a single store
    pub fn set_test_pattern(&self, pattern: Option<(usize, u8)>) {
        let packed = match pattern {
            Some((die, value)) if die < MAX_DICE => ((die as u16) << 8) | value as u16,
            _ => NO_TEST,
        };
        self.test.store(packed, Ordering::Relaxed);
    }
}
