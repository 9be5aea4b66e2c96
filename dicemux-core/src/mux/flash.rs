//! Flash modulator
//!
//! A slow counter stepped once per full mux sweep. Every time it runs out
//! it reloads and flips the blanking state, so flashing dice alternate
//! between shown and dark. The reload value is the requested period
//! expressed in sweeps, which keeps the wall-clock rate steady when the
//! number of active dice changes.

use crate::config::MUX_PERIOD_US;

/// Sweep counter and blanking state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashModulator {
    counter: i32,
    blanking: bool,
}

impl FlashModulator {
    pub const fn new() -> Self {
        Self {
            counter: 0,
            blanking: false,
        }
    }

    /// Step once at the end of a sweep
    pub fn sweep(&mut self, flash_ticks: u16) {
        self.counter -= 1;
        if self.counter < 0 {
            self.counter = flash_ticks as i32;
            self.blanking = !self.blanking;
        }
    }

    /// Flashing dice are dark during this sweep
    pub const fn is_blanking(&self) -> bool {
        self.blanking
    }

    /// Whether a die with the given flash flag may light this sweep
    pub const fn allows(&self, flash: bool) -> bool {
        !self.blanking || !flash
    }
}

/// Convert a flash period in milliseconds into sweeps for `active` dice
///
/// One sweep lasts `active * MUX_PERIOD_US` microseconds.
pub fn flash_ticks_for(period_ms: u32, active: usize) -> u16 {
    let sweep_us = MUX_PERIOD_US as u64 * active.max(1) as u64;
    let ticks = 1000 * period_ms as u64 / sweep_us;
    ticks.min(u16::MAX as u64) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_in_sweeps() {
        assert_eq!(flash_ticks_for(512, 5), 100);
        assert_eq!(flash_ticks_for(512, 2), 250);
        assert_eq!(flash_ticks_for(0, 5), 0);
        assert_eq!(flash_ticks_for(u32::MAX, 1), u16::MAX);
    }

    #[test]
    fn test_wall_clock_period_independent_of_count() {
        // Each half lasts (ticks + 1) sweeps of count * 1024 µs
        let half_us = |count: usize| {
            (flash_ticks_for(500, count) as u64 + 1) * count as u64 * MUX_PERIOD_US as u64
        };
        for count in 1..=5 {
            let us = half_us(count);
            assert!(us >= 495_000 && us <= 506_000, "count {} gave {} µs", count, us);
        }
    }

    #[test]
    fn test_alternates_every_reload() {
        let mut flash = FlashModulator::new();
        assert!(!flash.is_blanking());

        // First sweep underflows straight away
        flash.sweep(3);
        assert!(flash.is_blanking());

        for _ in 0..3 {
            flash.sweep(3);
            assert!(flash.is_blanking());
        }
        flash.sweep(3);
        assert!(!flash.is_blanking());
    }

    #[test]
    fn test_allows() {
        let mut flash = FlashModulator::new();
        assert!(flash.allows(true));
        assert!(flash.allows(false));
        flash.sweep(0);
        assert!(!flash.allows(true));
        assert!(flash.allows(false));
    }
}
