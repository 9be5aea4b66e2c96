//! Press detection on top of the sampled switch levels
//!
//! The interrupt only records levels. A host loop feeds
//! [`DiceDriver::read_switches`](crate::DiceDriver::read_switches) into a
//! [`SwitchMonitor`] at its polling rate and gets back the dice whose
//! button went from released (high) to pressed (low).

use crate::config::MAX_DICE;

/// Bit mask covering the first `count` dice
pub const fn active_mask(count: usize) -> u8 {
    let count = if count > MAX_DICE { MAX_DICE } else { count };
    ((1u16 << count) - 1) as u8
}

/// Edge detector for the switch bits
///
/// A press is only reported after the same die has been seen released, so
/// the all-low levels before the first sweep and buttons held through
/// boot produce nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchMonitor {
    released: u8,
}

impl SwitchMonitor {
    pub const fn new() -> Self {
        Self { released: 0 }
    }

    /// Feed new levels (bit set = released); returns newly pressed dice
    pub fn update(&mut self, levels: u8, active: usize) -> u8 {
        let levels = levels & active_mask(active);
        let pressed = self.released & !levels;
        self.released = levels;
        pressed
    }

    /// Dice currently seen released
    pub const fn released(&self) -> u8 {
        self.released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_mask() {
        assert_eq!(active_mask(0), 0);
        assert_eq!(active_mask(2), 0b00011);
        assert_eq!(active_mask(MAX_DICE), 0b11111);
        assert_eq!(active_mask(9), 0b11111);
    }

    #[test]
    fn test_no_press_before_first_release() {
        let mut mon = SwitchMonitor::new();
        assert_eq!(mon.update(0, 5), 0);
        assert_eq!(mon.update(0, 5), 0);
    }

    #[test]
    fn test_press_reported_once() {
        let mut mon = SwitchMonitor::new();
        mon.update(0b11111, 5);
        assert_eq!(mon.update(0b11101, 5), 0b00010);
        // Still held
        assert_eq!(mon.update(0b11101, 5), 0);
        // Released, pressed again
        assert_eq!(mon.update(0b11111, 5), 0);
        assert_eq!(mon.update(0b11101, 5), 0b00010);
    }

    #[test]
    fn test_simultaneous_presses() {
        let mut mon = SwitchMonitor::new();
        mon.update(0b11111, 5);
        assert_eq!(mon.update(0b01010, 5), 0b10101);
    }

    #[test]
    fn test_inactive_dice_ignored() {
        let mut mon = SwitchMonitor::new();
        mon.update(0b11111, 2);
        assert_eq!(mon.released(), 0b00011);
        assert_eq!(mon.update(0b00011, 2), 0);
        assert_eq!(mon.update(0b00001, 2), 0b00010);
    }
}
