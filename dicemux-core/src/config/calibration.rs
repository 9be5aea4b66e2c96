//! Brightness calibration
//!
//! Each physical die needs its own duty cycle to match LED brightness
//! across units. The factory values are compiled in and read-only; the
//! host converts between percentages and on-time ticks with the helpers
//! below.
//!
//! Rounding policy: both directions truncate, so `percent -> ticks ->
//! percent` can come back one lower than it went in. That is expected.

use super::hardware::{MAX_DICE, MAX_POWER, MIN_POWER, MUX_PERIOD_TICKS, POWER_OFF};

/// Factory on-time per die, in ticks
pub const DEFAULT_POWER_TICKS: [u16; MAX_DICE] = [200, 200, 150, 120, 150];

/// Convert a brightness percentage into on-time ticks
///
/// The result is clamped to `[POWER_OFF, MAX_POWER]`; anything that rounds
/// below [`MIN_POWER`] collapses to the [`POWER_OFF`] sentinel instead of a
/// very short, flickering pulse.
pub fn percent_to_ticks(percent: i32) -> u16 {
    let percent = percent.clamp(0, 100) as u32;
    let ticks = (MUX_PERIOD_TICKS as u32 * percent / 100) as u16;
    if ticks < MIN_POWER {
        POWER_OFF
    } else {
        ticks.min(MAX_POWER)
    }
}

/// Convert on-time ticks back into a percentage
pub fn ticks_to_percent(ticks: u16) -> u8 {
    (ticks.min(MUX_PERIOD_TICKS) as u32 * 100 / MUX_PERIOD_TICKS as u32) as u8
}

/// Whether an on-time is displayed at all
pub const fn is_enabled(ticks: u16) -> bool {
    ticks >= MIN_POWER
}

/// Factory on-time for a die, or `None` for an index past the board
pub fn default_power_ticks(die: usize) -> Option<u16> {
    DEFAULT_POWER_TICKS.get(die).copied()
}

/// Factory brightness percentage for a die (0 for an unknown die)
pub fn default_power_percent(die: usize) -> u8 {
    default_power_ticks(die).map(ticks_to_percent).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_percentages() {
        assert_eq!(default_power_percent(0), 62);
        assert_eq!(default_power_percent(1), 62);
        assert_eq!(default_power_percent(2), 46);
        assert_eq!(default_power_percent(3), 37);
        assert_eq!(default_power_percent(4), 46);
        assert_eq!(default_power_percent(5), 0);
    }

    #[test]
    fn test_low_percent_disables() {
        assert_eq!(percent_to_ticks(0), POWER_OFF);
        assert_eq!(percent_to_ticks(9), POWER_OFF);
        assert_eq!(percent_to_ticks(-20), POWER_OFF);
        assert!(!is_enabled(percent_to_ticks(9)));
        assert_eq!(percent_to_ticks(10), 32);
        assert!(is_enabled(percent_to_ticks(10)));
    }

    #[test]
    fn test_high_percent_clamps() {
        assert_eq!(percent_to_ticks(90), 288);
        assert_eq!(percent_to_ticks(91), MAX_POWER);
        assert_eq!(percent_to_ticks(100), MAX_POWER);
        assert_eq!(percent_to_ticks(i32::MAX), MAX_POWER);
    }

    #[test]
    fn test_round_trip_truncates() {
        // 62% -> 198 ticks -> 61%
        assert_eq!(percent_to_ticks(62), 198);
        assert_eq!(ticks_to_percent(198), 61);
    }

    proptest! {
        #[test]
        fn power_stays_in_range(p in any::<i32>()) {
            let ticks = percent_to_ticks(p);
            prop_assert!(ticks >= POWER_OFF && ticks <= MAX_POWER);
        }

        #[test]
        fn power_is_monotonic(a in 0i32..=100, b in 0i32..=100) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(percent_to_ticks(lo) <= percent_to_ticks(hi));
        }

        #[test]
        fn round_trip_never_gains(p in 10i32..=90) {
            let back = ticks_to_percent(percent_to_ticks(p)) as i32;
            prop_assert!(back <= p && back >= p - 1);
        }
    }
}
