//! Fixed hardware description
//!
//! Timing constants are expressed in mux ticks of 3.2 µs. One die slot
//! (on time plus off time) is [`MUX_PERIOD_TICKS`] ticks, 1024 µs.

use dicemux_hal::SegmentMask;

/// Number of dice the board can drive
pub const MAX_DICE: usize = 5;

/// Bitmask covering every die
pub const DICE_MASK: u8 = (1 << MAX_DICE) - 1;

/// Duration of one mux tick in nanoseconds
pub const TICK_NS: u32 = 3200;

/// Ticks per die slot
pub const MUX_PERIOD_TICKS: u16 = 320;

/// Duration of one die slot in microseconds
pub const MUX_PERIOD_US: u32 = MUX_PERIOD_TICKS as u32 * TICK_NS / 1000;

/// Shortest on time that is actually displayed
pub const MIN_POWER: u16 = 30;

/// Longest on time; leaves room for the switch sampling window
pub const MAX_POWER: u16 = 290;

/// Power sentinel meaning "die disabled"
pub const POWER_OFF: u16 = MIN_POWER - 1;

/// Highest face value; 0 is blank
pub const MAX_FACE: u8 = 6;

/// Segment patterns indexed by face value
///
/// Lines: centre, middle row, diagonal right, diagonal left. The two
/// diagonals and the middle row each light a pair of pips.
pub const FACE_PATTERNS: [SegmentMask; MAX_FACE as usize + 1] = [
    SegmentMask::NONE,
    SegmentMask::CENTRE,
    SegmentMask::DIAGONAL_RIGHT,
    SegmentMask::DIAGONAL_LEFT.union(SegmentMask::CENTRE),
    SegmentMask::DIAGONAL_LEFT.union(SegmentMask::DIAGONAL_RIGHT),
    SegmentMask::DIAGONAL_LEFT
        .union(SegmentMask::DIAGONAL_RIGHT)
        .union(SegmentMask::CENTRE),
    SegmentMask::DIAGONAL_LEFT
        .union(SegmentMask::DIAGONAL_RIGHT)
        .union(SegmentMask::MIDDLE),
];

/// Segment pattern for a face value; anything above six is blank
pub const fn face_pattern(value: u8) -> SegmentMask {
    if value > MAX_FACE {
        SegmentMask::NONE
    } else {
        FACE_PATTERNS[value as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pips(mask: SegmentMask) -> u32 {
        // Centre is one pip, every other line drives a pair
        let mut count = 0;
        if mask.is_lit(0) {
            count += 1;
        }
        for line in 1..4 {
            if mask.is_lit(line) {
                count += 2;
            }
        }
        count
    }

    #[test]
    fn test_face_patterns_show_pip_count() {
        for value in 0..=MAX_FACE {
            assert_eq!(pips(face_pattern(value)), value as u32);
        }
    }

    #[test]
    fn test_out_of_range_face_is_blank() {
        assert_eq!(face_pattern(7), SegmentMask::NONE);
        assert_eq!(face_pattern(u8::MAX), SegmentMask::NONE);
    }

    #[test]
    fn test_timing_constants() {
        assert_eq!(MUX_PERIOD_US, 1024);
        assert!(MAX_POWER < MUX_PERIOD_TICKS);
        assert_eq!(DICE_MASK, 0x1F);
    }
}
