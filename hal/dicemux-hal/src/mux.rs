//! Multiplexed LED port
//!
//! The display is wired as four shared segment lines plus one select line
//! per die. [`MuxPort`] is the whole of what the scheduler needs from the
//! platform: drive a pattern, flip a select line between output and
//! pulled-up input, and sample that line.

use crate::gpio::{FlexPin, OutputPin};

/// Number of shared LED segment lines
pub const SEGMENT_LINES: usize = 4;

/// Bit pattern for the shared segment lines
///
/// Bit order: centre, middle row, diagonal right, diagonal left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentMask(u8);

impl SegmentMask {
    /// All segments dark
    pub const NONE: Self = Self(0);
    /// Centre pip
    pub const CENTRE: Self = Self(1 << 0);
    /// Middle-row pair
    pub const MIDDLE: Self = Self(1 << 1);
    /// Diagonal pair, top right to bottom left
    pub const DIAGONAL_RIGHT: Self = Self(1 << 2);
    /// Diagonal pair, top left to bottom right
    pub const DIAGONAL_LEFT: Self = Self(1 << 3);

    /// Build a mask from raw bits (upper bits are dropped)
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & ((1 << SEGMENT_LINES) - 1))
    }

    /// Combine two masks
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Raw bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether segment line `line` is lit
    pub const fn is_lit(self, line: usize) -> bool {
        line < SEGMENT_LINES && self.0 & (1 << line) != 0
    }
}

/// Direction of a die-select line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectMode {
    /// Driven output, used while the die is lit
    Output,
    /// Input with pull-up, used while the switch is sampled
    InputPullUp,
}

/// Segment and select lines of the dice display
///
/// All methods are called from interrupt context and must complete
/// immediately.
pub trait MuxPort {
    /// Drive `segments` and, if given, the select line of die `select`.
    ///
    /// `drive(SegmentMask::NONE, None)` blanks the whole display.
    fn drive(&mut self, segments: SegmentMask, select: Option<usize>);

    /// Switch the select line of `die` between output and pulled-up input
    fn set_select_mode(&mut self, die: usize, mode: SelectMode);

    /// Sample the select line of `die` (true = high, i.e. button released)
    fn read_select(&mut self, die: usize) -> bool;
}

/// [`MuxPort`] built from individual pins
///
/// Segment lines are set before the select line so the pattern is stable
/// by the time the die starts conducting.
pub struct PinMuxPort<L, S, const N: usize> {
    segments: [L; SEGMENT_LINES],
    selects: [S; N],
}

impl<L: OutputPin, S: FlexPin, const N: usize> PinMuxPort<L, S, N> {
    /// Create a port; every line starts driven low
    pub fn new(segments: [L; SEGMENT_LINES], selects: [S; N]) -> Self {
        let mut port = Self { segments, selects };
        for select in port.selects.iter_mut() {
            select.set_low();
            select.set_as_output();
        }
        port.drive(SegmentMask::NONE, None);
        port
    }

    /// Number of select lines
    pub const fn dice(&self) -> usize {
        N
    }

    /// Give the pins back
    pub fn release(self) -> ([L; SEGMENT_LINES], [S; N]) {
        (self.segments, self.selects)
    }
}

impl<L: OutputPin, S: FlexPin, const N: usize> MuxPort for PinMuxPort<L, S, N> {
    fn drive(&mut self, segments: SegmentMask, select: Option<usize>) {
        for (line, pin) in self.segments.iter_mut().enumerate() {
            pin.set_state(segments.is_lit(line));
        }
        for (die, pin) in self.selects.iter_mut().enumerate() {
            pin.set_state(select == Some(die));
        }
    }

    fn set_select_mode(&mut self, die: usize, mode: SelectMode) {
        if let Some(pin) = self.selects.get_mut(die) {
            match mode {
                SelectMode::Output => pin.set_as_output(),
                SelectMode::InputPullUp => pin.set_as_input_pull_up(),
            }
        }
    }

    fn read_select(&mut self, die: usize) -> bool {
        self.selects.get(die).map(|pin| pin.is_high()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::InputPin;

    /// Mock output pin for testing
    #[derive(Default)]
    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }
    }

    /// Mock flex pin with an external level applied while in input mode
    #[derive(Default)]
    struct MockFlex {
        driven: bool,
        output: bool,
        external: Option<bool>,
    }

    impl OutputPin for MockFlex {
        fn set_high(&mut self) {
            self.driven = true;
        }

        fn set_low(&mut self) {
            self.driven = false;
        }
    }

    impl InputPin for MockFlex {
        fn is_high(&self) -> bool {
            if self.output {
                self.driven
            } else {
                // Pulled up unless something drags it low
                self.external.unwrap_or(true)
            }
        }
    }

    impl FlexPin for MockFlex {
        fn set_as_output(&mut self) {
            self.output = true;
        }

        fn set_as_input_pull_up(&mut self) {
            self.output = false;
        }
    }

    fn port() -> PinMuxPort<MockPin, MockFlex, 3> {
        PinMuxPort::new(Default::default(), Default::default())
    }

    #[test]
    fn test_new_port_is_dark() {
        let port = port();
        let (segments, selects) = port.release();
        assert!(segments.iter().all(|p| !p.high));
        assert!(selects.iter().all(|p| p.output && !p.driven));
    }

    #[test]
    fn test_drive_pattern_and_select() {
        let mut port = port();
        let five = SegmentMask::CENTRE
            .union(SegmentMask::DIAGONAL_LEFT)
            .union(SegmentMask::DIAGONAL_RIGHT);
        port.drive(five, Some(1));

        let (segments, selects) = port.release();
        assert!(segments[0].high);
        assert!(!segments[1].high);
        assert!(segments[2].high);
        assert!(segments[3].high);
        assert!(!selects[0].driven);
        assert!(selects[1].driven);
        assert!(!selects[2].driven);
    }

    #[test]
    fn test_blank_clears_everything() {
        let mut port = port();
        port.drive(SegmentMask::from_bits(0xFF), Some(2));
        port.drive(SegmentMask::NONE, None);

        let (segments, selects) = port.release();
        assert!(segments.iter().all(|p| !p.high));
        assert!(selects.iter().all(|p| !p.driven));
    }

    #[test]
    fn test_switch_sampling() {
        let mut port = port();
        port.set_select_mode(0, SelectMode::InputPullUp);
        assert!(port.read_select(0));

        port.selects[0].external = Some(false);
        assert!(!port.read_select(0));

        port.set_select_mode(0, SelectMode::Output);
        assert!(!port.read_select(0));
    }

    #[test]
    fn test_out_of_range_die_is_ignored() {
        let mut port = port();
        port.set_select_mode(7, SelectMode::InputPullUp);
        assert!(!port.read_select(7));
    }

    #[test]
    fn test_segment_mask_bits() {
        assert_eq!(SegmentMask::from_bits(0xFF).bits(), 0x0F);
        assert!(SegmentMask::MIDDLE.is_lit(1));
        assert!(!SegmentMask::MIDDLE.is_lit(0));
        assert!(!SegmentMask::from_bits(0x0F).is_lit(4));
    }
}
