//! GPIO wrappers
//!
//! Newtypes over embassy pins so they can implement the `dicemux-hal`
//! traits. Every method is a single register access, safe to call from the
//! multiplex interrupt.

use dicemux_hal::{FlexPin, InputPin, OutputPin};
use embassy_rp::gpio::{Flex, Level, Output, Pin, Pull};
use embassy_rp::Peri;

/// Segment line, a push-pull output that starts low
pub struct SegmentPin(Output<'static>);

impl SegmentPin {
    pub fn new(pin: Peri<'static, impl Pin>) -> Self {
        Self(Output::new(pin, Level::Low))
    }
}

impl OutputPin for SegmentPin {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }
}

/// Die-select line shared with a push button to ground
///
/// Starts as a low output. Released to a pulled-up input while the
/// button is sampled.
pub struct SelectPin(Flex<'static>);

impl SelectPin {
    pub fn new(pin: Peri<'static, impl Pin>) -> Self {
        let mut flex = Flex::new(pin);
        flex.set_low();
        flex.set_as_output();
        Self(flex)
    }
}

impl OutputPin for SelectPin {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }
}

impl InputPin for SelectPin {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

impl FlexPin for SelectPin {
    fn set_as_output(&mut self) {
        self.0.set_pull(Pull::None);
        self.0.set_as_output();
    }

    fn set_as_input_pull_up(&mut self) {
        self.0.set_as_input();
        self.0.set_pull(Pull::Up);
    }
}
