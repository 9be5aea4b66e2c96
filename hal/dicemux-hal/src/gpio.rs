//! GPIO pin abstractions
//!
//! Segment lines are plain outputs. Die-select lines are flex pins: they
//! are driven while their die is lit and turned into pulled-up inputs in
//! between, so the push button on the same wire can be sampled.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pin whose direction can be switched at run time
///
/// Both direction changes must be a handful of register writes with no
/// waiting, since they are called from the multiplex interrupt.
pub trait FlexPin: OutputPin + InputPin {
    /// Drive the pin (output enabled, pull disabled)
    fn set_as_output(&mut self);

    /// Release the pin to an input with the internal pull-up enabled
    fn set_as_input_pull_up(&mut self);
}
