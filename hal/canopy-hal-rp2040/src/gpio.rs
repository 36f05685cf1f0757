//! GPIO wrappers
//!
//! embassy-rp pins expose inherent methods only; these wrappers put them
//! behind the `canopy-hal` traits so the drivers stay chip-agnostic.

use canopy_hal::gpio::{Direction, FlexPin, InputPin, OutputPin};
use embassy_rp::gpio::{AnyPin, Flex, Level, Output, Pull};
use embassy_rp::Peri;

/// Bidirectional pin with the internal pull-up enabled
///
/// Starts released (input).
pub struct RpFlexPin<'d> {
    pin: Flex<'d>,
    direction: Direction,
}

impl<'d> RpFlexPin<'d> {
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_pull(Pull::Up);
        pin.set_as_input();

        Self {
            pin,
            direction: Direction::Input,
        }
    }
}

impl OutputPin for RpFlexPin<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

impl InputPin for RpFlexPin<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl FlexPin for RpFlexPin<'_> {
    fn set_direction(&mut self, direction: Direction) {
        match direction {
            Direction::Input => self.pin.set_as_input(),
            Direction::Output => self.pin.set_as_output(),
        }
        self.direction = direction;
    }

    fn direction(&self) -> Direction {
        self.direction
    }
}

/// Push-pull output, starts low
pub struct RpOutputPin<'d> {
    pin: Output<'d>,
}

impl<'d> RpOutputPin<'d> {
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        Self {
            pin: Output::new(pin, Level::Low),
        }
    }
}

impl OutputPin for RpOutputPin<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
