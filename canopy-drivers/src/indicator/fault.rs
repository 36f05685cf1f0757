//! Fault LED
//!
//! Single lamp lit while the last sensor read failed. Can be wired
//! active-high (default) or active-low.

use canopy_core::traits::FaultIndicator;
use canopy_hal::gpio::OutputPin;

/// GPIO fault lamp
pub struct FaultLed<P> {
    pin: P,
    /// If true, lamp ON = pin LOW
    inverted: bool,
    active: bool,
}

impl<P: OutputPin> FaultLed<P> {
    /// Take the pin and turn the lamp off
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self {
            pin,
            inverted,
            active: false,
        };
        led.set_fault(false);
        led
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl<P: OutputPin> FaultIndicator for FaultLed<P> {
    fn set_fault(&mut self, active: bool) {
        self.active = active;
        self.pin.set_state(active != self.inverted);
    }
}
