//! LED level bank
//!
//! A row of LEDs shown as a bar graph: level `n` lights the first `n`
//! LEDs and turns the rest off.

use canopy_core::inference::ActuationLevel;
use canopy_core::traits::LevelIndicator;
use canopy_hal::gpio::OutputPin;

/// Bar-graph LED bank, active-high
pub struct LedBank<P, const N: usize> {
    leds: [P; N],
    lit: usize,
}

impl<P: OutputPin, const N: usize> LedBank<P, N> {
    /// Take the pins and turn every LED off
    pub fn new(leds: [P; N]) -> Self {
        let mut bank = Self { leds, lit: 0 };
        bank.drive(0);
        bank
    }

    /// Light the first `level` LEDs
    ///
    /// Levels are clamped to `0..=N`. Every pin is rewritten.
    pub fn drive(&mut self, level: i32) {
        let lit = level.clamp(0, N as i32) as usize;

        for (i, led) in self.leds.iter_mut().enumerate() {
            led.set_state(i < lit);
        }
        self.lit = lit;
    }

    /// Number of LEDs currently lit
    pub fn lit_count(&self) -> usize {
        self.lit
    }

    pub fn leds(&self) -> &[P; N] {
        &self.leds
    }

    /// Give back the pins
    pub fn free(self) -> [P; N] {
        self.leds
    }
}

impl<P: OutputPin, const N: usize> LevelIndicator for LedBank<P, N> {
    fn show(&mut self, level: ActuationLevel) {
        self.drive(i32::from(level.value()));
    }
}
