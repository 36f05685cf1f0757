//! DHT11 temperature/humidity sensor
//!
//! Bit-banged single-wire protocol:
//!
//! ```text
//! host:   ‾‾‾\________________/‾‾‾‾ (released, pulled up)
//!             start (20 ms)
//! sensor:                       ‾‾\____/‾‾‾‾\__/‾‾\__/‾‾‾‾‾‾\__ ...
//!                                 resp  resp  0     1
//!                                 low   high  (~26 µs / ~70 µs high)
//! ```
//!
//! Each of the 40 data bits starts with a ~50 µs low phase; the length of
//! the following high phase encodes the bit. The high phase is measured by
//! counting fixed polling steps, so timing accuracy of the delay provider
//! matters. Every wait is bounded by the polling limit; there are no
//! retries inside a read.

use canopy_core::config::SensorTiming;
use canopy_core::sensor::{Reading, SensorFrame, FRAME_BITS};
use canopy_core::traits::{ClimateSensor, SensorError, WaitStage};
use canopy_hal::gpio::{Direction, FlexPin};
use embedded_hal::delay::DelayNs;

/// DHT11 on a pulled-up bidirectional line
pub struct Dht11<P, D> {
    pin: P,
    delay: D,
    timing: SensorTiming,
}

impl<P: FlexPin, D: DelayNs> Dht11<P, D> {
    /// Take ownership of the line and let the sensor settle
    ///
    /// Blocks for `timing.stabilize_ms`.
    pub fn new(mut pin: P, mut delay: D, timing: SensorTiming) -> Self {
        pin.release();
        delay.delay_ms(timing.stabilize_ms);

        Self { pin, delay, timing }
    }

    /// Give back the line and the delay provider
    pub fn free(self) -> (P, D) {
        (self.pin, self.delay)
    }

    /// Run one bus transaction and return the raw frame, checksum unchecked
    ///
    /// The line is left released (input) whatever the outcome.
    pub fn read_frame(&mut self) -> Result<SensorFrame, SensorError> {
        self.send_start_signal();
        self.receive()
    }

    fn send_start_signal(&mut self) {
        self.pin.set_low();
        self.pin.set_direction(Direction::Output);
        self.delay.delay_ms(self.timing.start_signal_ms);
        self.pin.release();
    }

    fn receive(&mut self) -> Result<SensorFrame, SensorError> {
        // Response: sensor pulls low, then high, then low before the first bit
        self.wait_while(true, WaitStage::ResponseLow)?;
        self.wait_while(false, WaitStage::ResponseHigh)?;
        self.wait_while(true, WaitStage::DataStart)?;

        let mut raw: u64 = 0;
        for bit in 0..FRAME_BITS as u8 {
            self.wait_while(false, WaitStage::BitStart(bit))?;
            let high = self.wait_while(true, WaitStage::BitEnd(bit))?;

            raw = (raw << 1) | u64::from(high >= self.timing.bit_threshold);
        }

        Ok(SensorFrame::from_raw(raw))
    }

    /// Poll while the line stays at `level`
    ///
    /// Returns the number of polling steps spent at that level.
    fn wait_while(&mut self, level: bool, stage: WaitStage) -> Result<u16, SensorError> {
        let mut count: u16 = 0;

        while self.pin.is_high() == level {
            count += 1;
            self.delay.delay_us(self.timing.poll_interval_us);
            if count >= self.timing.polling_limit {
                return Err(SensorError::Timeout(stage));
            }
        }

        Ok(count)
    }
}

impl<P: FlexPin, D: DelayNs> ClimateSensor for Dht11<P, D> {
    fn read(&mut self) -> Result<Reading, SensorError> {
        self.read_frame()?.decode(self.timing.checksum_mode())
    }
}
