//! Capacitive soil moisture probe
//!
//! The probe output is noisy, so each measurement averages a burst of
//! conversions spaced by a short delay, then maps the mean through the
//! dry/wet calibration.

use canopy_core::config::SoilCalibration;
use canopy_core::sensor::MoistureSample;
use canopy_core::traits::{MoistureSensor, SensorError};
use canopy_hal::adc::AdcReader;
use embedded_hal::delay::DelayNs;

/// Averaging soil probe sampler
pub struct SoilSampler<A, D> {
    adc: A,
    delay: D,
    calibration: SoilCalibration,
}

impl<A: AdcReader, D: DelayNs> SoilSampler<A, D> {
    pub fn new(adc: A, delay: D, calibration: SoilCalibration) -> Self {
        Self {
            adc,
            delay,
            calibration,
        }
    }

    pub fn calibration(&self) -> &SoilCalibration {
        &self.calibration
    }

    /// Average `sample_count` conversions
    ///
    /// Any failed conversion aborts the burst.
    pub fn sample(&mut self) -> Result<u16, SensorError> {
        let count = self.calibration.sample_count.max(1);
        let mut sum: u32 = 0;

        for i in 0..count {
            if i > 0 {
                self.delay.delay_us(self.calibration.sample_interval_us);
            }
            let raw = self
                .adc
                .read()
                .map_err(|_| SensorError::ConversionError)?;
            sum += u32::from(raw);
        }

        Ok((sum / u32::from(count)) as u16)
    }

    /// Map an averaged raw value to percent
    pub fn to_percent(&self, raw: u16) -> f32 {
        self.calibration.to_percent(raw)
    }

    /// Sample and map in one step
    pub fn read_percent(&mut self) -> Result<f32, SensorError> {
        let raw = self.sample()?;
        Ok(self.to_percent(raw))
    }
}

impl<A: AdcReader, D: DelayNs> MoistureSensor for SoilSampler<A, D> {
    fn read_moisture(&mut self) -> Result<MoistureSample, SensorError> {
        let raw = self.sample()?;

        Ok(MoistureSample {
            raw,
            percent: self.to_percent(raw),
        })
    }
}

/// Dummy ADC for testing (returns a fixed value)
#[cfg(test)]
pub struct DummyAdc(pub u16);

#[cfg(test)]
impl AdcReader for DummyAdc {
    fn read(&mut self) -> Result<u16, canopy_hal::adc::AdcError> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_hal::adc::AdcError;

    /// Counts requested microseconds
    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    /// Replays a fixed list of conversions, then fails
    struct SequenceAdc {
        values: &'static [u16],
        next: usize,
    }

    impl AdcReader for SequenceAdc {
        fn read(&mut self) -> Result<u16, AdcError> {
            let v = self.values.get(self.next).copied().ok_or(AdcError::Conversion)?;
            self.next += 1;
            Ok(v)
        }
    }

    fn calibration(sample_count: u16) -> SoilCalibration {
        SoilCalibration {
            sample_count,
            ..Default::default()
        }
    }

    #[test]
    fn test_constant_input() {
        let mut soil = SoilSampler::new(DummyAdc(2500), CountingDelay::default(), calibration(64));

        let sample = soil.read_moisture().unwrap();
        assert_eq!(sample.raw, 2500);
        assert_eq!(sample.percent, 50.0);
    }

    #[test]
    fn test_average() {
        let adc = SequenceAdc {
            values: &[1000, 2000, 3000, 4000],
            next: 0,
        };
        let mut soil = SoilSampler::new(adc, CountingDelay::default(), calibration(4));

        assert_eq!(soil.sample(), Ok(2500));
    }

    #[test]
    fn test_read_percent() {
        let mut soil = SoilSampler::new(DummyAdc(1750), CountingDelay::default(), calibration(4));

        assert_eq!(soil.read_percent(), Ok(75.0));
    }

    #[test]
    fn test_average_truncates() {
        let adc = SequenceAdc {
            values: &[1, 2],
            next: 0,
        };
        let mut soil = SoilSampler::new(adc, CountingDelay::default(), calibration(2));

        assert_eq!(soil.sample(), Ok(1));
    }

    #[test]
    fn test_full_scale_sum_does_not_overflow() {
        let mut soil =
            SoilSampler::new(DummyAdc(4095), CountingDelay::default(), calibration(u16::MAX));

        assert_eq!(soil.sample(), Ok(4095));
    }

    #[test]
    fn test_spacing_between_samples() {
        let mut soil = SoilSampler::new(DummyAdc(0), CountingDelay::default(), calibration(64));
        soil.sample().unwrap();

        assert_eq!(soil.delay.total_ns, 63 * 50 * 1_000);
    }

    #[test]
    fn test_extremes_clamp() {
        let mut dry = SoilSampler::new(DummyAdc(4095), CountingDelay::default(), calibration(8));
        assert_eq!(dry.read_moisture().unwrap().percent, 0.0);

        let mut wet = SoilSampler::new(DummyAdc(0), CountingDelay::default(), calibration(8));
        assert_eq!(wet.read_moisture().unwrap().percent, 100.0);
    }

    #[test]
    fn test_conversion_error() {
        let adc = SequenceAdc {
            values: &[2000, 2000],
            next: 0,
        };
        let mut soil = SoilSampler::new(adc, CountingDelay::default(), calibration(4));

        assert_eq!(soil.read_moisture(), Err(SensorError::ConversionError));
    }
}
