//! Per-cycle control sequence
//!
//! Errors never escape a cycle. A sensor failure lights the fault lamp and
//! skips the models; a model failure leaves that actuator's indicator
//! showing its previous level. The next cycle starts from scratch.

use crate::config::ControlTiming;
use crate::features::FeatureVector;
use crate::inference::{infer, ActuationLevel, Inference, InferenceError};
use crate::sensor::{MoistureSample, Reading};
use crate::traits::{
    ClimateSensor, FaultIndicator, InferenceEngine, LevelIndicator, MoistureSensor, SensorError,
};

/// One model and the indicator it drives
///
/// An actuator without an engine (the model failed to load) never changes
/// its indicator.
pub struct Actuator<E, B> {
    engine: Option<E>,
    indicator: B,
}

impl<E: InferenceEngine, B: LevelIndicator> Actuator<E, B> {
    /// Create an actuator; the indicator starts cleared
    pub fn new(engine: Option<E>, mut indicator: B) -> Self {
        indicator.clear();
        Self { engine, indicator }
    }

    /// Whether a model is loaded
    pub fn is_enabled(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn indicator(&self) -> &B {
        &self.indicator
    }

    /// Run the model and show the result
    pub fn step(&mut self, features: &FeatureVector) -> ActuatorOutcome {
        let Some(engine) = self.engine.as_mut() else {
            return ActuatorOutcome::Disabled;
        };

        match infer(engine, features) {
            Ok(inference) => {
                self.indicator.show(inference.level);
                ActuatorOutcome::Applied(inference)
            }
            Err(e) => ActuatorOutcome::Skipped(e),
        }
    }
}

/// What happened to one actuator during a cycle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorOutcome {
    /// New level shown
    Applied(Inference),
    /// Inference failed; indicator unchanged
    Skipped(InferenceError),
    /// No model loaded
    Disabled,
}

impl ActuatorOutcome {
    /// Level shown this cycle, if any
    pub fn level(&self) -> Option<ActuationLevel> {
        match self {
            ActuatorOutcome::Applied(inference) => Some(inference.level),
            _ => None,
        }
    }
}

/// Data of a completed cycle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleSummary {
    pub reading: Reading,
    pub moisture: MoistureSample,
    pub features: FeatureVector,
    pub fan: ActuatorOutcome,
    pub pump: ActuatorOutcome,
}

/// Result of one cycle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleReport {
    /// Sensors could not be read; nothing was actuated
    SensorFault(SensorError),
    /// Sensors read and both actuators processed
    Completed(CycleSummary),
}

impl CycleReport {
    /// Wait before the next cycle
    pub fn next_delay_ms(&self, timing: &ControlTiming) -> u32 {
        match self {
            CycleReport::SensorFault(_) => timing.fault_backoff_ms,
            CycleReport::Completed(_) => timing.cycle_interval_ms,
        }
    }
}

/// Ties the sensors, the two actuators and the fault lamp together
pub struct Controller<C, M, E, B, F> {
    climate: C,
    moisture: M,
    fan: Actuator<E, B>,
    pump: Actuator<E, B>,
    fault: F,
}

impl<C, M, E, B, F> Controller<C, M, E, B, F>
where
    C: ClimateSensor,
    M: MoistureSensor,
    E: InferenceEngine,
    B: LevelIndicator,
    F: FaultIndicator,
{
    /// Create a controller; the fault lamp starts off
    pub fn new(
        climate: C,
        moisture: M,
        fan: Actuator<E, B>,
        pump: Actuator<E, B>,
        mut fault: F,
    ) -> Self {
        fault.set_fault(false);
        Self {
            climate,
            moisture,
            fan,
            pump,
            fault,
        }
    }

    pub fn fan(&self) -> &Actuator<E, B> {
        &self.fan
    }

    pub fn pump(&self) -> &Actuator<E, B> {
        &self.pump
    }

    pub fn fault(&self) -> &F {
        &self.fault
    }

    /// Run one complete cycle
    pub fn run_cycle(&mut self) -> CycleReport {
        let (reading, moisture) = match self.read_sensors() {
            Ok(values) => values,
            Err(e) => {
                self.fault.set_fault(true);
                return CycleReport::SensorFault(e);
            }
        };
        self.fault.set_fault(false);

        let features = FeatureVector::from_readings(&reading, &moisture);
        let fan = self.fan.step(&features);
        let pump = self.pump.step(&features);

        CycleReport::Completed(CycleSummary {
            reading,
            moisture,
            features,
            fan,
            pump,
        })
    }

    fn read_sensors(&mut self) -> Result<(Reading, MoistureSample), SensorError> {
        let reading = self.climate.read()?;
        if !reading.is_plausible() {
            return Err(SensorError::Implausible);
        }
        let moisture = self.moisture.read_moisture()?;
        Ok((reading, moisture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{ActuationLevel, QuantParams};
    use crate::traits::{ElementType, EngineError, TensorInfo, WaitStage};

    struct ScriptedClimate(Result<Reading, SensorError>);

    impl ClimateSensor for ScriptedClimate {
        fn read(&mut self) -> Result<Reading, SensorError> {
            self.0
        }
    }

    struct FixedMoisture {
        sample: Result<MoistureSample, SensorError>,
        reads: u32,
    }

    impl MoistureSensor for FixedMoisture {
        fn read_moisture(&mut self) -> Result<MoistureSample, SensorError> {
            self.reads += 1;
            self.sample
        }
    }

    /// Float engine that keeps its input and returns fixed scores
    struct StubEngine {
        input: [u8; 12],
        output: [u8; 20],
        fail: bool,
    }

    impl StubEngine {
        fn new(scores: [f32; 5]) -> Self {
            let mut output = [0u8; 20];
            for (chunk, s) in output.chunks_exact_mut(4).zip(scores) {
                chunk.copy_from_slice(&s.to_ne_bytes());
            }
            Self {
                input: [0; 12],
                output,
                fail: false,
            }
        }

        fn last_input(&self) -> [f32; 3] {
            let mut values = [0.0; 3];
            for (v, chunk) in values.iter_mut().zip(self.input.chunks_exact(4)) {
                *v = f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            }
            values
        }
    }

    impl InferenceEngine for StubEngine {
        fn input_info(&self) -> TensorInfo {
            TensorInfo::new(ElementType::Float32, QuantParams::NONE, &[1, 3])
        }

        fn output_info(&self) -> TensorInfo {
            TensorInfo::new(ElementType::Float32, QuantParams::NONE, &[1, 5])
        }

        fn input_bytes(&mut self) -> &mut [u8] {
            &mut self.input
        }

        fn invoke(&mut self) -> Result<(), EngineError> {
            if self.fail {
                Err(EngineError::Invocation)
            } else {
                Ok(())
            }
        }

        fn output_bytes(&self) -> &[u8] {
            &self.output
        }
    }

    #[derive(Default)]
    struct MockBank {
        level: Option<ActuationLevel>,
        writes: u32,
    }

    impl LevelIndicator for MockBank {
        fn show(&mut self, level: ActuationLevel) {
            self.level = Some(level);
            self.writes += 1;
        }
    }

    #[derive(Default)]
    struct MockLamp(bool);

    impl FaultIndicator for MockLamp {
        fn set_fault(&mut self, active: bool) {
            self.0 = active;
        }
    }

    type TestController = Controller<ScriptedClimate, FixedMoisture, StubEngine, MockBank, MockLamp>;

    fn controller(
        climate: Result<Reading, SensorError>,
        fan: Option<StubEngine>,
        pump: Option<StubEngine>,
    ) -> TestController {
        Controller::new(
            ScriptedClimate(climate),
            FixedMoisture {
                sample: Ok(MoistureSample {
                    raw: 2650,
                    percent: 45.0,
                }),
                reads: 0,
            },
            Actuator::new(fan, MockBank::default()),
            Actuator::new(pump, MockBank::default()),
            MockLamp(true),
        )
    }

    #[test]
    fn test_completed_cycle() {
        let mut c = controller(
            Ok(Reading::new(250, 600)),
            Some(StubEngine::new([0.1, 0.2, 0.6, 0.05, 0.05])),
            Some(StubEngine::new([0.0, 0.0, 0.0, 0.1, 0.9])),
        );
        assert!(!c.fault().0);

        let report = c.run_cycle();
        let CycleReport::Completed(summary) = &report else {
            panic!("expected completed cycle, got {:?}", report);
        };

        assert_eq!(summary.features.as_array(), &[25.0, 60.0, 45.0]);
        assert!(matches!(&summary.fan, ActuatorOutcome::Applied(i) if i.level.value() == 2));
        assert!(matches!(&summary.pump, ActuatorOutcome::Applied(i) if i.level.value() == 4));

        assert_eq!(c.fan().indicator().level, Some(ActuationLevel::from_index(2)));
        assert_eq!(c.pump().indicator().level, Some(ActuationLevel::MAX));
        assert_eq!(c.fan().engine().unwrap().last_input(), [25.0, 60.0, 45.0]);
        assert_eq!(c.pump().engine().unwrap().last_input(), [25.0, 60.0, 45.0]);
        assert_eq!(report.next_delay_ms(&ControlTiming::default()), 3000);
    }

    #[test]
    fn test_sensor_fault_skips_models() {
        let timeout = SensorError::Timeout(WaitStage::ResponseLow);
        let mut c = controller(
            Err(timeout),
            Some(StubEngine::new([0.1, 0.2, 0.6, 0.05, 0.05])),
            Some(StubEngine::new([0.1, 0.2, 0.6, 0.05, 0.05])),
        );

        let report = c.run_cycle();

        assert_eq!(report, CycleReport::SensorFault(timeout));
        assert!(c.fault().0);
        // Only the initial clear
        assert_eq!(c.fan().indicator().writes, 1);
        assert_eq!(c.pump().indicator().writes, 1);
        assert_eq!(report.next_delay_ms(&ControlTiming::default()), 2000);
    }

    #[test]
    fn test_implausible_humidity_is_a_fault() {
        let mut c = controller(Ok(Reading::new(250, 1200)), None, None);

        assert_eq!(c.run_cycle(), CycleReport::SensorFault(SensorError::Implausible));
        assert!(c.fault().0);
        assert_eq!(c.moisture.reads, 0);
    }

    #[test]
    fn test_moisture_failure_is_a_fault() {
        let mut c = controller(Ok(Reading::new(250, 600)), None, None);
        c.moisture.sample = Err(SensorError::ConversionError);

        assert_eq!(
            c.run_cycle(),
            CycleReport::SensorFault(SensorError::ConversionError)
        );
        assert!(c.fault().0);
    }

    #[test]
    fn test_fault_lamp_clears_after_recovery() {
        let mut c = controller(Err(SensorError::Implausible), None, None);
        c.run_cycle();
        assert!(c.fault().0);

        c.climate.0 = Ok(Reading::new(210, 550));
        c.run_cycle();
        assert!(!c.fault().0);
    }

    #[test]
    fn test_inference_failure_keeps_previous_level() {
        let mut c = controller(
            Ok(Reading::new(250, 600)),
            Some(StubEngine::new([0.1, 0.2, 0.6, 0.05, 0.05])),
            Some(StubEngine::new([0.9, 0.0, 0.0, 0.0, 0.0])),
        );
        c.run_cycle();
        assert_eq!(c.fan().indicator().level.map(|l| l.value()), Some(2));

        c.fan.engine.as_mut().unwrap().fail = true;
        let report = c.run_cycle();

        let CycleReport::Completed(summary) = report else {
            panic!("expected completed cycle");
        };
        assert_eq!(
            summary.fan,
            ActuatorOutcome::Skipped(InferenceError::Engine(EngineError::Invocation))
        );
        // Pump still processed
        assert!(matches!(summary.pump, ActuatorOutcome::Applied(_)));
        assert_eq!(c.fan().indicator().level.map(|l| l.value()), Some(2));
    }

    #[test]
    fn test_disabled_actuator() {
        let mut c = controller(
            Ok(Reading::new(250, 600)),
            None,
            Some(StubEngine::new([0.1, 0.2, 0.6, 0.05, 0.05])),
        );
        assert!(!c.fan().is_enabled());

        let CycleReport::Completed(summary) = c.run_cycle() else {
            panic!("expected completed cycle");
        };
        assert_eq!(summary.fan, ActuatorOutcome::Disabled);
        assert_eq!(summary.fan.level(), None);
        assert_eq!(summary.pump.level(), Some(ActuationLevel::from_index(2)));
        assert_eq!(c.fan().indicator().level, Some(ActuationLevel::OFF));
    }
}
