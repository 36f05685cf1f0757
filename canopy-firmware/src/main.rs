//! Canopy - Greenhouse Indicator Firmware
//!
//! Main firmware binary for the RP2040 greenhouse board. Every cycle reads
//! a DHT11 and a capacitive soil probe, runs the fan and pump classifiers
//! and shows their levels on two LED bars.
//!
//! Wiring:
//! - DHT11 data: GPIO3 (pull-up)
//! - Soil probe: GPIO26 / ADC0
//! - Fan LEDs: GPIO10-13
//! - Pump LEDs: GPIO14-17
//! - Sensor fault LED: GPIO18

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::Pull;
use embassy_time::{Delay, Timer};
use static_cell::ConstStaticCell;
use {defmt_rtt as _, panic_probe as _};

use canopy_core::control::{Actuator, ActuatorOutcome, Controller, CycleReport, CycleSummary};
use canopy_core::traits::{ElementType, InferenceEngine, TensorInfo};
use canopy_drivers::indicator::{FaultLed, LedBank};
use canopy_drivers::sensor::{Dht11, SoilSampler};
use canopy_hal_rp2040::{AdcChannel, RpAdcReader, RpFlexPin, RpOutputPin};

use crate::engine::{Slot, TflmEngine};

mod engine;
mod models;

// Generated by build.rs from canopy.toml
include!(concat!(env!("OUT_DIR"), "/config.rs"));

/// Tensor arena per model
const ARENA_SIZE: usize = 16 * 1024;

const SOIL_GPIO: u8 = 26;

// Separate arenas: both interpreters stay live for the whole run
static FAN_ARENA: ConstStaticCell<[u8; ARENA_SIZE]> = ConstStaticCell::new([0; ARENA_SIZE]);
static PUMP_ARENA: ConstStaticCell<[u8; ARENA_SIZE]> = ConstStaticCell::new([0; ARENA_SIZE]);

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());

    // Give the debug probe time to attach
    Timer::after_millis(CONFIG.control.boot_delay_ms as u64).await;

    info!("=== Canopy: DHT11 + soil + fan/pump classifiers ===");
    info!(
        "Sensor: poll={}us limit={} threshold={} strict_checksum={}",
        CONFIG.sensor.poll_interval_us,
        CONFIG.sensor.polling_limit,
        CONFIG.sensor.bit_threshold,
        CONFIG.sensor.strict_checksum
    );
    info!(
        "Soil: dry={} wet={} samples={}",
        CONFIG.soil.dry_raw, CONFIG.soil.wet_raw, CONFIG.soil.sample_count
    );

    // Climate sensor (blocks for the stabilization delay)
    let dht = Dht11::new(RpFlexPin::new(p.PIN_3.into()), Delay, CONFIG.sensor);
    info!("DHT11 ready on GPIO3");

    // Soil probe
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let channel = Channel::new_pin(p.PIN_26, Pull::None);
    let soil = SoilSampler::new(RpAdcReader::new(adc, channel), Delay, CONFIG.soil);
    if let Some(ch) = AdcChannel::from_gpio(SOIL_GPIO) {
        info!("Soil probe on GPIO{} ({})", SOIL_GPIO, ch);
    }

    // Indicators
    let fan_leds = LedBank::new([
        RpOutputPin::new(p.PIN_10.into()),
        RpOutputPin::new(p.PIN_11.into()),
        RpOutputPin::new(p.PIN_12.into()),
        RpOutputPin::new(p.PIN_13.into()),
    ]);
    let pump_leds = LedBank::new([
        RpOutputPin::new(p.PIN_14.into()),
        RpOutputPin::new(p.PIN_15.into()),
        RpOutputPin::new(p.PIN_16.into()),
        RpOutputPin::new(p.PIN_17.into()),
    ]);
    let fault_led = FaultLed::new_active_high(RpOutputPin::new(p.PIN_18.into()));

    // Models
    let fan_engine = load_model("fan", Slot::Fan, models::fan_model(), FAN_ARENA.take());
    let pump_engine = load_model("pump", Slot::Pump, models::pump_model(), PUMP_ARENA.take());

    let mut controller = Controller::new(
        dht,
        soil,
        Actuator::new(fan_engine, fan_leds),
        Actuator::new(pump_engine, pump_leds),
        fault_led,
    );
    info!("Entering main loop");

    loop {
        let report = controller.run_cycle();
        log_report(&report);

        Timer::after_millis(report.next_delay_ms(&CONFIG.control) as u64).await;
    }
}

/// Load a model, or disable its actuator if that fails
fn load_model(
    name: &str,
    slot: Slot,
    model: &'static [u8],
    arena: &'static mut [u8],
) -> Option<TflmEngine> {
    match TflmEngine::new(slot, model, arena) {
        Ok(engine) => {
            log_tensor(name, "input", &engine.input_info());
            log_tensor(name, "output", &engine.output_info());
            Some(engine)
        }
        Err(e) => {
            error!("{} model failed to load: {}; actuator disabled", name, e);
            None
        }
    }
}

fn log_tensor(model: &str, role: &str, info: &TensorInfo) {
    match info.element_type {
        ElementType::Int8 | ElementType::UInt8 => info!(
            "{} {}: type={} dims={} scale={} zero_point={}",
            model,
            role,
            info.element_type,
            info.shape.as_slice(),
            info.quant.scale,
            info.quant.zero_point
        ),
        _ => info!(
            "{} {}: type={} dims={}",
            model,
            role,
            info.element_type,
            info.shape.as_slice()
        ),
    }
}

fn log_report(report: &CycleReport) {
    match report {
        CycleReport::SensorFault(e) => {
            warn!("Sensor read failed: {}", e);
        }
        CycleReport::Completed(summary) => log_summary(summary),
    }
}

fn log_summary(summary: &CycleSummary) {
    info!("-----------------------------------");
    info!(
        "Temp: {}C | Humid: {}% | Soil: {}% (raw={})",
        summary.reading.temperature_c(),
        summary.reading.humidity_pct(),
        summary.moisture.percent,
        summary.moisture.raw
    );

    log_outcome("fan", &summary.fan);
    log_outcome("pump", &summary.pump);

    info!(
        "Fan Level: {} | Pump Level: {}",
        summary.fan.level().map(|l| l.value()),
        summary.pump.level().map(|l| l.value())
    );
}

fn log_outcome(name: &str, outcome: &ActuatorOutcome) {
    match outcome {
        ActuatorOutcome::Applied(inference) => {
            debug!("{} scores: {}", name, inference.scores.as_slice());
        }
        ActuatorOutcome::Skipped(e) => {
            error!("{} inference failed: {}", name, e);
        }
        ActuatorOutcome::Disabled => {}
    }
}
