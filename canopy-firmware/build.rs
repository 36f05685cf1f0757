//! Build script for canopy-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Parses and validates canopy.toml, generates `CONFIG`
//! - Checks the model blobs are present
//! - Links the inference runtime shim

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use canopy_core::config::{CanopyConfig, ConfigError};

const MODELS: [&str; 2] = ["models/fan_model.tflite", "models/pump_model.tflite"];

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    setup_linker(&out_dir);
    generate_config(&out_dir);
    check_models();
    link_runtime();
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Boxed build error
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|l| format!("║  {:<64}║", l))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Parse canopy.toml and write `OUT_DIR/config.rs`
fn generate_config(out_dir: &Path) {
    println!("cargo:rerun-if-changed=canopy.toml");

    let config_path = Path::new("canopy.toml");

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(
            "Failed to read canopy.toml",
            &[
                format!("{}", e),
                String::new(),
                "The firmware requires a canopy.toml next to Cargo.toml.".into(),
            ],
        ),
    };

    let config: CanopyConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(String::from).collect();
            fail("Invalid canopy.toml", &lines)
        }
    };

    if let Err(e) = config.validate() {
        let reason = match e {
            ConfigError::InvalidSoilCalibration => {
                "[soil] dry_raw must exceed wet_raw and sample_count must be > 0"
            }
            ConfigError::InvalidTiming => {
                "[sensor] need 0 < bit_threshold < polling_limit"
            }
        };
        fail("Invalid configuration", &[reason.into()]);
    }

    let mut f = File::create(out_dir.join("config.rs")).unwrap();
    f.write_all(render_config(&config).as_bytes()).unwrap();
}

/// Render the configuration as a Rust constant
fn render_config(config: &CanopyConfig) -> String {
    let s = &config.sensor;
    let soil = &config.soil;
    let c = &config.control;

    format!(
        "// Generated from canopy.toml by build.rs\n\
        pub const CONFIG: canopy_core::config::CanopyConfig = canopy_core::config::CanopyConfig {{\n\
        \x20   sensor: canopy_core::config::SensorTiming {{\n\
        \x20       start_signal_ms: {},\n\
        \x20       poll_interval_us: {},\n\
        \x20       polling_limit: {},\n\
        \x20       bit_threshold: {},\n\
        \x20       stabilize_ms: {},\n\
        \x20       strict_checksum: {},\n\
        \x20   }},\n\
        \x20   soil: canopy_core::config::SoilCalibration {{\n\
        \x20       dry_raw: {},\n\
        \x20       wet_raw: {},\n\
        \x20       sample_count: {},\n\
        \x20       sample_interval_us: {},\n\
        \x20   }},\n\
        \x20   control: canopy_core::config::ControlTiming {{\n\
        \x20       boot_delay_ms: {},\n\
        \x20       cycle_interval_ms: {},\n\
        \x20       fault_backoff_ms: {},\n\
        \x20   }},\n\
        }};\n",
        s.start_signal_ms,
        s.poll_interval_us,
        s.polling_limit,
        s.bit_threshold,
        s.stabilize_ms,
        s.strict_checksum,
        soil.dry_raw,
        soil.wet_raw,
        soil.sample_count,
        soil.sample_interval_us,
        c.boot_delay_ms,
        c.cycle_interval_ms,
        c.fault_backoff_ms,
    )
}

/// Both models are embedded with include_bytes!
fn check_models() {
    let missing: Vec<String> = MODELS
        .iter()
        .inspect(|m| println!("cargo:rerun-if-changed={}", m))
        .filter(|m| !Path::new(m).exists())
        .map(|m| format!("missing {}", m))
        .collect();

    if !missing.is_empty() {
        let mut lines = missing;
        lines.push(String::new());
        lines.push("See models/README.md.".into());
        fail("Model blobs not found", &lines);
    }
}

/// Link the prebuilt inference runtime shim
fn link_runtime() {
    println!("cargo:rerun-if-env-changed=TFLM_SHIM_DIR");

    let dir = match env::var("TFLM_SHIM_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => fail(
            "TFLM_SHIM_DIR not set",
            &[
                "Set TFLM_SHIM_DIR to the directory holding libtflm_shim.a".into(),
                String::new(),
                "See models/README.md.".into(),
            ],
        ),
    };

    if !dir.join("libtflm_shim.a").exists() {
        fail(
            "libtflm_shim.a not found",
            &[format!("looked in {}", dir.display())],
        );
    }

    println!("cargo:rustc-link-search=native={}", dir.display());
    println!("cargo:rustc-link-lib=static=tflm_shim");
}
