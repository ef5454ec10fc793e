//! Build script for dts-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates sensor.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in each section of sensor.toml
const KNOWN_KEYS: &[(&str, &[&str])] = &[
    ("uart", &["baudrate", "data_bits", "parity", "stop_bits"]),
    (
        "link",
        &[
            "timeout_ms",
            "update_interval_ms",
            "startup_delay_ms",
            "activity_on_any_byte",
        ],
    ),
    ("decoder", &["max_bytes_per_tick", "hysteresis_mm"]),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate sensor.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=sensor.toml");

    let config_path = Path::new("sensor.toml");
    if !config_path.exists() {
        fail(&["sensor.toml not found in the dts-firmware directory"]);
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(&[&format!("Failed to read sensor.toml: {e}")]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(&[&format!("Invalid TOML syntax in sensor.toml: {e}")]),
    };

    let mut errors = Vec::new();
    validate_keys(&config, &mut errors);
    validate_uart(&config, &mut errors);
    validate_positive(&config, "link", "timeout_ms", &mut errors);
    validate_positive(&config, "link", "update_interval_ms", &mut errors);
    validate_positive(&config, "decoder", "max_bytes_per_tick", &mut errors);

    if !errors.is_empty() {
        let lines: Vec<&str> = errors.iter().map(String::as_str).collect();
        fail(&lines);
    }

    println!("cargo:warning=sensor.toml validated successfully");
}

/// Reject unknown sections and keys so typos do not silently fall back to defaults
fn validate_keys(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        errors.push("sensor.toml must be a table".to_string());
        return;
    };

    for (section, value) in table {
        let Some(&(_, keys)) = KNOWN_KEYS.iter().find(|(name, _)| *name == section.as_str()) else {
            errors.push(format!("Unknown section [{section}]"));
            continue;
        };
        let Some(entries) = value.as_table() else {
            errors.push(format!("[{section}] must be a table"));
            continue;
        };
        for key in entries.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("Unknown key '{key}' in [{section}]"));
            }
        }
    }
}

/// The sensor only works at 9600 8N1
fn validate_uart(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(uart) = config.get("uart") else {
        return;
    };
    if let Some(baud) = uart.get("baudrate").and_then(toml::Value::as_integer) {
        if baud != 9600 {
            errors.push(format!("[uart] baudrate must be 9600, got {baud}"));
        }
    }
    if let Some(bits) = uart.get("data_bits").and_then(toml::Value::as_integer) {
        if bits != 8 {
            errors.push(format!("[uart] data_bits must be 8, got {bits}"));
        }
    }
    if let Some(parity) = uart.get("parity").and_then(toml::Value::as_str) {
        if parity != "none" {
            errors.push(format!("[uart] parity must be \"none\", got \"{parity}\""));
        }
    }
    if let Some(stop) = uart.get("stop_bits").and_then(toml::Value::as_integer) {
        if stop != 1 {
            errors.push(format!("[uart] stop_bits must be 1, got {stop}"));
        }
    }
}

fn validate_positive(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    let Some(value) = config.get(section).and_then(|s| s.get(key)) else {
        return;
    };
    match value.as_integer() {
        Some(n) if n > 0 => {}
        _ => errors.push(format!("[{section}] {key} must be a positive integer")),
    }
}

fn fail(lines: &[&str]) -> ! {
    let body = lines
        .iter()
        .map(|line| format!("║  {:<64} ║", line))
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: sensor.toml is not valid                                 ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {body}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n"
    );
}
