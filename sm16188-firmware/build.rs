//! Build script for sm16188-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Largest panel the firmware framebuffer holds (see `MAX_COLUMNS` and
/// `MAX_ROWS` in main.rs)
const MAX_COLUMNS: i64 = 4;
const MAX_ROWS: i64 = 2;

/// Framebuffer bytes per 32x16 tile
const BYTES_PER_TILE: i64 = 64;

/// Longest marquee the display keeps
const MAX_MARQUEE_LEN: usize = 64;

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

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate display.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a display.toml configuration file.        ║\n\
            ║  Please create one in the sm16188-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in display.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_display(&config, &mut errors);
    validate_timing(&config, &mut errors);
    validate_refresh(&config, &mut errors);
    validate_scene(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid display configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=display.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Integer field of a section, if present
fn int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// Check an optional integer field against an inclusive range
fn check_range(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match config.get(section).and_then(|s| s.get(key)) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    if config.get("display").is_none() {
        errors.push("Missing [display] section".to_string());
        return;
    }
    check_range(config, "display", "columns", 1, MAX_COLUMNS, errors);
    check_range(config, "display", "rows", 1, MAX_ROWS, errors);
    check_range(config, "display", "brightness", 0, 15, errors);
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    check_range(config, "timing", "cell_us", 1, 1000, errors);
    check_range(config, "timing", "one_high_us", 0, 1000, errors);
    check_range(config, "timing", "zero_high_us", 0, 1000, errors);

    let cell = int(config, "timing", "cell_us").unwrap_or(4);
    let one = int(config, "timing", "one_high_us").unwrap_or(3);
    let zero = int(config, "timing", "zero_high_us").unwrap_or(0);
    if one >= cell {
        errors.push("[timing] one_high_us must be less than cell_us".to_string());
    }
    if zero >= one {
        errors.push("[timing] zero_high_us must be less than one_high_us".to_string());
    }
}

fn validate_refresh(config: &toml::Value, errors: &mut Vec<String>) {
    check_range(config, "refresh", "interval_ms", 1, 10_000, errors);

    // A refresh longer than its period would starve every other task
    let columns = int(config, "display", "columns").unwrap_or(1);
    let rows = int(config, "display", "rows").unwrap_or(1);
    let cell = int(config, "timing", "cell_us").unwrap_or(4);
    let interval = int(config, "refresh", "interval_ms").unwrap_or(20);

    let frame_us = (columns * rows * BYTES_PER_TILE * 8 + 8) * cell;
    if interval * 1000 <= frame_us {
        errors.push(format!(
            "[refresh] interval_ms must exceed the {} us frame time",
            frame_us
        ));
    }
}

fn validate_scene(config: &toml::Value, errors: &mut Vec<String>) {
    check_range(config, "scene", "interval_ms", 100, 60_000, errors);

    match config.get("scene").and_then(|s| s.get("marquee")) {
        None => {}
        Some(toml::Value::String(text)) => {
            if text.len() > MAX_MARQUEE_LEN {
                errors.push(format!(
                    "[scene] marquee longer than {} bytes",
                    MAX_MARQUEE_LEN
                ));
            }
            if !text.is_ascii() {
                errors.push("[scene] marquee must be ASCII".to_string());
            }
        }
        Some(_) => errors.push("[scene] marquee must be a string".to_string()),
    }
}
