//! Build script for marquee-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Longest text that fits one payload line
const PAYLOAD_MAX_LEN: usize = 19;

/// Panel height in pixels
const PANEL_HEIGHT: i64 = 64;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("cannot create memory.x");
    f.write_all(memory_x).expect("cannot write memory.x");

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
        fail(
            "display.toml not found",
            &["The firmware embeds display.toml from the marquee-firmware directory."],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read display.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let msg = e.to_string();
            let lines: Vec<&str> = msg.lines().collect();
            fail("Invalid TOML syntax in display.toml", &lines)
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_layout(&config, &mut errors);
    validate_startup(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid display configuration", &errors);
    }

    println!("cargo:warning=display.toml validated successfully");
}

/// Abort the build with a boxed error message
fn fail<S: AsRef<str>>(title: &str, details: &[S]) -> ! {
    let body = details
        .iter()
        .flat_map(|d| d.as_ref().lines().map(str::to_string).collect::<Vec<_>>())
        .map(|line| {
            let truncated = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<58} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return;
    };

    for (name, value) in table {
        if !["display", "layout", "startup"].contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display").and_then(|d| d.as_table()) else {
        return;
    };

    if let Some(value) = display.get("enabled") {
        if !value.is_bool() {
            errors.push("[display] enabled must be true or false".to_string());
        }
    }

    if let Some(value) = display.get("self_test") {
        match value.as_str() {
            Some("none" | "lines" | "rectangles") => {}
            _ => errors.push(
                "[display] self_test must be 'none', 'lines', or 'rectangles'".to_string(),
            ),
        }
    }

    if let Some(value) = display.get("tick_ms") {
        match value.as_integer() {
            Some(ms) if ms > 0 && ms <= i64::from(u32::MAX) => {}
            _ => errors.push("[display] tick_ms must be a positive integer".to_string()),
        }
    }

    if let Some(value) = display.get("post_test_delay_ms") {
        match value.as_integer() {
            Some(ms) if ms >= 0 && ms <= i64::from(u32::MAX) => {}
            _ => errors.push("[display] post_test_delay_ms must be 0 or more".to_string()),
        }
    }
}

fn validate_layout(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(layout) = config.get("layout").and_then(|l| l.as_table()) else {
        return;
    };

    for row in ["top", "wide", "bottom", "narrow"] {
        let Some(value) = layout.get(row) else {
            continue;
        };
        let parsed = value.as_str().and_then(|s| {
            let (start, size) = s.split_once(':')?;
            Some((start.trim().parse::<i64>().ok()?, size.trim().parse::<i64>().ok()?))
        });
        match parsed {
            Some((start, size)) if (0..PANEL_HEIGHT).contains(&start) && (1..=8).contains(&size) => {}
            Some(_) => errors.push(format!(
                "[layout] {} start must be 0-63 and size 1-8",
                row
            )),
            None => errors.push(format!("[layout] {} must be \"start:size\"", row)),
        }
    }
}

fn validate_startup(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(startup) = config.get("startup").and_then(|s| s.as_table()) else {
        return;
    };

    if let Some(value) = startup.get("style") {
        match value.as_integer() {
            Some(0..=7) => {}
            _ => errors.push("[startup] style must be 0-7".to_string()),
        }
    }

    if let Some(value) = startup.get("scroll") {
        match value.as_integer() {
            Some(0..=4) => {}
            _ => errors.push("[startup] scroll must be 0-4".to_string()),
        }
    }

    for key in ["line0", "line1", "line2"] {
        if let Some(value) = startup.get(key) {
            match value.as_str() {
                Some(text) if text.len() <= PAYLOAD_MAX_LEN => {}
                Some(_) => errors.push(format!(
                    "[startup] {} longer than {} bytes",
                    key, PAYLOAD_MAX_LEN
                )),
                None => errors.push(format!("[startup] {} must be a string", key)),
            }
        }
    }
}
