//! Build script for dicemux-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates dice.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Must match `dicemux_core::config::MAX_DICE`
const MAX_DICE: i64 = 5;

const SECTIONS: &[&str] = &["dice", "power", "flash", "roll", "switches"];
const TIMERS: &[&str] = &["free_running", "one_shot"];

fn main() {
    setup_linker();
    validate_settings();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate dice.toml at compile time
///
/// The firmware's own parser falls back to defaults on bad input, so
/// mistakes are caught here instead of silently at boot.
fn validate_settings() {
    println!("cargo:rerun-if-changed=dice.toml");

    let path = Path::new("dice.toml");
    if !path.exists() {
        fail("dice.toml not found", &["The firmware embeds dice.toml from the crate directory."]);
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read dice.toml", &[e.to_string()]),
    };

    let settings: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
            fail("Invalid TOML syntax in dice.toml", &lines);
        }
    };

    let errors = check_settings(&settings);
    if !errors.is_empty() {
        fail("Invalid settings in dice.toml", &errors);
    }

    println!("cargo:warning=dice.toml validated successfully");
}

fn check_settings(settings: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(root) = settings.as_table() else {
        return vec!["top level must be a table".to_string()];
    };
    for (name, value) in root {
        if !SECTIONS.contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }

    check_int(settings, "dice", "count", 1, MAX_DICE, &mut errors);
    if let Some(timer) = settings.get("dice").and_then(|d| d.get("timer")) {
        match timer.as_str() {
            Some(name) if TIMERS.contains(&name) => {}
            _ => errors.push("[dice] timer must be \"free_running\" or \"one_shot\"".to_string()),
        }
    }

    if let Some(percent) = settings.get("power").and_then(|p| p.get("percent")) {
        match percent.as_array() {
            Some(list) if list.len() as i64 <= MAX_DICE => {
                for (i, p) in list.iter().enumerate() {
                    if !p.as_integer().is_some_and(|p| (0..=100).contains(&p)) {
                        errors.push(format!("[power] percent[{}] must be 0-100", i));
                    }
                }
            }
            Some(_) => errors.push(format!("[power] percent has more than {} entries", MAX_DICE)),
            None => errors.push("[power] percent must be an array".to_string()),
        }
    }

    check_int(settings, "flash", "mask", 0, (1 << MAX_DICE) - 1, &mut errors);
    check_int(settings, "flash", "period_ms", 0, u32::MAX as i64, &mut errors);
    check_int(settings, "roll", "duration_ms", 0, i32::MAX as i64, &mut errors);
    check_int(settings, "roll", "interval_ms", 0, i32::MAX as i64, &mut errors);
    check_int(settings, "switches", "poll_ms", 1, 10_000, &mut errors);

    errors
}

/// Optional integer key within `min..=max`
fn check_int(
    settings: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    let Some(value) = settings.get(section).and_then(|s| s.get(key)) else {
        return;
    };
    match value.as_integer() {
        Some(v) if (min..=max).contains(&v) => {}
        _ => errors.push(format!("[{}] {} must be an integer {}-{}", section, key, min, max)),
    }
}

fn fail<S: AsRef<str>>(title: &str, lines: &[S]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
