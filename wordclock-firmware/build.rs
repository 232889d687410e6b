//! Build script for wordclock-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates clock.toml at compile time
//! - Emits the validated values as constants for `src/config.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
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

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Values read from clock.toml
struct ClockToml {
    half_to: bool,
    poll_interval_ms: u32,
    demo: bool,
    transition: String,
    scroll_speed_ms: u32,
    boot_hold_ms: u32,
    reverse_bits: bool,
    reverse_rows: bool,
}

/// Validate clock.toml configuration at compile time
fn validate_config() -> ClockToml {
    // Re-run if clock.toml changes
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: clock.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a clock.toml configuration file.          ║\n\
            ║  Please create one in the wordclock-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read clock.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in clock.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let clock = section(&config, "clock", &mut errors);
    let display = section(&config, "display", &mut errors);

    let parsed = ClockToml {
        half_to: get_bool(clock, "clock", "half_to", true, &mut errors),
        poll_interval_ms: get_ms(clock, "clock", "poll_interval_ms", 200, 10..=60_000, &mut errors),
        demo: get_bool(clock, "clock", "demo", false, &mut errors),
        transition: get_transition(display, &mut errors),
        scroll_speed_ms: get_ms(display, "display", "scroll_speed_ms", 20, 1..=1000, &mut errors),
        boot_hold_ms: get_ms(display, "display", "boot_hold_ms", 3000, 0..=60_000, &mut errors),
        reverse_bits: get_bool(display, "display", "reverse_bits", false, &mut errors),
        reverse_rows: get_bool(display, "display", "reverse_rows", false, &mut errors),
    };

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid clock configuration                              ║\n\
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

    println!("cargo:warning=clock.toml validated successfully");
    parsed
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

fn section<'a>(
    config: &'a toml::Value,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::value::Table> {
    match config.get(name) {
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
        None => {
            errors.push(format!("Missing [{}] section", name));
            None
        }
    }
}

fn get_bool(
    table: Option<&toml::value::Table>,
    section: &str,
    key: &str,
    default: bool,
    errors: &mut Vec<String>,
) -> bool {
    match table.and_then(|t| t.get(key)) {
        Some(toml::Value::Boolean(b)) => *b,
        Some(_) => {
            errors.push(format!("[{}] {} must be true or false", section, key));
            default
        }
        None => default,
    }
}

fn get_ms(
    table: Option<&toml::value::Table>,
    section: &str,
    key: &str,
    default: u32,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) -> u32 {
    match table.and_then(|t| t.get(key)) {
        Some(toml::Value::Integer(ms)) if range.contains(ms) => *ms as u32,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!(
                "[{}] {} must be {}-{}",
                section,
                key,
                range.start(),
                range.end()
            ));
            default
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            default
        }
        None => default,
    }
}

fn get_transition(table: Option<&toml::value::Table>, errors: &mut Vec<String>) -> String {
    match table.and_then(|t| t.get("transition")) {
        Some(toml::Value::String(s)) if s == "scroll" || s == "sparkle" => s.clone(),
        Some(_) => {
            errors.push("[display] transition must be \"scroll\" or \"sparkle\"".to_string());
            "sparkle".to_string()
        }
        None => "sparkle".to_string(),
    }
}

/// Write the validated values as Rust constants
fn generate_config(config: &ClockToml) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("clock_config.rs")).unwrap();

    let transition = match config.transition.as_str() {
        "scroll" => "TransitionKind::Scroll",
        _ => "TransitionKind::Sparkle",
    };

    writeln!(f, "// Generated from clock.toml by build.rs").unwrap();
    writeln!(f, "pub const HALF_TO_ENABLED: bool = {};", config.half_to).unwrap();
    writeln!(f, "pub const POLL_INTERVAL_MS: u32 = {};", config.poll_interval_ms).unwrap();
    writeln!(f, "pub const DEMO_MODE: bool = {};", config.demo).unwrap();
    writeln!(f, "pub const TRANSITION: TransitionKind = {};", transition).unwrap();
    writeln!(f, "pub const SCROLL_SPEED_MS: u32 = {};", config.scroll_speed_ms).unwrap();
    writeln!(f, "pub const BOOT_HOLD_MS: u32 = {};", config.boot_hold_ms).unwrap();
    writeln!(f, "pub const REVERSE_BITS: bool = {};", config.reverse_bits).unwrap();
    writeln!(f, "pub const REVERSE_ROWS: bool = {};", config.reverse_rows).unwrap();
}
