//! Build script for volley-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates blaster.toml and compiles it into the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use volley_core::config::{ChamberClearRule, FireConfig, ShotCount};

fn main() {
    setup_linker();
    generate_config();
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

/// Parse blaster.toml, validate it and emit it as Rust constants
fn generate_config() {
    println!("cargo:rerun-if-changed=blaster.toml");

    let config_path = Path::new("blaster.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Failed to read blaster.toml                              ║\n\
            ║                                                                  ║\n\
            ║  Error: {:<56} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            e
        ),
    };

    let config: FireConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid blaster.toml                                     ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&e.to_string())
        ),
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: blaster.toml rejected                                    ║\n\
            ║                                                                  ║\n\
            ║  {:<64} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format!("{:?}", e)
        );
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("blaster_config.rs")).unwrap();
    f.write_all(render_config(&config).as_bytes()).unwrap();

    println!("cargo:warning=blaster.toml validated successfully");
}

/// Render the validated configuration as Rust source
fn render_config(config: &FireConfig) -> String {
    let modes = config
        .burst_modes
        .iter()
        .map(|mode| match mode {
            ShotCount::Finite(n) => format!("ShotCount::Finite({})", n),
            ShotCount::Unbounded => "ShotCount::Unbounded".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    let chamber_clear = match config.chamber_clear {
        ChamberClearRule::BothClear => "ChamberClearRule::BothClear",
        ChamberClearRule::EitherClear => "ChamberClearRule::EitherClear",
    };

    format!(
        "// Generated by build.rs from blaster.toml\n\
         pub const DEBOUNCE_MS: u32 = {};\n\
         pub const SPOOL_MS: u32 = {};\n\
         pub const MIN_RUN_MS: u32 = {};\n\
         pub const BURST_MODES: &[ShotCount] = &[{}];\n\
         pub const INITIAL_MODE: u8 = {};\n\
         pub const CHAMBER_CLEAR: ChamberClearRule = {};\n",
        config.timing.debounce_ms,
        config.timing.spool_ms,
        config.timing.min_run_ms,
        modes,
        config.initial_mode,
        chamber_clear,
    )
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
