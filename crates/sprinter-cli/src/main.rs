//! `sprinter-cli` – headless driver for the open-loop gait generator.
//!
//! The binary:
//!
//! 1. Loads `sprinter.toml` (or `$SPRINTER_CONFIG`), applying `SPRINTER_*`
//!    environment overrides; falls back to defaults when the file is absent.
//! 2. Wires the gait [`ControlLoop`] to a simulated clock and a fully
//!    populated simulated joint registry.
//! 3. Runs until the configured duration elapses or **Ctrl-C** is pressed,
//!    then prints the run summary and the final joint setpoints.
//!
//! Subcommands: `init` writes a default config file, `presets` lists the
//! built-in tunings.

mod config;

use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use sprinter_gait::{ControlLoop, GaitPreset, RunSummary, StopReason};
use sprinter_hal::sim::{SimClock, SimRegistry};
use sprinter_types::SprinterError;

fn main() -> ExitCode {
    // ── Structured logging ────────────────────────────────────────────────
    // RUST_LOG selects the filter (default "info"); SPRINTER_LOG_FORMAT=json
    // switches to newline-delimited JSON.  User-facing output uses println!.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if std::env::var("SPRINTER_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .compact()
            .init();
    }

    print_banner();

    match std::env::args().nth(1).as_deref() {
        Some("init") => return write_default_config(),
        Some("presets") => {
            print_presets();
            return ExitCode::SUCCESS;
        }
        Some(other) => {
            println!("{}: unknown command '{}'", "Error".red(), other);
            println!("  Usage: sprinter [init | presets]");
            return ExitCode::FAILURE;
        }
        None => {}
    }

    let cfg = match config::load() {
        Ok(Some(cfg)) => {
            println!(
                "  Config loaded from {}",
                config::config_path().display().to_string().bold()
            );
            cfg
        }
        Ok(None) => {
            println!(
                "  No config at {}; using defaults.",
                config::config_path().display().to_string().dimmed()
            );
            let mut cfg = config::Config::default();
            config::apply_env_overrides(&mut cfg);
            cfg
        }
        Err(e) => {
            println!("{}: {}", "Config error".red(), e);
            return ExitCode::FAILURE;
        }
    };

    match run(&cfg) {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("\n{}: {}", "Gait aborted".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Run
// ─────────────────────────────────────────────────────────────────────────────

fn run(cfg: &config::Config) -> Result<RunSummary, SprinterError> {
    cfg.validate()?;
    let params = cfg.gait_parameters();

    // ── Ctrl-C handler ────────────────────────────────────────────────────
    // The handler only raises the flag; the simulated clock reports it as
    // end of simulation on its next tick.
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        println!();
        println!("{}", "⚠  Ctrl-C received – stopping gait …".yellow().bold());
        shutdown_clone.store(true, Ordering::SeqCst);
    }) {
        warn!(error = %e, "Failed to install Ctrl-C handler; run will stop only at its duration");
    }

    let mut clock = SimClock::new(cfg.timestep_ms)?.with_shutdown(shutdown);
    if cfg.duration_s > 0.0 {
        clock = clock.with_duration(cfg.duration_s);
    }

    let registry = SimRegistry::new().with_all_joints().build();
    registry.ensure_complete()?;

    println!();
    println!("  Direction:   {}", cfg.direction.to_string().bold());
    match cfg.gait {
        Some(_) => println!("  Tuning:      {}", "custom [gait] table".bold()),
        None => println!("  Tuning:      {}", cfg.preset.to_string().bold()),
    }
    println!(
        "  Parameters:  f={} height={} shift_y={} step_height={} step_length={} arm_swing={}",
        params.frequency,
        params.robot_height,
        params.shift_y,
        params.step_height,
        params.step_length,
        params.arm_swing
    );
    println!("  Timestep:    {} ms", cfg.timestep_ms);
    if cfg.duration_s > 0.0 {
        println!("  Duration:    {} s", cfg.duration_s);
    } else {
        println!("  Duration:    {}", "until Ctrl-C".dimmed());
    }
    println!();

    let mut gait = ControlLoop::new(clock, registry, cfg.direction, params)?;
    let summary = gait.run()?;

    let (_, registry) = gait.into_parts();
    println!("  {:<16} {:>10}", "Joint", "rad");
    println!("  {}", "-".repeat(27));
    for (joint, position) in registry.positions() {
        println!("  {:<16} {:>10.4}", joint.name(), position);
    }
    Ok(summary)
}

// ─────────────────────────────────────────────────────────────────────────────
// Subcommands
// ─────────────────────────────────────────────────────────────────────────────

fn write_default_config() -> ExitCode {
    let path = config::config_path();
    if path.exists() {
        println!(
            "  {} already exists; leaving it untouched.",
            path.display().to_string().bold()
        );
        return ExitCode::SUCCESS;
    }
    match config::save_to(&config::Config::default(), &path) {
        Ok(()) => {
            info!(path = %path.display(), "default config written");
            println!(
                "  {} Config saved to {}",
                "✓".green().bold(),
                path.display().to_string().bold()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}: {}", "Error saving config".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn print_presets() {
    println!(
        "  {:<16} {:>5} {:>7} {:>8} {:>12} {:>12} {:>10}",
        "preset", "f", "height", "shift_y", "step_height", "step_length", "arm_swing"
    );
    for preset in GaitPreset::ALL {
        let p = preset.params();
        let name = if preset == GaitPreset::default() {
            format!("{} *", preset)
        } else {
            preset.to_string()
        };
        println!(
            "  {:<16} {:>5} {:>7} {:>8} {:>12} {:>12} {:>10}",
            name, p.frequency, p.robot_height, p.shift_y, p.step_height, p.step_length, p.arm_swing
        );
    }
    println!("\n  * default");
}

// ─────────────────────────────────────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────────────────────────────────────

fn print_summary(summary: &RunSummary) {
    println!();
    match &summary.stop_reason {
        StopReason::Terminated => println!("  {} Gait finished.", "✓".green().bold()),
        StopReason::ClockFault(msg) => {
            println!("  {} Tick source failed: {}", "⚠".yellow().bold(), msg)
        }
    }
    println!(
        "  {} ticks, {:.2} s simulated",
        summary.ticks.to_string().bold(),
        summary.elapsed
    );
}

fn print_banner() {
    println!();
    println!("  {} {}",
        "Sprinter".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("  Open-loop bipedal gait generator");
    println!();
}
