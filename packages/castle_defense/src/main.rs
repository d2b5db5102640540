#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Binary entry point for the castle defense simulation.
//!
//! This module is excluded from mutation testing because testing process entry/exit behavior
//! is impractical - it requires spawning subprocesses and checking exit codes.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use argh::FromArgs;
use castle_defense::{Result, Settings, Simulation};
use log::{error, info};

/// Runs a headless castle defense game whose castle and enemy spawner recycle their objects
/// through object pools.
#[derive(FromArgs)]
struct Args {
    /// path to a TOML settings file; built-in defaults are used if omitted
    #[argh(option)]
    config: Option<PathBuf>,

    /// seconds of game time to simulate, overriding the settings file
    #[argh(option)]
    seconds: Option<f32>,

    /// seed for enemy placement, overriding the settings file
    #[argh(option)]
    seed: Option<u64>,
}

// Binary entry point - mutations would require subprocess testing which is impractical.
#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg_attr(test, mutants::skip)]
fn run(args: &Args) -> Result<()> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if let Some(seconds) = args.seconds {
        settings.seconds = seconds;
    }

    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    let setup_started = Instant::now();
    let mut simulation = Simulation::new(&settings)?;
    info!(
        "pre-warmed pools in {:?}, game starting",
        setup_started.elapsed()
    );

    let run_started = Instant::now();
    let stats = simulation.run_for(settings.seconds)?;
    let run_duration = run_started.elapsed();

    let castle_pool = simulation.castle().pool();
    let enemy_pool = simulation.spawner().pool();

    println!("frames simulated:   {} in {run_duration:?}", stats.frames);
    println!("shots fired:        {}", stats.shots_fired);
    println!("enemies hit:        {}", stats.hits);
    println!("projectiles expired: {}", stats.expired);
    println!("enemies spawned:    {}", stats.enemies_spawned);
    println!(
        "projectile pool:    {} idle, {} in flight",
        castle_pool.count_inactive(),
        castle_pool.count_active()
    );
    println!(
        "enemy pool:         {} idle, {} on the field",
        enemy_pool.count_inactive(),
        enemy_pool.count_active()
    );

    Ok(())
}
