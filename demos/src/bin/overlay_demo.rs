//! Headless overlay demo.
//!
//! Three sprites share one base material. A hit flash (`BlendColor`) and a
//! bounded `Pulse` are layered on them while the scheduler drives the frame
//! loop; the shared variant cache keeps one material per keyword set.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use parking_lot::Mutex;

use glaze_core::material::ShaderMaterial;
use glaze_core::math::Color;
use glaze_core::value::{Argument, ValueTable};
use glaze_demos::HeadlessSprite;
use glaze_effects::effects::names;
use glaze_effects::{ConfigError, EffectEngine, EffectRegistry, EngineConfig};
use glaze_schedule::{Callback, CallbackScheduler, Phase};

/// Glaze overlay demo arguments.
#[derive(Parser, Debug)]
#[command(name = "overlay_demo", about = "Layer material effects on headless sprites")]
struct Args {
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Engine config file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig, ConfigError> {
    match path {
        Some(path) => EngineConfig::load(path),
        None => Ok(EngineConfig::default()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("Starting Glaze overlay demo");
    log::info!("Core version: {}", glaze_core::VERSION);
    log::info!("Demos version: {}", glaze_demos::VERSION);

    if let Err(err) = run(&args) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_ref())?;
    log::info!("Engine config: {config:?}");

    let scheduler = CallbackScheduler::new();
    let engine = Arc::new(Mutex::new(EffectEngine::<ShaderMaterial>::new(
        EffectRegistry::with_builtin_effects(),
        config,
    )));
    let driver = EffectEngine::attach(&engine, &scheduler);

    let base = Arc::new(ShaderMaterial::new("sprite").with_name("crate"));
    let mut sprites = vec![
        HeadlessSprite::new(1, "left", base.clone()),
        HeadlessSprite::new(2, "center", base.clone()),
        HeadlessSprite::new(3, "right", base.clone()),
    ];

    let flash = ValueTable::build([Argument::new(names::BLEND_COLOR, Color::RED)])?;
    let pulse = ValueTable::build([
        Argument::new(names::PULSE_COLOR, Color::rgb(1.0, 0.8, 0.2)),
        Argument::new(names::PERIOD, 12),
        Argument::new(names::FRAMES, 36),
    ])?;

    if let [left, center, right] = sprites.as_mut_slice() {
        let mut engine = engine.lock();
        engine.apply_effect("BlendColor", left, &flash);
        engine.apply_effect("Pulse", left, &pulse);
        // Opposite order, same variant.
        engine.apply_effect("Pulse", center, &pulse);
        engine.apply_effect("BlendColor", center, &flash);
        engine.apply_effect("Pulse", right, &pulse);
    }

    let summary_engine = engine.clone();
    scheduler.register(
        Phase::Shutdown,
        Callback::named("overlay_demo.summary", move || {
            let engine = summary_engine.lock();
            let stats = engine.cache().stats();
            log::info!(
                "{} tracked targets, {} cached variants ({} hits, {} misses)",
                engine.tracked_targets(),
                engine.cache().len(),
                stats.hits,
                stats.misses
            );
        }),
    );

    for frame in 0..args.frames {
        scheduler.fixed_update();
        scheduler.update();
        scheduler.late_update();

        if frame == args.frames / 2 {
            let mut engine = engine.lock();
            for sprite in sprites.iter_mut() {
                if engine.remove_effect("BlendColor", sprite) {
                    log::info!("frame {frame}: flash ended on {}", sprite.label());
                }
            }
        }

        if frame % 12 == 0 {
            for sprite in &sprites {
                log::info!("frame {frame}: {}", sprite.describe());
            }
        }
    }

    {
        let mut engine = engine.lock();
        for sprite in sprites.iter_mut() {
            engine.remove_all_effects(sprite);
            log::info!("final: {}", sprite.describe());
        }
    }

    scheduler.shutdown();
    EffectEngine::detach(&engine, &scheduler);
    log::info!("Driver {:?} detached", driver.name());
    Ok(())
}
