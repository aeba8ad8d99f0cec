//! Headless lander run
//!
//! Drives a seeded session with a simple hover autopilot and logs where the
//! lander ends up. Configured through the environment:
//! - `LANDER_SETTINGS`: path to a JSON settings file
//! - `LANDER_PRESET`: difficulty preset, easy/normal/hard (overrides the
//!   settings file's physics)
//! - `LANDER_SEED`: terrain seed (overrides the settings file)
//! - `LANDER_TICKS`: number of ticks to run (default 1200)

use lander_core::{Preset, Settings};
use lander_core::sim::{EngineState, RotationDirection, Session, TickInput, Vehicle, tick};

const DEFAULT_TICKS: u64 = 1200;

/// Keep the nose up and the descent slow
fn autopilot(vehicle: &Vehicle) -> TickInput {
    // Heading x is negative when tilted counter-clockwise, at any number of turns
    let heading = vehicle.heading();
    let rotation = if heading.x < -0.05 || heading.y < 0.0 {
        RotationDirection::Clockwise
    } else if heading.x > 0.05 {
        RotationDirection::CounterClockwise
    } else {
        RotationDirection::Off
    };
    let engine = if vehicle.velocity.y < -1.0 {
        EngineState::Full
    } else if vehicle.velocity.y < -0.4 {
        EngineState::Half
    } else {
        EngineState::Off
    };
    TickInput { engine, rotation }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {name}={raw}: not a valid value");
            None
        }
    }
}

fn main() -> lander_core::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut settings = match std::env::var("LANDER_SETTINGS") {
        Ok(path) => Settings::load(path)?,
        Err(_) => Settings::default(),
    };
    if let Ok(name) = std::env::var("LANDER_PRESET") {
        match Preset::from_name(&name) {
            Some(preset) => {
                settings.preset = preset;
                settings.physics.apply_preset(preset);
            }
            None => log::warn!("Ignoring LANDER_PRESET={name}: expected easy, normal or hard"),
        }
    }
    if let Some(seed) = env_parse::<u64>("LANDER_SEED") {
        settings.terrain.seed = seed;
    }
    let ticks = env_parse::<u64>("LANDER_TICKS").unwrap_or(DEFAULT_TICKS);

    let mut session = Session::new(&settings)?;
    let spawn_x = session.vehicle.position.x;
    if let Some(ground) = session.physics()?.ground().height_at(spawn_x) {
        log::info!("Ground below spawn at y={ground:.1}");
    }

    let mut rest_ticks = 0u64;
    for _ in 0..ticks {
        let input = autopilot(&session.vehicle);
        let outcome = tick(&mut session, &input)?;
        if outcome.resting {
            rest_ticks += 1;
        }
    }

    let v = &session.vehicle;
    log::info!(
        "After {} ticks: position ({:.1}, {:.1}), velocity ({:.3}, {:.3}), angle {:.3}",
        session.time_ticks,
        v.position.x,
        v.position.y,
        v.velocity.x,
        v.velocity.y,
        v.angle
    );
    log::info!(
        "{} ticks in contact with the ground, {} at rest",
        session.contact_ticks,
        rest_ticks
    );
    Ok(())
}
