//! Fixed-step simulation tick
//!
//! A session owns the ground and the lander. The host feeds one `TickInput`
//! per frame; the core never schedules anything itself.

use super::geometry::Collision;
use super::physics::Physics;
use super::terrain::Terrain;
use super::vehicle::{EngineState, RotationDirection, Vehicle};
use crate::error::Result;
use crate::settings::Settings;

/// Control inputs for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub engine: EngineState,
    pub rotation: RotationDirection,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickOutcome {
    /// Ground crossing resolved this tick, if any
    pub contact: Option<Collision>,
    /// Vehicle touched the ground and was brought to rest
    pub resting: bool,
}

/// One play session: static ground plus the lander moving over it
#[derive(Debug, Clone)]
pub struct Session {
    pub settings: Settings,
    terrain: Terrain,
    pub vehicle: Vehicle,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks that ended with a ground contact
    pub contact_ticks: u64,
}

impl Session {
    /// Start a session, generating the ground from the terrain settings
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let terrain = Terrain::generate(&settings.terrain)?;
        Ok(Self::spawn(settings, terrain))
    }

    /// Start a session over an existing ground polyline
    pub fn with_terrain(settings: &Settings, terrain: Terrain) -> Result<Self> {
        settings.validate()?;
        Ok(Self::spawn(settings, terrain))
    }

    /// Place the lander at the spawn point. Settings are already validated.
    fn spawn(settings: &Settings, terrain: Terrain) -> Self {
        let vehicle = Vehicle::new(settings.vehicle.spawn, settings.vehicle.thrust);
        log::info!(
            "Session start: seed {}, {} ground points, spawn ({}, {}), preset {}",
            settings.terrain.seed,
            terrain.points().len(),
            vehicle.position.x,
            vehicle.position.y,
            settings.preset.as_str()
        );
        Self {
            settings: settings.clone(),
            terrain,
            vehicle,
            time_ticks: 0,
            contact_ticks: 0,
        }
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Physics engine bound to this session's ground
    pub fn physics(&self) -> Result<Physics<'_>> {
        Physics::new(self.settings.physics, &self.terrain)
    }
}

/// Advance the session by one tick
pub fn tick(session: &mut Session, input: &TickInput) -> Result<TickOutcome> {
    let physics = Physics::new(session.settings.physics, &session.terrain)?;

    let vehicle = &mut session.vehicle;
    vehicle.engine = input.engine;
    vehicle.rotation = input.rotation;

    let contact = physics.step(vehicle)?;
    session.time_ticks += 1;

    let resting = contact.is_some() && vehicle.velocity == glam::Vec2::ZERO;
    if let Some(hit) = contact {
        session.contact_ticks += 1;
        log::trace!(
            "Tick {}: contact at x={:.2}{}",
            session.time_ticks,
            hit.point.x,
            if resting { " (at rest)" } else { "" }
        );
    }

    Ok(TickOutcome { contact, resting })
}
