//! Vehicle state
//!
//! The lander is the only moving body. The physics engine mutates it once per
//! tick; the host only writes the two control inputs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{LanderError, Result};

/// Main engine throttle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    #[default]
    Off,
    Half,
    Full,
}

/// Attitude thruster command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotationDirection {
    #[serde(rename = "cw")]
    Clockwise,
    #[serde(rename = "ccw")]
    CounterClockwise,
    #[default]
    #[serde(rename = "off")]
    Off,
}

/// Lander outline in local space (y up, origin at the center of mass)
pub fn default_hull() -> Vec<Vec2> {
    vec![
        Vec2::new(-6.0, 10.0),
        Vec2::new(-10.0, 2.0),
        Vec2::new(-12.0, -10.0),
        Vec2::new(12.0, -10.0),
        Vec2::new(10.0, 2.0),
        Vec2::new(6.0, 10.0),
    ]
}

/// The lander
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Signed rotation speed (radians/tick), bounded by the physics cap
    pub rotation_speed: f32,
    /// Facing angle (radians). Never wrapped.
    pub angle: f32,
    pub engine: EngineState,
    pub rotation: RotationDirection,
    /// Full-throttle velocity change per tick
    pub thrust: f32,
    /// Collision outline in local space
    hull: Vec<Vec2>,
}

impl Vehicle {
    /// A resting, upright lander with the default hull
    pub fn new(position: Vec2, thrust: f32) -> Self {
        Self::with_hull(position, thrust, default_hull())
    }

    pub fn with_hull(position: Vec2, thrust: f32, hull: Vec<Vec2>) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            rotation_speed: 0.0,
            angle: 0.0,
            engine: EngineState::Off,
            rotation: RotationDirection::Off,
            thrust,
            hull,
        }
    }

    pub fn hull(&self) -> &[Vec2] {
        &self.hull
    }

    /// World-space collision polygon for the current position and angle
    pub fn geometry(&self) -> Vec<Vec2> {
        let rotation = Vec2::from_angle(self.angle);
        self.hull
            .iter()
            .map(|&p| self.position + rotation.rotate(p))
            .collect()
    }

    /// Unit vector the main engine pushes along
    pub fn heading(&self) -> Vec2 {
        Vec2::new((-self.angle).sin(), self.angle.cos())
    }

    /// Fail fast on NaN/infinite state before it spreads into the terrain test
    pub fn check_finite(&self) -> Result<()> {
        if !self.position.is_finite() {
            return Err(LanderError::NonFinite("vehicle position"));
        }
        if !self.velocity.is_finite() {
            return Err(LanderError::NonFinite("vehicle velocity"));
        }
        if !self.rotation_speed.is_finite() {
            return Err(LanderError::NonFinite("vehicle rotation speed"));
        }
        if !self.angle.is_finite() {
            return Err(LanderError::NonFinite("vehicle angle"));
        }
        if !self.thrust.is_finite() {
            return Err(LanderError::NonFinite("vehicle thrust"));
        }
        if self.hull.iter().any(|p| !p.is_finite()) {
            return Err(LanderError::NonFinite("vehicle hull"));
        }
        Ok(())
    }
}
