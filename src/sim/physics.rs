//! Lander physics
//!
//! Per-tick step functions over the vehicle state, called in this order:
//! rotate -> angle -> accelerate -> travel -> collide.
//!
//! Collisions are resolved discretely: after the move, the hull is tested
//! against the ground and the *first* crossing is bounced off. There is no
//! sub-stepping and no iterative resolution of multiple contacts.

use glam::Vec2;

use super::geometry::{Collision, is_overlap};
use super::terrain::Terrain;
use super::vehicle::{EngineState, RotationDirection, Vehicle};
use crate::error::Result;
use crate::settings::PhysicsSettings;

/// Velocity after bouncing off a surface running along `wall`.
///
/// Splits `velocity` into the part along the wall normal (`u`) and the rest
/// (`w`), then returns `w * friction - u * restitution`. With both
/// coefficients at 1 this is a lossless mirror reflection.
pub fn bounce(velocity: Vec2, wall: Vec2, friction: f32, restitution: f32) -> Vec2 {
    let normal = wall.perp();
    let normal_sq = normal.dot(normal);
    if normal_sq == 0.0 {
        // Degenerate wall, nothing to reflect off
        return velocity;
    }

    let u = normal * (velocity.dot(normal) / normal_sq);
    let w = velocity - u;
    w * friction - u * restitution
}

/// Lossless reflection off `wall`
#[inline]
pub fn mirror(velocity: Vec2, wall: Vec2) -> Vec2 {
    bounce(velocity, wall, 1.0, 1.0)
}

/// Physics engine: tuning constants plus the ground they act against
#[derive(Debug, Clone, Copy)]
pub struct Physics<'a> {
    settings: PhysicsSettings,
    ground: &'a Terrain,
}

impl<'a> Physics<'a> {
    pub fn new(settings: PhysicsSettings, ground: &'a Terrain) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings, ground })
    }

    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    pub fn ground(&self) -> &'a Terrain {
        self.ground
    }

    /// Bound `speed` to the rotation cap. NaN passes through.
    fn clamp_rotation(&self, speed: f32) -> f32 {
        let max = self.settings.max_rotation_speed;
        if speed > max {
            max
        } else if speed < -max {
            -max
        } else {
            speed
        }
    }

    /// Rotation speed after one tick of attitude control.
    ///
    /// Clockwise spins negative, counter-clockwise positive. With control off
    /// the speed is damped toward zero and settles there without overshooting.
    /// A non-finite speed is returned as-is for `step` to reject.
    pub fn rotate(&self, direction: RotationDirection, speed: f32) -> f32 {
        let accel = self.settings.rotation_acceleration;
        let damping = self.settings.rotation_damping;

        let next = match direction {
            RotationDirection::Clockwise => speed - accel,
            RotationDirection::CounterClockwise => speed + accel,
            RotationDirection::Off => {
                if speed > 0.0 {
                    (speed - damping).max(0.0)
                } else if speed < 0.0 {
                    (speed + damping).min(0.0)
                } else {
                    speed
                }
            }
        };
        self.clamp_rotation(next)
    }

    /// Facing angle after one tick. Not wrapped.
    #[inline]
    pub fn angle(&self, angle: f32, rotation_speed: f32) -> f32 {
        angle + rotation_speed
    }

    /// Velocity after one tick of engine thrust and gravity
    pub fn accelerate(&self, velocity: Vec2, thrust: f32, angle: f32, engine: EngineState) -> Vec2 {
        let mut next = velocity;
        let t = match engine {
            EngineState::Off => None,
            EngineState::Half => Some(thrust * self.settings.half_throttle),
            EngineState::Full => Some(thrust),
        };
        if let Some(t) = t {
            next.x += t * (-angle).sin();
            next.y += t * angle.cos();
        }
        next.y -= self.settings.gravity;
        next
    }

    /// Position after one tick at `velocity`
    #[inline]
    pub fn travel(&self, position: Vec2, velocity: Vec2) -> Vec2 {
        position + velocity
    }

    /// Resolve the vehicle against the ground.
    ///
    /// On overlap the first reported crossing is bounced off: velocity is
    /// reflected (and zeroed if nearly at rest), the vehicle is lifted out of
    /// the ground a little, and it picks up spin toward the side it hit.
    /// Returns the crossing that was resolved.
    pub fn collide(&self, vehicle: &mut Vehicle) -> Option<Collision> {
        let collisions = is_overlap(&vehicle.geometry(), self.ground.points());
        let hit = *collisions.first()?;

        let s = &self.settings;
        let mut velocity = bounce(vehicle.velocity, hit.wall(), s.friction, s.restitution);
        if velocity.length() < s.rest_speed {
            velocity = Vec2::ZERO;
        }
        vehicle.velocity = velocity;
        vehicle.position.y += s.lift_correction;

        let spin = s.impact_spin * velocity.length();
        let rotation_speed = if hit.point.x < vehicle.position.x {
            vehicle.rotation_speed - spin
        } else {
            vehicle.rotation_speed + spin
        };
        vehicle.rotation_speed = self.clamp_rotation(rotation_speed);

        log::trace!(
            "Contact at ({:.2}, {:.2}) of {} crossings, velocity now ({:.3}, {:.3})",
            hit.point.x,
            hit.point.y,
            collisions.len(),
            velocity.x,
            velocity.y
        );
        Some(hit)
    }

    /// Advance the vehicle by one full tick
    pub fn step(&self, vehicle: &mut Vehicle) -> Result<Option<Collision>> {
        vehicle.check_finite()?;

        vehicle.rotation_speed = self.rotate(vehicle.rotation, vehicle.rotation_speed);
        vehicle.angle = self.angle(vehicle.angle, vehicle.rotation_speed);
        vehicle.velocity = self.accelerate(
            vehicle.velocity,
            vehicle.thrust,
            vehicle.angle,
            vehicle.engine,
        );
        vehicle.position = self.travel(vehicle.position, vehicle.velocity);
        Ok(self.collide(vehicle))
    }
}
