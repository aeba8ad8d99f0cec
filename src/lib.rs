//! Lander Core - physics and terrain for a 2D lander game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, geometry, vehicle, physics, tick)
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Precondition failures

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{LanderError, Result};
pub use settings::{PhysicsSettings, Preset, Settings, TerrainSettings, VehicleSettings};

/// Simulation constants. Rates and speeds are per tick.
pub mod consts {
    use glam::Vec2;

    /// Rotation speed cap (radians/tick)
    pub const MAX_ROTATION_SPEED: f32 = 0.2;
    /// Rotation speed lost per tick with rotation control off
    pub const ROTATION_DAMPING: f32 = 0.0001;
    /// Rotation speed gained per tick with rotation control on
    pub const ROTATION_ACCELERATION: f32 = 0.002;
    /// Tangential velocity kept on impact
    pub const FRICTION: f32 = 0.3;
    /// Normal velocity bounced back on impact
    pub const RESTITUTION: f32 = 0.7;
    pub const GRAVITY: f32 = 0.02;
    /// Thrust fraction with the engine at half
    pub const HALF_THROTTLE: f32 = 0.6;
    /// Below this speed a collision brings the vehicle to rest
    pub const REST_SPEED: f32 = 0.2;
    /// Upward nudge out of the ground after a collision
    pub const LIFT_CORRECTION: f32 = 0.3;
    /// Rotation impulse per unit of post-impact speed
    pub const IMPACT_SPIN: f32 = 0.03;

    /// Terrain defaults
    pub const TERRAIN_START_POINTS: usize = 8;
    pub const TERRAIN_ITERATIONS: u32 = 5;
    pub const TERRAIN_WIDTH: f32 = 800.0;
    pub const TERRAIN_HEIGHT_SCALE: f32 = 200.0;
    /// Initial midpoint displacement amplitude
    pub const TERRAIN_DECAY_START: f32 = 0.5;
    /// Per-pass amplitude multiplier (grows, not shrinks)
    pub const TERRAIN_DECAY_GROWTH: f32 = 1.1;
    /// Passes beyond this would need more points than fit in memory
    pub const MAX_TERRAIN_ITERATIONS: u32 = 20;
    /// Upper bound on generated heights, whatever the start point count
    pub const MAX_TERRAIN_POINTS: usize = 1 << 24;

    /// Vehicle defaults
    pub const SPAWN_POSITION: Vec2 = Vec2::new(400.0, 500.0);
    pub const THRUST: f32 = 0.05;
}
