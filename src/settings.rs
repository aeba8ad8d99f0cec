//! Simulation settings
//!
//! Tuning constants for the physics engine, terrain generation parameters and
//! the vehicle spawn. Loaded from JSON by the host; every field falls back to
//! the defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{LanderError, Result};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Easy => "Easy",
            Preset::Normal => "Normal",
            Preset::Hard => "Hard",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Preset::Easy),
            "normal" | "norm" => Some(Preset::Normal),
            "hard" => Some(Preset::Hard),
            _ => None,
        }
    }

    /// Gravity multiplier (1.0 = default)
    pub fn gravity_scale(&self) -> f32 {
        match self {
            Preset::Easy => 0.75,
            Preset::Normal => 1.0,
            Preset::Hard => 1.25,
        }
    }

    /// Restitution multiplier; harder presets bounce harder
    pub fn restitution_scale(&self) -> f32 {
        match self {
            Preset::Easy => 0.8,
            Preset::Normal => 1.0,
            Preset::Hard => 1.2,
        }
    }
}

/// Physics engine tuning constants. All rates are per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Rotation speed cap (radians/tick, symmetric)
    pub max_rotation_speed: f32,
    /// Decay applied to rotation speed while rotation control is off
    pub rotation_damping: f32,
    /// Rotation speed gained per tick while rotating
    pub rotation_acceleration: f32,
    /// Tangential velocity retained after a bounce
    pub friction: f32,
    /// Normal velocity bounced back after a bounce
    pub restitution: f32,
    /// Downward acceleration
    pub gravity: f32,
    /// Thrust fraction at half throttle
    pub half_throttle: f32,
    /// Post-collision speed below which the vehicle is brought to rest
    pub rest_speed: f32,
    /// Upward nudge applied after a collision
    pub lift_correction: f32,
    /// Rotation impulse per unit of post-collision speed
    pub impact_spin: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            max_rotation_speed: MAX_ROTATION_SPEED,
            rotation_damping: ROTATION_DAMPING,
            rotation_acceleration: ROTATION_ACCELERATION,
            friction: FRICTION,
            restitution: RESTITUTION,
            gravity: GRAVITY,
            half_throttle: HALF_THROTTLE,
            rest_speed: REST_SPEED,
            lift_correction: LIFT_CORRECTION,
            impact_spin: IMPACT_SPIN,
        }
    }
}

impl PhysicsSettings {
    /// Physics constants scaled by a difficulty preset
    pub fn from_preset(preset: Preset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        self.gravity = GRAVITY * preset.gravity_scale();
        self.restitution = RESTITUTION * preset.restitution_scale();
    }

    /// Every constant must be finite and non-negative
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("max_rotation_speed", self.max_rotation_speed),
            ("rotation_damping", self.rotation_damping),
            ("rotation_acceleration", self.rotation_acceleration),
            ("friction", self.friction),
            ("restitution", self.restitution),
            ("gravity", self.gravity),
            ("half_throttle", self.half_throttle),
            ("rest_speed", self.rest_speed),
            ("lift_correction", self.lift_correction),
            ("impact_spin", self.impact_spin),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(LanderError::NonFinite(name));
            }
            if value < 0.0 {
                return Err(LanderError::InvalidArgument(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Terrain generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Seed for the terrain RNG
    pub seed: u64,
    /// Number of random control heights before subdivision
    pub start_points: usize,
    /// Midpoint displacement passes
    pub iterations: u32,
    /// Horizontal extent of the ground polyline
    pub width: f32,
    /// Height of a normalized sample of 1.0
    pub height_scale: f32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            start_points: TERRAIN_START_POINTS,
            iterations: TERRAIN_ITERATIONS,
            width: TERRAIN_WIDTH,
            height_scale: TERRAIN_HEIGHT_SCALE,
        }
    }
}

/// Vehicle spawn parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleSettings {
    /// Spawn position
    pub spawn: Vec2,
    /// Full-throttle velocity change per tick
    pub thrust: f32,
}

impl Default for VehicleSettings {
    fn default() -> Self {
        Self {
            spawn: SPAWN_POSITION,
            thrust: THRUST,
        }
    }
}

/// Full session configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub preset: Preset,
    pub physics: PhysicsSettings,
    pub terrain: TerrainSettings,
    pub vehicle: VehicleSettings,
}

impl Settings {
    /// Create settings from a difficulty preset (applies preset physics)
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            physics: PhysicsSettings::from_preset(preset),
            ..Self::default()
        }
    }

    /// Parse settings from JSON. Missing fields take their defaults.
    ///
    /// Without a `physics` block the physics come from `preset`; an explicit
    /// block is taken as written.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let has_physics = value.get("physics").is_some();
        let mut settings: Settings = serde_json::from_value(value)?;
        if !has_physics {
            settings.physics.apply_preset(settings.preset);
        }
        settings.validate()?;
        log::debug!("Loaded settings (preset {})", settings.preset.as_str());
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.physics.validate()?;

        if self.terrain.start_points < 2 {
            return Err(LanderError::InvalidArgument(format!(
                "terrain needs at least 2 start points, got {}",
                self.terrain.start_points
            )));
        }
        if !self.terrain.width.is_finite() || !self.terrain.height_scale.is_finite() {
            return Err(LanderError::NonFinite("terrain"));
        }
        if !self.vehicle.spawn.is_finite() || !self.vehicle.thrust.is_finite() {
            return Err(LanderError::NonFinite("vehicle"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let settings = Settings::default();
        assert_eq!(settings.preset, Preset::Normal);
        assert_eq!(settings.physics.friction, 0.3);
        assert_eq!(settings.physics.restitution, 0.7);
        assert_eq!(settings.physics.gravity, 0.02);
        assert_eq!(settings.physics.max_rotation_speed, 0.2);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let json = r#"{ "physics": { "gravity": 0.05 }, "terrain": { "seed": 7 } }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.physics.gravity, 0.05);
        // Untouched fields keep their defaults
        assert_eq!(settings.physics.friction, FRICTION);
        assert_eq!(settings.terrain.seed, 7);
        assert_eq!(settings.terrain.start_points, TERRAIN_START_POINTS);
    }

    #[test]
    fn test_from_json_preset_sets_physics() {
        let settings = Settings::from_json(r#"{ "preset": "hard" }"#).unwrap();
        assert_eq!(settings.preset, Preset::Hard);
        assert_eq!(settings.physics, PhysicsSettings::from_preset(Preset::Hard));

        // An explicit physics block wins over the preset
        let json = r#"{ "preset": "easy", "physics": { "gravity": 0.05 } }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.preset, Preset::Easy);
        assert_eq!(settings.physics.gravity, 0.05);
        assert_eq!(settings.physics.restitution, RESTITUTION);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings::from_preset(Preset::Hard);
        let json = settings.to_json().unwrap();
        let parsed = Settings::from_json(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(LanderError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Settings::load("/nonexistent/lander-settings.json"),
            Err(LanderError::Io(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.physics.gravity = f32::NAN;
        assert!(matches!(
            settings.validate(),
            Err(LanderError::NonFinite("gravity"))
        ));

        let mut settings = Settings::default();
        settings.physics.friction = -0.1;
        assert!(matches!(
            settings.validate(),
            Err(LanderError::InvalidArgument(_))
        ));

        let mut settings = Settings::default();
        settings.terrain.start_points = 1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_preset_scaling() {
        let easy = PhysicsSettings::from_preset(Preset::Easy);
        let hard = PhysicsSettings::from_preset(Preset::Hard);
        assert!(easy.gravity < GRAVITY);
        assert!(hard.gravity > GRAVITY);
        assert!(hard.restitution > easy.restitution);
        assert_eq!(Preset::from_name("HARD"), Some(Preset::Hard));
        assert_eq!(Preset::from_name("ludicrous"), None);
    }
}
