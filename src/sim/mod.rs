//! Deterministic simulation module
//!
//! Everything that advances the lander lives here. This module must stay pure
//! and deterministic:
//! - One call per tick, no internal clock
//! - Seeded RNG only, injected by the caller
//! - No rendering or platform dependencies

pub mod geometry;
pub mod physics;
pub mod terrain;
pub mod tick;
pub mod vehicle;

pub use geometry::{Collision, is_overlap, segment_intersection};
pub use physics::{Physics, bounce, mirror};
pub use terrain::{Terrain, midpoint, seeded_source, uniform_source};
pub use tick::{Session, TickInput, TickOutcome, tick};
pub use vehicle::{EngineState, RotationDirection, Vehicle};
