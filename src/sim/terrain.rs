//! Fractal ground generation
//!
//! Heights come from midpoint displacement over an injected random source.
//! Each pass inserts a displaced midpoint between every adjacent pair, so the
//! profile roughly doubles in resolution per pass.
//!
//! The displacement amplitude starts at 0.5 and *grows* by 10% per pass.
//! Canonical midpoint displacement shrinks it; the growing variant is what
//! gives the ground its jagged look and is kept as-is.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{
    MAX_TERRAIN_ITERATIONS, MAX_TERRAIN_POINTS, TERRAIN_DECAY_GROWTH, TERRAIN_DECAY_START,
};
use crate::error::{LanderError, Result};
use crate::settings::TerrainSettings;

/// Uniform `[0, 1)` samples from a seeded PCG stream
pub fn seeded_source(seed: u64) -> impl FnMut() -> f32 {
    let mut rng = Pcg32::seed_from_u64(seed);
    move || rng.random::<f32>()
}

/// Uniform `[0, 1)` samples borrowed from any RNG
pub fn uniform_source<R: Rng>(rng: &mut R) -> impl FnMut() -> f32 + '_ {
    move || rng.random::<f32>()
}

fn draw(source: &mut impl FnMut() -> f32) -> Result<f32> {
    let r = source();
    if (0.0..1.0).contains(&r) {
        Ok(r)
    } else {
        Err(LanderError::InvalidSample(r))
    }
}

/// Midpoint-displaced height profile.
///
/// Draws `num_start_points` seed heights, then runs `iterations` passes. The
/// result has `(num_start_points - 1) * 2^iterations + 1` values, none above
/// 1.0. There is no lower clamp.
pub fn midpoint(
    num_start_points: usize,
    iterations: u32,
    mut source: impl FnMut() -> f32,
) -> Result<Vec<f32>> {
    if num_start_points < 2 {
        return Err(LanderError::InvalidArgument(format!(
            "midpoint displacement needs at least 2 start points, got {num_start_points}"
        )));
    }
    if iterations > MAX_TERRAIN_ITERATIONS {
        return Err(LanderError::InvalidArgument(format!(
            "at most {MAX_TERRAIN_ITERATIONS} midpoint iterations supported, got {iterations}"
        )));
    }

    let total = (num_start_points - 1)
        .checked_mul(1usize << iterations)
        .and_then(|len| len.checked_add(1));
    if total.is_none_or(|len| len > MAX_TERRAIN_POINTS) {
        return Err(LanderError::InvalidArgument(format!(
            "{num_start_points} start points over {iterations} iterations exceeds \
             {MAX_TERRAIN_POINTS} heights"
        )));
    }

    let mut heights = Vec::with_capacity(num_start_points);
    for _ in 0..num_start_points {
        heights.push(draw(&mut source)?);
    }

    let mut decay = TERRAIN_DECAY_START;
    for _ in 0..iterations {
        let mut next = Vec::with_capacity(heights.len() * 2 - 1);
        next.push(heights[0]);
        for pair in heights.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            let displaced = (cur + prev) / 2.0 + (draw(&mut source)? - 0.5) * decay;
            next.push(displaced.min(1.0));
            next.push(cur);
        }
        heights = next;
        decay *= TERRAIN_DECAY_GROWTH;
    }

    Ok(heights)
}

/// Static ground polyline, built once per session
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    points: Vec<Vec2>,
}

impl Terrain {
    /// Generate the ground for a session from its settings
    pub fn generate(settings: &TerrainSettings) -> Result<Self> {
        let heights = midpoint(
            settings.start_points,
            settings.iterations,
            seeded_source(settings.seed),
        )?;
        let terrain = Self::from_heights(&heights, settings.width, settings.height_scale)?;
        log::debug!(
            "Terrain seed {}: {} points over width {}",
            settings.seed,
            terrain.points.len(),
            settings.width
        );
        Ok(terrain)
    }

    /// Spread `heights` evenly over `[0, width]`, scaling y by `height_scale`
    pub fn from_heights(heights: &[f32], width: f32, height_scale: f32) -> Result<Self> {
        if heights.len() < 2 {
            return Err(LanderError::InvalidArgument(format!(
                "terrain needs at least 2 heights, got {}",
                heights.len()
            )));
        }
        if !width.is_finite() || !height_scale.is_finite() || heights.iter().any(|h| !h.is_finite())
        {
            return Err(LanderError::NonFinite("terrain"));
        }

        let step = width / (heights.len() - 1) as f32;
        let points = heights
            .iter()
            .enumerate()
            .map(|(i, &h)| Vec2::new(i as f32 * step, h * height_scale))
            .collect();
        Ok(Self { points })
    }

    /// Use an existing polyline as the ground
    pub fn from_points(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Ground height below `x` (linear between points), `None` outside the span
    pub fn height_at(&self, x: f32) -> Option<f32> {
        self.points.windows(2).find_map(|seg| {
            let (a, b) = (seg[0], seg[1]);
            if x < a.x || x > b.x {
                return None;
            }
            let span = b.x - a.x;
            if span <= 0.0 {
                return Some(a.y.max(b.y));
            }
            Some(a.y + (b.y - a.y) * (x - a.x) / span)
        })
    }
}
