//! Polygon vs polyline overlap
//!
//! The vehicle hull is a closed polygon, the ground an open polyline. An
//! overlap is reported per crossing edge pair so the physics engine can pick
//! the wall it hit.

use glam::Vec2;

/// Below this the two segments are treated as parallel
const PARALLEL_EPSILON: f32 = 1e-9;

/// One crossing between a hull edge and a ground segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Start of the ground segment that was hit
    pub segment_start: Vec2,
    /// End of the ground segment that was hit
    pub segment_end: Vec2,
    /// Where the hull edge crosses it
    pub point: Vec2,
}

impl Collision {
    /// Direction of the ground segment (start to end)
    #[inline]
    pub fn wall(&self) -> Vec2 {
        self.segment_end - self.segment_start
    }
}

/// Intersection point of segments `a0..a1` and `b0..b1`, endpoints included.
///
/// Parallel and collinear segments never intersect.
pub fn segment_intersection(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2) -> Option<Vec2> {
    let r = a1 - a0;
    let s = b1 - b0;
    let denominator = r.perp_dot(s);

    if denominator.abs() < PARALLEL_EPSILON {
        return None;
    }

    let offset = b0 - a0;
    let t = offset.perp_dot(s) / denominator;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    let u = offset.perp_dot(r) / denominator;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(a0 + r * t)
}

/// Every crossing between the closed `polygon` and the open `polyline`.
///
/// Ordered by polyline segment, then by polygon edge, so the first record is
/// stable for a given input. Empty means no overlap.
pub fn is_overlap(polygon: &[Vec2], polyline: &[Vec2]) -> Vec<Collision> {
    let mut collisions = Vec::new();
    let edges = polygon_edges(polygon);

    for segment in polyline.windows(2) {
        let (start, end) = (segment[0], segment[1]);
        for &(a, b) in &edges {
            if let Some(point) = segment_intersection(a, b, start, end) {
                collisions.push(Collision {
                    segment_start: start,
                    segment_end: end,
                    point,
                });
            }
        }
    }

    collisions
}

/// Edges of a closed polygon. A two-point "polygon" is a single edge.
fn polygon_edges(polygon: &[Vec2]) -> Vec<(Vec2, Vec2)> {
    match polygon.len() {
        0 | 1 => Vec::new(),
        2 => vec![(polygon[0], polygon[1])],
        n => (0..n).map(|i| (polygon[i], polygon[(i + 1) % n])).collect(),
    }
}
