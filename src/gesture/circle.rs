use libm::fabsf;

use super::{
    geometry::{angle_deg, angle_difference, distance},
    path::PathHistory,
    types::PathPoint,
};
use crate::config::CircleConfig;

const MIN_ANALYZED_POINTS: usize = 3;
/// Points closer than this to the centroid have no usable heading.
const MIN_RADIUS: f32 = 1e-3;

/// Accumulates the signed rotation of the trajectory around its running
/// centroid.
#[derive(Clone, Copy, Debug, Default)]
pub struct CircleAnalyzer {
    cumulative_angle: f32,
    point_count: u16,
}

impl CircleAnalyzer {
    pub const fn new() -> Self {
        Self {
            cumulative_angle: 0.0,
            point_count: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Call after the newest sample has been pushed to `path`.
    pub fn update<const N: usize>(&mut self, path: &PathHistory<N>) {
        if path.len() < MIN_ANALYZED_POINTS {
            return;
        }
        let (Some(center), Some(current), Some(previous)) =
            (path.centroid(), path.latest(), path.previous())
        else {
            return;
        };

        if let Some(delta) = swept_angle(center, previous, current) {
            self.cumulative_angle += delta;
        }
        self.point_count = self.point_count.saturating_add(1);
    }

    /// Positive is counter-clockwise.
    pub fn cumulative_angle(&self) -> f32 {
        self.cumulative_angle
    }

    pub fn point_count(&self) -> u16 {
        self.point_count
    }

    pub fn is_circle<const N: usize>(&self, path: &PathHistory<N>, config: &CircleConfig) -> bool {
        if self.point_count < config.min_points {
            return false;
        }
        if fabsf(self.cumulative_angle) < config.min_arc_deg {
            return false;
        }
        radius_stats(path).is_some_and(|stats| {
            stats.mean >= config.min_radius && stats.deviation < config.max_radius_variance
        })
    }
}

fn swept_angle(center: PathPoint, from: PathPoint, to: PathPoint) -> Option<f32> {
    let (fx, fy) = (from.x - center.x, from.y - center.y);
    let (tx, ty) = (to.x - center.x, to.y - center.y);
    if distance(fx, fy) < MIN_RADIUS || distance(tx, ty) < MIN_RADIUS {
        return None;
    }
    Some(angle_difference(angle_deg(fx, fy), angle_deg(tx, ty)))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusStats {
    /// Mean distance of the buffered points from their centroid.
    pub mean: f32,
    /// Mean absolute deviation of those distances from `mean`.
    pub deviation: f32,
}

pub fn radius_stats<const N: usize>(path: &PathHistory<N>) -> Option<RadiusStats> {
    if path.len() < MIN_ANALYZED_POINTS {
        return None;
    }
    let center = path.centroid()?;
    let points = path.points();
    let count = points.len() as f32;

    let radius = |p: &PathPoint| distance(p.x - center.x, p.y - center.y);
    let mean = points.iter().map(radius).sum::<f32>() / count;
    let deviation = points.iter().map(|p| fabsf(radius(p) - mean)).sum::<f32>() / count;
    Some(RadiusStats { mean, deviation })
}
