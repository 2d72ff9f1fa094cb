use libm::fabsf;

use super::{
    geometry::{angle_deg, angle_difference, distance},
    types::PathPoint,
};
use crate::config::SwipeReturnConfig;

/// Watches for an outward stroke that comes back toward its origin.
///
/// Arming captures the outward heading once the contact has travelled far
/// enough. The per-sample reversal flag is diagnostic only: the decision is
/// made at release by [`SwipeReturnTracker::is_return`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SwipeReturnTracker {
    armed: bool,
    outward_angle: f32,
    reversing: bool,
}

impl SwipeReturnTracker {
    pub const fn new() -> Self {
        Self {
            armed: false,
            outward_angle: 0.0,
            reversing: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn update(
        &mut self,
        max_distance: f32,
        max_angle: f32,
        max_point: PathPoint,
        current: PathPoint,
        config: &SwipeReturnConfig,
    ) {
        if !self.armed {
            if max_distance > config.min_distance {
                self.armed = true;
                self.outward_angle = max_angle;
                log::trace!(
                    "swipe-return armed distance={} angle={}",
                    max_distance,
                    max_angle
                );
            }
            return;
        }

        let dx = current.x - max_point.x;
        let dy = current.y - max_point.y;
        let back = distance(dx, dy);
        let reversing = back >= config.min_return_distance && {
            let expected = self.outward_angle + 180.0;
            fabsf(angle_difference(expected, angle_deg(dx, dy))) <= config.angle_tolerance_deg
        };

        if reversing != self.reversing {
            log::trace!("swipe-return reversing={} back={}", reversing, back);
            self.reversing = reversing;
        }
    }

    /// Release-time check: armed, far enough out, and back within half the
    /// peak distance of the start.
    pub fn is_return(
        &self,
        start: PathPoint,
        end: PathPoint,
        max_distance: f32,
        config: &SwipeReturnConfig,
    ) -> bool {
        if !self.armed || max_distance < config.min_distance {
            return false;
        }
        distance(end.x - start.x, end.y - start.y) < max_distance * 0.5
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_reversing(&self) -> bool {
        self.reversing
    }

    pub fn outward_angle(&self) -> f32 {
        self.outward_angle
    }
}
