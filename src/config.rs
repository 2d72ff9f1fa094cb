use core::fmt;

use crate::{
    gesture::{Direction, GestureKind},
    keymap::{KeyAction, KeyBinding},
};

/// Pressure hysteresis band. A contact starts above `touch_threshold` and
/// ends below `release_threshold`.
#[derive(Clone, Copy, Debug)]
pub struct TouchConfig {
    pub touch_threshold: f32,
    pub release_threshold: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct SwipeConfig {
    pub min_distance: f32,
    pub long_distance: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct SwipeReturnConfig {
    /// Outward travel that arms the tracker.
    pub min_distance: f32,
    pub min_return_distance: f32,
    pub angle_tolerance_deg: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct HoldConfig {
    pub min_duration_us: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct CircleConfig {
    pub min_arc_deg: f32,
    /// Upper bound (exclusive) on the mean absolute radius deviation.
    pub max_radius_variance: f32,
    /// Mean distance of the path from its centroid needed to count as a loop.
    pub min_radius: f32,
    pub min_points: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct GridConfig {
    pub cell_width: f32,
    pub cell_height: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct GestureConfig {
    pub touch: TouchConfig,
    pub swipe: SwipeConfig,
    pub swipe_return: SwipeReturnConfig,
    pub hold: HoldConfig,
    pub circle: CircleConfig,
    pub grid: GridConfig,
}

include!(concat!(env!("OUT_DIR"), "/gesture_config.rs"));

static ACTIVE_CONFIG: GestureConfig = GESTURE_CONFIG;

pub fn active_config() -> &'static GestureConfig {
    &ACTIVE_CONFIG
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NonFinite,
    ReleaseNotBelowTouch,
    NonPositiveTouchThreshold,
    NonPositiveSwipeDistance,
    LongSwipeNotAboveShort,
    NonPositiveReturnDistance,
    AngleToleranceOutOfRange,
    ZeroHoldDuration,
    NonPositiveCircleArc,
    NonPositiveRadiusVariance,
    NonPositiveCircleRadius,
    ZeroCirclePoints,
    NonPositiveCellSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NonFinite => "all thresholds must be finite",
            Self::ReleaseNotBelowTouch => "release threshold must be below touch threshold",
            Self::NonPositiveTouchThreshold => "touch threshold must be positive",
            Self::NonPositiveSwipeDistance => "swipe distance must be positive",
            Self::LongSwipeNotAboveShort => "long swipe distance must exceed short swipe distance",
            Self::NonPositiveReturnDistance => "swipe-return distances must be positive",
            Self::AngleToleranceOutOfRange => "swipe-return angle tolerance must be in (0, 180]",
            Self::ZeroHoldDuration => "hold duration must be non-zero",
            Self::NonPositiveCircleArc => "circle arc must be positive",
            Self::NonPositiveRadiusVariance => "circle radius variance must be positive",
            Self::NonPositiveCircleRadius => "circle min radius must be positive",
            Self::ZeroCirclePoints => "circle min points must be at least 1",
            Self::NonPositiveCellSize => "grid cell dimensions must be positive",
        };
        f.write_str(msg)
    }
}

impl GestureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            self.touch.touch_threshold,
            self.touch.release_threshold,
            self.swipe.min_distance,
            self.swipe.long_distance,
            self.swipe_return.min_distance,
            self.swipe_return.min_return_distance,
            self.swipe_return.angle_tolerance_deg,
            self.circle.min_arc_deg,
            self.circle.max_radius_variance,
            self.circle.min_radius,
            self.grid.cell_width,
            self.grid.cell_height,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::NonFinite);
        }
        if self.touch.touch_threshold <= 0.0 {
            return Err(ConfigError::NonPositiveTouchThreshold);
        }
        if self.touch.release_threshold >= self.touch.touch_threshold {
            return Err(ConfigError::ReleaseNotBelowTouch);
        }
        if self.swipe.min_distance <= 0.0 {
            return Err(ConfigError::NonPositiveSwipeDistance);
        }
        if self.swipe.long_distance <= self.swipe.min_distance {
            return Err(ConfigError::LongSwipeNotAboveShort);
        }
        if self.swipe_return.min_distance <= 0.0 || self.swipe_return.min_return_distance <= 0.0 {
            return Err(ConfigError::NonPositiveReturnDistance);
        }
        let tolerance = self.swipe_return.angle_tolerance_deg;
        if tolerance <= 0.0 || tolerance > 180.0 {
            return Err(ConfigError::AngleToleranceOutOfRange);
        }
        if self.hold.min_duration_us == 0 {
            return Err(ConfigError::ZeroHoldDuration);
        }
        if self.circle.min_arc_deg <= 0.0 {
            return Err(ConfigError::NonPositiveCircleArc);
        }
        if self.circle.max_radius_variance <= 0.0 {
            return Err(ConfigError::NonPositiveRadiusVariance);
        }
        if self.circle.min_radius <= 0.0 {
            return Err(ConfigError::NonPositiveCircleRadius);
        }
        if self.circle.min_points == 0 {
            return Err(ConfigError::ZeroCirclePoints);
        }
        if self.grid.cell_width <= 0.0 || self.grid.cell_height <= 0.0 {
            return Err(ConfigError::NonPositiveCellSize);
        }
        Ok(())
    }
}
