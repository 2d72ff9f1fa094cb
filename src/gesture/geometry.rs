//! Angle and distance primitives. Angles are degrees.

use libm::{atan2f, sqrtf};

/// Heading of `(dx, dy)` in `(-180, 180]`, 0° along +x.
pub fn angle_deg(dx: f32, dy: f32) -> f32 {
    atan2f(dy, dx).to_degrees()
}

pub fn distance(dx: f32, dy: f32) -> f32 {
    sqrtf(dx * dx + dy * dy)
}

/// Wraps into `[0, 360)`. Non-finite input maps to 0.
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle % 360.0;
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
    // -1e-6 % 360 + 360 rounds up to exactly 360.0 in f32.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest rotation from `from` to `to`, in `(-180, 180]`.
pub fn angle_difference(from: f32, to: f32) -> f32 {
    let diff = normalize_angle(to - from);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}
