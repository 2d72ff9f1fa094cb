use super::types::{DetectedGesture, Direction, GestureKind};
use crate::config::GestureConfig;

/// Everything the release-time classification needs from one contact.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContactSummary {
    pub grid_position: u8,
    pub duration_us: u32,
    pub max_distance: f32,
    /// Heading of the farthest point from the start.
    pub max_angle: f32,
    pub swipe_returned: bool,
    pub outward_angle: f32,
    pub circle_closed: bool,
    pub cumulative_angle: f32,
}

impl ContactSummary {
    fn gesture(&self, kind: GestureKind, direction: Direction) -> DetectedGesture {
        DetectedGesture::new(kind, direction, self.grid_position)
    }
}

pub struct ClassificationRule {
    pub name: &'static str,
    pub predicate: fn(&ContactSummary, &GestureConfig) -> bool,
    pub build: fn(&ContactSummary) -> DetectedGesture,
}

/// Evaluated in order; the first matching rule wins.
pub const CLASSIFICATION_RULES: [ClassificationRule; 6] = [
    ClassificationRule {
        name: "swipe_return",
        predicate: |s, _| s.swipe_returned,
        build: |s| {
            s.gesture(
                GestureKind::SwipeReturn,
                Direction::from_angle(s.outward_angle),
            )
        },
    },
    ClassificationRule {
        name: "circle",
        // A loop inside the tap radius is still a press.
        predicate: |s, c| s.circle_closed && s.max_distance >= c.swipe.min_distance,
        build: |s| {
            let kind = if s.cumulative_angle < 0.0 {
                GestureKind::CircleCW
            } else {
                GestureKind::CircleCCW
            };
            s.gesture(kind, Direction::Center)
        },
    },
    ClassificationRule {
        name: "long_swipe",
        predicate: |s, c| s.max_distance >= c.swipe.long_distance,
        build: |s| s.gesture(GestureKind::SwipeLong, Direction::from_angle(s.max_angle)),
    },
    ClassificationRule {
        name: "hold",
        predicate: |s, c| {
            s.duration_us >= c.hold.min_duration_us && s.max_distance < c.swipe.min_distance
        },
        build: |s| s.gesture(GestureKind::Hold, Direction::Center),
    },
    ClassificationRule {
        name: "short_swipe",
        predicate: |s, c| {
            s.max_distance >= c.swipe.min_distance && s.max_distance < c.swipe.long_distance
        },
        build: |s| s.gesture(GestureKind::SwipeShort, Direction::from_angle(s.max_angle)),
    },
    ClassificationRule {
        name: "tap",
        predicate: |s, c| {
            s.max_distance < c.swipe.min_distance && s.duration_us < c.hold.min_duration_us
        },
        build: |s| s.gesture(GestureKind::Tap, Direction::Center),
    },
];

pub fn classify(summary: &ContactSummary, config: &GestureConfig) -> DetectedGesture {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.predicate)(summary, config))
        .map(|rule| {
            log::trace!("classification rule matched: {}", rule.name);
            (rule.build)(summary)
        })
        .unwrap_or(DetectedGesture {
            grid_position: summary.grid_position,
            ..DetectedGesture::NONE
        })
}
