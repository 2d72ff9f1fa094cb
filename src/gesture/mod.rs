pub mod circle;
pub mod detector;
pub mod geometry;
pub mod path;
pub mod position;
pub mod rules;
pub mod swipe_return;
pub mod types;

pub use detector::{DetectorPhase, DetectorTrace, GestureDetector};
pub use position::grid_position;
pub use rules::{classify, ClassificationRule, ContactSummary, CLASSIFICATION_RULES};
pub use types::{DetectedGesture, Direction, GestureKind, PathPoint, Sample};
