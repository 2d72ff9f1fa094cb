use core::fmt;

/// One reading from the touch surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    pub x: f32,
    pub y: f32,
    /// Contact pressure proxy.
    pub z: f32,
    /// Monotonic microseconds.
    pub timestamp: u32,
}

impl Sample {
    pub const fn new(x: f32, y: f32, z: f32, timestamp: u32) -> Self {
        Self { x, y, z, timestamp }
    }

    pub const fn point(&self) -> PathPoint {
        PathPoint {
            x: self.x,
            y: self.y,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PathPoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureKind {
    #[default]
    None,
    Tap,
    Hold,
    SwipeShort,
    SwipeLong,
    SwipeReturn,
    CircleCW,
    CircleCCW,
}

impl GestureKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Tap => "tap",
            Self::Hold => "hold",
            Self::SwipeShort => "swipe_short",
            Self::SwipeLong => "swipe_long",
            Self::SwipeReturn => "swipe_return",
            Self::CircleCW => "circle_cw",
            Self::CircleCCW => "circle_ccw",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        [
            Self::None,
            Self::Tap,
            Self::Hold,
            Self::SwipeShort,
            Self::SwipeLong,
            Self::SwipeReturn,
            Self::CircleCW,
            Self::CircleCCW,
        ]
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(token))
    }
}

/// Compass direction in the device frame: 0° points South, 90° East.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Center,
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::N => "n",
            Self::NE => "ne",
            Self::E => "e",
            Self::SE => "se",
            Self::S => "s",
            Self::SW => "sw",
            Self::W => "w",
            Self::NW => "nw",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Center => "",
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        [
            Self::Center,
            Self::N,
            Self::NE,
            Self::E,
            Self::SE,
            Self::S,
            Self::SW,
            Self::W,
            Self::NW,
        ]
        .into_iter()
        .find(|dir| dir.as_str().eq_ignore_ascii_case(token))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DetectedGesture {
    pub kind: GestureKind,
    pub direction: Direction,
    /// Logical 3×3 cell in `[0, 8]`.
    pub grid_position: u8,
}

impl DetectedGesture {
    pub const NONE: Self = Self {
        kind: GestureKind::None,
        direction: Direction::Center,
        grid_position: 0,
    };

    pub const fn new(kind: GestureKind, direction: Direction, grid_position: u8) -> Self {
        Self {
            kind,
            direction,
            grid_position,
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self.kind, GestureKind::None)
    }
}

impl fmt::Display for DetectedGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = self.direction.label();
        match self.kind {
            GestureKind::None => f.write_str("None"),
            GestureKind::Tap => f.write_str("Tap"),
            GestureKind::Hold => f.write_str("Hold"),
            GestureKind::SwipeShort => write!(f, "{dir} Swipe"),
            GestureKind::SwipeLong => write!(f, "{dir} Long Swipe"),
            GestureKind::SwipeReturn => write!(f, "{dir} Return Swipe"),
            GestureKind::CircleCW => f.write_str("CW Circle"),
            GestureKind::CircleCCW => f.write_str("CCW Circle"),
        }
    }
}
