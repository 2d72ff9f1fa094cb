//! Compiles `config/gestures.toml` into the Rust constants the firmware
//! includes at build time.

use std::{collections::HashSet, fmt::Write as _, fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

pub const MAX_GRID_CELL: u8 = 8;
pub const MIN_PATH_HISTORY: usize = 3;
pub const MAX_PATH_HISTORY: usize = 255;

#[derive(Debug, Error)]
pub enum ConfigCompilerError {
    #[error("io error: {0}")]
    Io(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GestureFile {
    pub touch: TouchSection,
    pub swipe: SwipeSection,
    pub swipe_return: SwipeReturnSection,
    pub hold: HoldSection,
    pub circle: CircleSection,
    pub path: PathSection,
    pub grid: GridSection,
    #[serde(default)]
    pub keymap: Vec<KeymapEntry>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TouchSection {
    pub touch_threshold: f32,
    pub release_threshold: f32,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SwipeSection {
    pub min_distance: f32,
    pub long_distance: f32,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SwipeReturnSection {
    pub min_distance: f32,
    pub min_return_distance: f32,
    pub angle_tolerance_deg: f32,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HoldSection {
    pub min_duration_us: u32,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CircleSection {
    pub min_arc_deg: f32,
    pub max_radius_variance: f32,
    pub min_radius: f32,
    pub min_points: u16,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PathSection {
    pub history_size: usize,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GridSection {
    pub cell_width: f32,
    pub cell_height: f32,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KeymapEntry {
    pub cell: u8,
    pub gesture: GestureName,
    #[serde(default)]
    pub direction: DirectionName,
    pub action: ActionEntry,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GestureName {
    None,
    Tap,
    Hold,
    SwipeShort,
    SwipeLong,
    SwipeReturn,
    CircleCw,
    CircleCcw,
}

impl GestureName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Tap => "tap",
            Self::Hold => "hold",
            Self::SwipeShort => "swipe_short",
            Self::SwipeLong => "swipe_long",
            Self::SwipeReturn => "swipe_return",
            Self::CircleCw => "circle_cw",
            Self::CircleCcw => "circle_ccw",
        }
    }

    fn rust_path(self) -> &'static str {
        match self {
            Self::None => "GestureKind::None",
            Self::Tap => "GestureKind::Tap",
            Self::Hold => "GestureKind::Hold",
            Self::SwipeShort => "GestureKind::SwipeShort",
            Self::SwipeLong => "GestureKind::SwipeLong",
            Self::SwipeReturn => "GestureKind::SwipeReturn",
            Self::CircleCw => "GestureKind::CircleCW",
            Self::CircleCcw => "GestureKind::CircleCCW",
        }
    }

    pub fn is_directional(self) -> bool {
        matches!(self, Self::SwipeShort | Self::SwipeLong | Self::SwipeReturn)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DirectionName {
    #[default]
    Center,
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl DirectionName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }

    fn rust_path(self) -> &'static str {
        match self {
            Self::Center => "Direction::Center",
            Self::N => "Direction::N",
            Self::Ne => "Direction::NE",
            Self::E => "Direction::E",
            Self::Se => "Direction::SE",
            Self::S => "Direction::S",
            Self::Sw => "Direction::SW",
            Self::W => "Direction::W",
            Self::Nw => "Direction::NW",
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ActionEntry {
    Char(char),
    Text(String),
    Backspace,
    CapsLock,
}

impl ActionEntry {
    fn render(&self) -> String {
        match self {
            Self::Char(c) => format!("KeyAction::Char({c:?})"),
            Self::Text(text) => format!("KeyAction::Text({text:?})"),
            Self::Backspace => "KeyAction::Backspace".to_string(),
            Self::CapsLock => "KeyAction::CapsLock".to_string(),
        }
    }
}

pub fn parse_gesture_file(path: &Path) -> Result<GestureFile, ConfigCompilerError> {
    let text = fs::read_to_string(path)
        .map_err(|e| ConfigCompilerError::Io(format!("failed to read {}: {e}", path.display())))?;
    parse_gesture_str(&text)
}

pub fn parse_gesture_str(text: &str) -> Result<GestureFile, ConfigCompilerError> {
    toml::from_str(text).map_err(|e| ConfigCompilerError::Parse(e.to_string()))
}

pub fn validate_config(config: &GestureFile) -> Result<(), ConfigCompilerError> {
    let finite = [
        config.touch.touch_threshold,
        config.touch.release_threshold,
        config.swipe.min_distance,
        config.swipe.long_distance,
        config.swipe_return.min_distance,
        config.swipe_return.min_return_distance,
        config.swipe_return.angle_tolerance_deg,
        config.circle.min_arc_deg,
        config.circle.max_radius_variance,
        config.circle.min_radius,
        config.grid.cell_width,
        config.grid.cell_height,
    ];
    if finite.iter().any(|v| !v.is_finite()) {
        return invalid("all threshold fields must be finite numbers");
    }

    let touch = &config.touch;
    if touch.touch_threshold <= 0.0 {
        return invalid("touch.touch_threshold must be > 0");
    }
    if touch.release_threshold >= touch.touch_threshold {
        return invalid("touch.release_threshold must be < touch.touch_threshold");
    }

    let swipe = &config.swipe;
    if swipe.min_distance <= 0.0 {
        return invalid("swipe.min_distance must be > 0");
    }
    if swipe.long_distance <= swipe.min_distance {
        return invalid("swipe.long_distance must be > swipe.min_distance");
    }

    let swipe_return = &config.swipe_return;
    if swipe_return.min_distance <= 0.0 || swipe_return.min_return_distance <= 0.0 {
        return invalid(
            "swipe_return.min_distance and swipe_return.min_return_distance must be > 0",
        );
    }
    if swipe_return.angle_tolerance_deg <= 0.0 || swipe_return.angle_tolerance_deg > 180.0 {
        return invalid("swipe_return.angle_tolerance_deg must be in (0, 180]");
    }

    if config.hold.min_duration_us == 0 {
        return invalid("hold.min_duration_us must be > 0");
    }

    let circle = &config.circle;
    if circle.min_arc_deg <= 0.0 {
        return invalid("circle.min_arc_deg must be > 0");
    }
    if circle.max_radius_variance <= 0.0 {
        return invalid("circle.max_radius_variance must be > 0");
    }
    if circle.min_radius <= 0.0 {
        return invalid("circle.min_radius must be > 0");
    }
    if circle.min_points == 0 {
        return invalid("circle.min_points must be >= 1");
    }

    if !(MIN_PATH_HISTORY..=MAX_PATH_HISTORY).contains(&config.path.history_size) {
        return invalid(&format!(
            "path.history_size must be in [{MIN_PATH_HISTORY}, {MAX_PATH_HISTORY}]"
        ));
    }

    if config.grid.cell_width <= 0.0 || config.grid.cell_height <= 0.0 {
        return invalid("grid.cell_width and grid.cell_height must be > 0");
    }

    validate_keymap(&config.keymap)
}

fn validate_keymap(entries: &[KeymapEntry]) -> Result<(), ConfigCompilerError> {
    let mut seen = HashSet::new();
    for (idx, entry) in entries.iter().enumerate() {
        if entry.cell > MAX_GRID_CELL {
            return invalid(&format!("keymap[{idx}].cell must be in [0, {MAX_GRID_CELL}]"));
        }
        if entry.gesture == GestureName::None {
            return invalid(&format!("keymap[{idx}] binds gesture `none`"));
        }
        let centered = entry.direction == DirectionName::Center;
        if entry.gesture.is_directional() && centered {
            return invalid(&format!(
                "keymap[{idx}] gesture `{}` requires a compass direction",
                entry.gesture.as_str()
            ));
        }
        if !entry.gesture.is_directional() && !centered {
            return invalid(&format!(
                "keymap[{idx}] gesture `{}` only accepts direction `center`",
                entry.gesture.as_str()
            ));
        }
        if !seen.insert((entry.cell, entry.gesture, entry.direction)) {
            return invalid(&format!(
                "keymap[{idx}] duplicates binding for cell {} {} {}",
                entry.cell,
                entry.gesture.as_str(),
                entry.direction.as_str()
            ));
        }
    }
    Ok(())
}

fn invalid(msg: &str) -> Result<(), ConfigCompilerError> {
    Err(ConfigCompilerError::Validation(msg.to_string()))
}

fn float(value: f32) -> String {
    format!("{value:?}")
}

pub fn render_generated_config(config: &GestureFile) -> String {
    let mut out = String::new();
    out.push_str("// @generated by gesture_config_compiler. Do not edit.\n\n");

    out.push_str("pub const GESTURE_CONFIG: GestureConfig = GestureConfig {\n");
    let _ = writeln!(out, "    touch: TouchConfig {{");
    let _ = writeln!(
        out,
        "        touch_threshold: {},",
        float(config.touch.touch_threshold)
    );
    let _ = writeln!(
        out,
        "        release_threshold: {},",
        float(config.touch.release_threshold)
    );
    let _ = writeln!(out, "    }},");
    let _ = writeln!(out, "    swipe: SwipeConfig {{");
    let _ = writeln!(out, "        min_distance: {},", float(config.swipe.min_distance));
    let _ = writeln!(out, "        long_distance: {},", float(config.swipe.long_distance));
    let _ = writeln!(out, "    }},");
    let _ = writeln!(out, "    swipe_return: SwipeReturnConfig {{");
    let _ = writeln!(
        out,
        "        min_distance: {},",
        float(config.swipe_return.min_distance)
    );
    let _ = writeln!(
        out,
        "        min_return_distance: {},",
        float(config.swipe_return.min_return_distance)
    );
    let _ = writeln!(
        out,
        "        angle_tolerance_deg: {},",
        float(config.swipe_return.angle_tolerance_deg)
    );
    let _ = writeln!(out, "    }},");
    let _ = writeln!(out, "    hold: HoldConfig {{");
    let _ = writeln!(out, "        min_duration_us: {},", config.hold.min_duration_us);
    let _ = writeln!(out, "    }},");
    let _ = writeln!(out, "    circle: CircleConfig {{");
    let _ = writeln!(out, "        min_arc_deg: {},", float(config.circle.min_arc_deg));
    let _ = writeln!(
        out,
        "        max_radius_variance: {},",
        float(config.circle.max_radius_variance)
    );
    let _ = writeln!(out, "        min_radius: {},", float(config.circle.min_radius));
    let _ = writeln!(out, "        min_points: {},", config.circle.min_points);
    let _ = writeln!(out, "    }},");
    let _ = writeln!(out, "    grid: GridConfig {{");
    let _ = writeln!(out, "        cell_width: {},", float(config.grid.cell_width));
    let _ = writeln!(out, "        cell_height: {},", float(config.grid.cell_height));
    let _ = writeln!(out, "    }},");
    out.push_str("};\n\n");

    let _ = writeln!(
        out,
        "pub const PATH_HISTORY_CAPACITY: usize = {};\n",
        config.path.history_size
    );

    let _ = writeln!(
        out,
        "pub static KEY_BINDINGS: [KeyBinding; {}] = [",
        config.keymap.len()
    );
    for entry in &config.keymap {
        let _ = writeln!(out, "    KeyBinding {{");
        let _ = writeln!(out, "        cell: {},", entry.cell);
        let _ = writeln!(out, "        gesture: {},", entry.gesture.rust_path());
        let _ = writeln!(out, "        direction: {},", entry.direction.rust_path());
        let _ = writeln!(out, "        action: {},", entry.action.render());
        let _ = writeln!(out, "    }},");
    }
    out.push_str("];\n");

    out
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let config = parse_gesture_file(path)?;
    validate_config(&config)?;
    Ok(render_generated_config(&config))
}
