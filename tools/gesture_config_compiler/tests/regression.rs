use std::path::PathBuf;

use gesture_config_compiler::{
    generate_from_path, parse_gesture_file, parse_gesture_str, render_generated_config,
    validate_config, ActionEntry, ConfigCompilerError, DirectionName, GestureName,
};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("missing tools dir")
        .parent()
        .expect("missing repo root")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn default_config_compiles_with_full_keymap() {
    let path = repo_root().join("config/gestures.toml");
    let config = parse_gesture_file(&path).expect("default config should parse");
    validate_config(&config).expect("default config should validate");

    assert_eq!(config.touch.touch_threshold, 2.5);
    assert_eq!(config.touch.release_threshold, 2.1);
    assert_eq!(config.hold.min_duration_us, 200_000);
    assert_eq!(config.circle.min_points, 14);
    assert_eq!(config.circle.min_radius, 0.2);
    assert_eq!(config.path.history_size, 64);

    let backspace = config
        .keymap
        .iter()
        .find(|entry| entry.action == ActionEntry::Backspace)
        .expect("default keymap binds backspace");
    assert_eq!(backspace.cell, 8);
    assert_eq!(backspace.gesture, GestureName::SwipeShort);
    assert_eq!(backspace.direction, DirectionName::W);

    let center_swipes = config
        .keymap
        .iter()
        .filter(|entry| entry.cell == 4 && entry.gesture == GestureName::SwipeShort)
        .count();
    assert_eq!(center_swipes, 8);
}

#[test]
fn generation_is_deterministic_for_same_input() {
    let path = fixture("valid_minimal.toml");
    let first = generate_from_path(&path).expect("first generation failed");
    let second = generate_from_path(&path).expect("second generation failed");
    assert_eq!(first, second);
}

#[test]
fn rendered_output_carries_thresholds_and_bindings() {
    let config = parse_gesture_file(&fixture("valid_minimal.toml")).expect("fixture should parse");
    validate_config(&config).expect("fixture should validate");
    let rendered = render_generated_config(&config);

    for needle in [
        "pub const GESTURE_CONFIG: GestureConfig = GestureConfig {",
        "touch_threshold: 2.5,",
        "release_threshold: 2.1,",
        "long_distance: 1.7,",
        "angle_tolerance_deg: 45.0,",
        "min_duration_us: 200000,",
        "min_radius: 0.2,",
        "min_points: 14,",
        "pub const PATH_HISTORY_CAPACITY: usize = 64;",
        "pub static KEY_BINDINGS: [KeyBinding; 5] = [",
        "gesture: GestureKind::SwipeShort,",
        "direction: Direction::NE,",
        "action: KeyAction::Char('p'),",
        "action: KeyAction::Backspace,",
        "action: KeyAction::CapsLock,",
        "gesture: GestureKind::CircleCCW,",
        "action: KeyAction::Text(\"the \"),",
    ] {
        assert!(
            rendered.contains(needle),
            "rendered output missing `{needle}`"
        );
    }
}

#[test]
fn omitted_direction_defaults_to_center() {
    let config = parse_gesture_file(&fixture("valid_minimal.toml")).expect("fixture should parse");
    let tap = &config.keymap[0];
    assert_eq!(tap.gesture, GestureName::Tap);
    assert_eq!(tap.direction, DirectionName::Center);
}

#[test]
fn semantic_validation_rejects_contradictory_settings() {
    let cases = [
        (
            "invalid/release_not_below_touch.toml",
            "touch.release_threshold must be < touch.touch_threshold",
        ),
        (
            "invalid/long_not_above_short.toml",
            "swipe.long_distance must be > swipe.min_distance",
        ),
        (
            "invalid/tolerance_out_of_range.toml",
            "swipe_return.angle_tolerance_deg must be in (0, 180]",
        ),
        (
            "invalid/history_too_small.toml",
            "path.history_size must be in [3, 255]",
        ),
        (
            "invalid/min_points_zero.toml",
            "circle.min_points must be >= 1",
        ),
        (
            "invalid/min_radius_zero.toml",
            "circle.min_radius must be > 0",
        ),
        (
            "invalid/zero_cell_height.toml",
            "grid.cell_width and grid.cell_height must be > 0",
        ),
        (
            "invalid/cell_out_of_range.toml",
            "keymap[0].cell must be in [0, 8]",
        ),
        (
            "invalid/duplicate_binding.toml",
            "keymap[1] duplicates binding for cell 4 tap center",
        ),
        (
            "invalid/directional_without_direction.toml",
            "gesture `swipe_long` requires a compass direction",
        ),
        (
            "invalid/hold_with_direction.toml",
            "gesture `hold` only accepts direction `center`",
        ),
        ("invalid/none_binding.toml", "keymap[0] binds gesture `none`"),
    ];

    for (fixture_name, expected_msg) in cases {
        let path = fixture(fixture_name);
        let err = generate_from_path(&path).expect_err("fixture should fail validation");
        match err {
            ConfigCompilerError::Validation(msg) => {
                assert!(
                    msg.contains(expected_msg),
                    "{fixture_name}: expected validation message containing `{expected_msg}`, got `{msg}`"
                );
            }
            other => panic!("{fixture_name}: expected validation error, got {other}"),
        }
    }
}

#[test]
fn parse_errors_are_reported_for_schema_mismatches() {
    let err = generate_from_path(&fixture("invalid/missing_grid_section.toml"))
        .expect_err("fixture should fail parsing");
    match err {
        ConfigCompilerError::Parse(msg) => {
            assert!(msg.contains("grid"), "unexpected parse message: {msg}");
        }
        other => panic!("expected parse error, got {other}"),
    }

    let err = parse_gesture_str("[touch]\ntouch_threshold = \"high\"\n")
        .expect_err("string threshold should not parse");
    assert!(matches!(err, ConfigCompilerError::Parse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = generate_from_path(&fixture("does_not_exist.toml")).expect_err("missing file");
    match err {
        ConfigCompilerError::Io(msg) => assert!(msg.contains("does_not_exist.toml")),
        other => panic!("expected io error, got {other}"),
    }
}
