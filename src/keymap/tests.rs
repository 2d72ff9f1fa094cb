use super::*;

#[derive(Default)]
struct RecordingSink {
    typed: std::string::String,
    caps_presses: usize,
    fail_backspace: bool,
    fail_caps_lock: bool,
}

impl KeySink for RecordingSink {
    type Error = &'static str;

    fn press_char(&mut self, c: char) -> Result<(), Self::Error> {
        self.typed.push(c);
        Ok(())
    }

    fn press_backspace(&mut self) -> Result<(), Self::Error> {
        if self.fail_backspace {
            return Err("backspace unavailable");
        }
        self.typed.pop();
        Ok(())
    }

    fn press_caps_lock(&mut self) -> Result<(), Self::Error> {
        if self.fail_caps_lock {
            return Err("caps lock unavailable");
        }
        self.caps_presses += 1;
        Ok(())
    }
}

fn gesture(kind: GestureKind, direction: Direction, cell: u8) -> DetectedGesture {
    DetectedGesture::new(kind, direction, cell)
}

static SMALL_TABLE: [KeyBinding; 4] = [
    KeyBinding {
        cell: 4,
        gesture: GestureKind::Tap,
        direction: Direction::Center,
        action: KeyAction::Char('o'),
    },
    KeyBinding {
        cell: 8,
        gesture: GestureKind::SwipeShort,
        direction: Direction::W,
        action: KeyAction::Backspace,
    },
    KeyBinding {
        cell: 0,
        gesture: GestureKind::Hold,
        direction: Direction::Center,
        action: KeyAction::CapsLock,
    },
    KeyBinding {
        cell: 6,
        gesture: GestureKind::CircleCCW,
        direction: Direction::Center,
        action: KeyAction::Text("the "),
    },
];

#[test]
fn default_table_matches_device_layout() {
    let map = KeyMap::default();

    assert_eq!(
        map.lookup(&gesture(GestureKind::Tap, Direction::Center, 0)),
        Some(KeyAction::Char('a'))
    );
    assert_eq!(
        map.lookup(&gesture(GestureKind::Tap, Direction::Center, 4)),
        Some(KeyAction::Char('o'))
    );
    assert_eq!(
        map.lookup(&gesture(GestureKind::SwipeShort, Direction::N, 4)),
        Some(KeyAction::Char('u'))
    );
    assert_eq!(
        map.lookup(&gesture(GestureKind::SwipeReturn, Direction::N, 4)),
        Some(KeyAction::Char('U'))
    );
    assert_eq!(
        map.lookup(&gesture(GestureKind::CircleCCW, Direction::Center, 4)),
        Some(KeyAction::Char('5'))
    );
    assert_eq!(
        map.lookup(&gesture(GestureKind::SwipeShort, Direction::W, 8)),
        Some(KeyAction::Backspace)
    );
    assert_eq!(
        map.lookup(&gesture(GestureKind::SwipeShort, Direction::E, 6)),
        Some(KeyAction::Char(' '))
    );
}

#[test]
fn lookup_requires_exact_cell_kind_and_direction() {
    let map = KeyMap::new(&SMALL_TABLE);

    assert_eq!(
        map.lookup(&gesture(GestureKind::SwipeShort, Direction::W, 8)),
        Some(KeyAction::Backspace)
    );
    assert_eq!(
        map.lookup(&gesture(GestureKind::SwipeShort, Direction::NW, 8)),
        None
    );
    assert_eq!(
        map.lookup(&gesture(GestureKind::SwipeLong, Direction::W, 8)),
        None
    );
    assert_eq!(map.lookup(&gesture(GestureKind::Tap, Direction::Center, 3)), None);
}

#[test]
fn none_gesture_never_matches() {
    static NONE_TABLE: [KeyBinding; 1] = [KeyBinding {
        cell: 0,
        gesture: GestureKind::None,
        direction: Direction::Center,
        action: KeyAction::Char('x'),
    }];
    let map = KeyMap::new(&NONE_TABLE);

    assert_eq!(map.lookup(&DetectedGesture::NONE), None);
}

#[test]
fn execute_types_characters_and_backspace() {
    let mut map = KeyMap::new(&SMALL_TABLE);
    let mut sink = RecordingSink::default();

    let tap = gesture(GestureKind::Tap, Direction::Center, 4);
    assert_eq!(map.execute(&tap, &mut sink), Ok(Some(KeyAction::Char('o'))));
    assert_eq!(map.execute(&tap, &mut sink), Ok(Some(KeyAction::Char('o'))));
    let erase = gesture(GestureKind::SwipeShort, Direction::W, 8);
    assert_eq!(map.execute(&erase, &mut sink), Ok(Some(KeyAction::Backspace)));

    assert_eq!(sink.typed, "o");
}

#[test]
fn caps_lock_is_sent_to_host_and_tracked() {
    let mut map = KeyMap::new(&SMALL_TABLE);
    let mut sink = RecordingSink::default();
    let hold = gesture(GestureKind::Hold, Direction::Center, 0);
    let tap = gesture(GestureKind::Tap, Direction::Center, 4);
    let circle = gesture(GestureKind::CircleCCW, Direction::Center, 6);

    assert_eq!(map.execute(&hold, &mut sink), Ok(Some(KeyAction::CapsLock)));
    assert!(map.caps_lock());
    map.execute(&tap, &mut sink).expect("tap");
    map.execute(&circle, &mut sink).expect("circle");
    map.execute(&hold, &mut sink).expect("caps lock");
    assert!(!map.caps_lock());

    assert_eq!(sink.caps_presses, 2);
    assert_eq!(sink.typed, "othe ");
}

#[test]
fn rejected_caps_lock_keeps_state() {
    let mut map = KeyMap::new(&SMALL_TABLE);
    let mut sink = RecordingSink {
        fail_caps_lock: true,
        ..RecordingSink::default()
    };

    let hold = gesture(GestureKind::Hold, Direction::Center, 0);
    assert_eq!(map.execute(&hold, &mut sink), Err("caps lock unavailable"));
    assert!(!map.caps_lock());
}

#[test]
fn unbound_gesture_is_a_no_op() {
    let mut map = KeyMap::new(&SMALL_TABLE);
    let mut sink = RecordingSink::default();

    let unbound = gesture(GestureKind::SwipeLong, Direction::N, 1);
    assert_eq!(map.execute(&unbound, &mut sink), Ok(None));
    assert!(sink.typed.is_empty());
}

#[test]
fn sink_errors_propagate() {
    let mut map = KeyMap::new(&SMALL_TABLE);
    let mut sink = RecordingSink {
        fail_backspace: true,
        ..RecordingSink::default()
    };

    let erase = gesture(GestureKind::SwipeShort, Direction::W, 8);
    assert_eq!(
        map.execute(&erase, &mut sink),
        Err("backspace unavailable")
    );
}
