//! Replays captured serial traces through the gesture detector and key map.

use std::{fmt::Write as _, fs, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use saokey::{DetectedGesture, Direction, GestureDetector, GestureKind, KeyAction, KeyMap, Sample};

/// Spacing of the synthetic lift samples appended after a contact.
pub const LIFT_STEP_US: u32 = 20_000;
pub const DEFAULT_GAP_US: u32 = 100_000;

pub const CSV_HEADER: &str = "gesture,timestamp_us,kind,direction,cell,label,action";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplayEvent {
    pub timestamp_us: u32,
    pub gesture: DetectedGesture,
    pub action: Option<KeyAction>,
}

pub fn parse_trace(path: &Path) -> Result<Vec<Sample>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_trace_str(&text, &path.display().to_string())
}

/// Parses `"<timestamp_us>, <x>, <y>, <z>"` lines. Blank lines, `#` comments
/// and lines whose first field is not an integer are skipped.
pub fn parse_trace_str(text: &str, source: &str) -> Result<Vec<Sample>> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        let Ok(timestamp) = parts[0].parse::<u32>() else {
            log::debug!("{source}:{line_no} skipping non-sample line: {trimmed}");
            continue;
        };
        if parts.len() != 4 {
            bail!(
                "{source}:{line_no} invalid sample line, expected 4 columns, got {}",
                parts.len()
            );
        }

        let x = parse_f32(parts[1], source, line_no, "x")?;
        let y = parse_f32(parts[2], source, line_no, "y")?;
        let z = parse_f32(parts[3], source, line_no, "z")?;
        out.push(Sample::new(x, y, z, timestamp));
    }
    Ok(out)
}

fn parse_f32(raw: &str, source: &str, line_no: usize, field: &str) -> Result<f32> {
    raw.parse::<f32>()
        .with_context(|| format!("{source}:{line_no} invalid {field} '{raw}'"))
}

/// Two zero-pressure samples: one ends the contact, the next returns the
/// detector to idle.
fn lift_after(last: &Sample) -> [Sample; 2] {
    [1, 2].map(|step| {
        Sample::new(
            last.x,
            last.y,
            0.0,
            last.timestamp.wrapping_add(step * LIFT_STEP_US),
        )
    })
}

/// Feeds `samples` through `detector`. The device only prints samples with
/// some pressure, so a timestamp gap larger than `gap_us` is treated as a
/// lift, and the trace end is always flushed with one.
pub fn replay(
    samples: &[Sample],
    detector: &mut GestureDetector,
    keymap: &KeyMap,
    gap_us: u32,
) -> Vec<ReplayEvent> {
    let mut events = Vec::new();
    let mut feed = |sample: Sample, events: &mut Vec<ReplayEvent>| {
        if let Some(gesture) = detector.update(sample) {
            events.push(ReplayEvent {
                timestamp_us: sample.timestamp,
                gesture,
                action: keymap.lookup(&gesture),
            });
        }
    };

    let mut previous: Option<Sample> = None;
    for sample in samples {
        if let Some(prev) = previous {
            if sample.timestamp.wrapping_sub(prev.timestamp) > gap_us {
                log::debug!(
                    "gap of {} us before t={}, inserting lift",
                    sample.timestamp.wrapping_sub(prev.timestamp),
                    sample.timestamp
                );
                for lift in lift_after(&prev) {
                    feed(lift, &mut events);
                }
            }
        }
        feed(*sample, &mut events);
        previous = Some(*sample);
    }

    if let Some(last) = previous {
        for lift in lift_after(&last) {
            feed(lift, &mut events);
        }
    }

    events
}

pub fn action_label(action: Option<KeyAction>) -> String {
    match action {
        None => String::new(),
        Some(KeyAction::Char(c)) => format!("{c:?}"),
        Some(KeyAction::Text(text)) => format!("{text:?}"),
        Some(KeyAction::Backspace) => "backspace".to_string(),
        Some(KeyAction::CapsLock) => "caps_lock".to_string(),
    }
}

pub fn render_csv(events: &[ReplayEvent]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{CSV_HEADER}");
    for event in events {
        let g = &event.gesture;
        let _ = writeln!(
            out,
            "gesture,{},{},{},{},{},{}",
            event.timestamp_us,
            g.kind.as_str(),
            g.direction.as_str(),
            g.grid_position,
            g,
            action_label(event.action)
        );
    }
    out
}

pub fn expectation_token(gesture: &DetectedGesture) -> String {
    format!(
        "{}:{}:{}",
        gesture.kind.as_str(),
        gesture.direction.as_str(),
        gesture.grid_position
    )
}

pub fn parse_expectation(token: &str) -> Option<DetectedGesture> {
    let mut fields = token.trim().split(':');
    let kind = GestureKind::parse(fields.next()?)?;
    let direction = Direction::parse(fields.next()?)?;
    let cell = fields.next()?.parse::<u8>().ok().filter(|cell| *cell <= 8)?;
    if fields.next().is_some() {
        return None;
    }
    Some(DetectedGesture::new(kind, direction, cell))
}

pub fn parse_expected(path: &Path) -> Result<Vec<DetectedGesture>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let mut expected = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        let gesture = parse_expectation(token).ok_or_else(|| {
            anyhow!(
                "{}:{} invalid expected gesture: {}",
                path.display(),
                idx + 1,
                token
            )
        })?;
        expected.push(gesture);
    }
    Ok(expected)
}

pub fn check_expected(events: &[ReplayEvent], expected: &[DetectedGesture]) -> Result<()> {
    let actual: Vec<DetectedGesture> = events.iter().map(|e| e.gesture).collect();
    if actual != expected {
        let join = |gestures: &[DetectedGesture]| {
            gestures
                .iter()
                .map(expectation_token)
                .collect::<Vec<_>>()
                .join(",")
        };
        bail!(
            "gesture sequence mismatch\nexpected: {}\nactual:   {}",
            join(expected),
            join(&actual)
        );
    }
    Ok(())
}
