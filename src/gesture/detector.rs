use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{
    circle::CircleAnalyzer,
    geometry::{angle_deg, distance},
    path::PathHistory,
    position::grid_position,
    rules::{classify, ContactSummary},
    swipe_return::SwipeReturnTracker,
    types::{DetectedGesture, PathPoint, Sample},
};
use crate::config::{active_config, GestureConfig, PATH_HISTORY_CAPACITY};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetectorPhase {
    #[default]
    Idle,
    Tracking,
    Detected,
}

/// Diagnostic snapshot of the contact being tracked.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DetectorTrace {
    pub phase: DetectorPhase,
    pub path_len: usize,
    pub max_distance: f32,
    pub cumulative_angle: f32,
    pub circle_points: u16,
    pub swipe_return_armed: bool,
    pub swipe_return_reversing: bool,
}

#[derive(Clone, Copy, Debug)]
enum GestureHsmEvent {
    Sample(Sample),
}

#[derive(Clone, Copy, Debug, Default)]
struct DispatchContext {
    detected: Option<DetectedGesture>,
}

/// Turns a stream of touch samples into at most one gesture per contact.
pub struct GestureDetector {
    config: &'static GestureConfig,
    machine: statig::blocking::StateMachine<GestureHsm>,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new(active_config())
    }
}

impl GestureDetector {
    pub fn new(config: &'static GestureConfig) -> Self {
        Self {
            config,
            machine: GestureHsm::new(config).state_machine(),
        }
    }

    /// Feeds one sample. Returns the gesture on the sample that ends a
    /// contact, unless that contact matched nothing.
    pub fn update(&mut self, sample: Sample) -> Option<DetectedGesture> {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&GestureHsmEvent::Sample(sample), &mut context);
        context.detected.filter(|gesture| !gesture.is_none())
    }

    /// Result of the most recent contact, `GestureKind::None` before the
    /// first one.
    pub fn detected_gesture(&self) -> DetectedGesture {
        self.machine.inner().last_detected
    }

    pub fn reset(&mut self) {
        self.machine = GestureHsm::new(self.config).state_machine();
    }

    pub fn phase(&self) -> DetectorPhase {
        self.machine.inner().phase
    }

    pub fn trace(&self) -> DetectorTrace {
        self.machine.inner().trace()
    }
}

struct GestureHsm {
    config: &'static GestureConfig,
    phase: DetectorPhase,
    start: PathPoint,
    start_cell: u8,
    start_us: u32,
    path: PathHistory<PATH_HISTORY_CAPACITY>,
    max_distance: f32,
    max_point: PathPoint,
    max_angle: f32,
    circle: CircleAnalyzer,
    swipe_return: SwipeReturnTracker,
    last_detected: DetectedGesture,
}

impl GestureHsm {
    fn new(config: &'static GestureConfig) -> Self {
        Self {
            config,
            phase: DetectorPhase::Idle,
            start: PathPoint::default(),
            start_cell: 0,
            start_us: 0,
            path: PathHistory::new(),
            max_distance: 0.0,
            max_point: PathPoint::default(),
            max_angle: 0.0,
            circle: CircleAnalyzer::new(),
            swipe_return: SwipeReturnTracker::new(),
            last_detected: DetectedGesture::NONE,
        }
    }

    fn begin_contact(&mut self, sample: &Sample) {
        let point = sample.point();
        self.start = point;
        self.start_cell = grid_position(point.x, point.y, &self.config.grid);
        self.start_us = sample.timestamp;
        self.path.clear();
        self.path.push(point);
        self.max_distance = 0.0;
        self.max_point = point;
        self.max_angle = 0.0;
        self.circle.reset();
        self.swipe_return.reset();
        log::debug!(
            "contact start x={} y={} cell={}",
            point.x,
            point.y,
            self.start_cell
        );
    }

    fn track(&mut self, sample: &Sample) {
        let point = sample.point();
        self.path.push(point);

        let dx = point.x - self.start.x;
        let dy = point.y - self.start.y;
        let dist = distance(dx, dy);
        if dist > self.max_distance {
            self.max_distance = dist;
            self.max_point = point;
            self.max_angle = angle_deg(dx, dy);
        }

        self.circle.update(&self.path);
        self.swipe_return.update(
            self.max_distance,
            self.max_angle,
            self.max_point,
            point,
            &self.config.swipe_return,
        );
    }

    fn analyze(&self, release: &Sample) -> DetectedGesture {
        let end = release.point();
        let summary = ContactSummary {
            grid_position: self.start_cell,
            duration_us: release.timestamp.wrapping_sub(self.start_us),
            max_distance: self.max_distance,
            max_angle: self.max_angle,
            swipe_returned: self.swipe_return.is_return(
                self.start,
                end,
                self.max_distance,
                &self.config.swipe_return,
            ),
            outward_angle: self.swipe_return.outward_angle(),
            circle_closed: self.circle.is_circle(&self.path, &self.config.circle),
            cumulative_angle: self.circle.cumulative_angle(),
        };
        log::debug!(
            "contact release duration_us={} max_distance={} arc={}",
            summary.duration_us,
            summary.max_distance,
            summary.cumulative_angle
        );
        classify(&summary, self.config)
    }

    fn trace(&self) -> DetectorTrace {
        DetectorTrace {
            phase: self.phase,
            path_len: self.path.len(),
            max_distance: self.max_distance,
            cumulative_angle: self.circle.cumulative_angle(),
            circle_points: self.circle.point_count(),
            swipe_return_armed: self.swipe_return.is_armed(),
            swipe_return_reversing: self.swipe_return.is_reversing(),
        }
    }
}

#[state_machine(initial = "State::idle()")]
impl GestureHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        let _ = context;
        match event {
            GestureHsmEvent::Sample(sample) => {
                if sample.z > self.config.touch.touch_threshold {
                    self.begin_contact(sample);
                    self.phase = DetectorPhase::Tracking;
                    return Transition(State::tracking());
                }
                Handled
            }
        }
    }

    #[state]
    fn tracking(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Sample(sample) => {
                if sample.z < self.config.touch.release_threshold {
                    let gesture = self.analyze(sample);
                    if gesture.is_none() {
                        log::debug!("contact matched no gesture");
                    } else {
                        log::info!("gesture {} cell={}", gesture, gesture.grid_position);
                    }
                    self.last_detected = gesture;
                    context.detected = Some(gesture);
                    self.phase = DetectorPhase::Detected;
                    return Transition(State::detected());
                }
                self.track(sample);
                Handled
            }
        }
    }

    #[state]
    fn detected(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        let _ = context;
        match event {
            GestureHsmEvent::Sample(sample) => {
                if sample.z < self.config.touch.release_threshold {
                    self.phase = DetectorPhase::Idle;
                    return Transition(State::idle());
                }
                Handled
            }
        }
    }
}
