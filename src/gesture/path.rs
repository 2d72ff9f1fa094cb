use heapless::HistoryBuffer;

use super::types::PathPoint;

/// Fixed-capacity trajectory of the current contact. Once full, each push
/// overwrites the oldest point.
pub struct PathHistory<const N: usize> {
    points: HistoryBuffer<PathPoint, N>,
    previous: Option<PathPoint>,
}

impl<const N: usize> Default for PathHistory<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PathHistory<N> {
    pub const fn new() -> Self {
        Self {
            points: HistoryBuffer::new(),
            previous: None,
        }
    }

    pub fn push(&mut self, point: PathPoint) {
        self.previous = self.points.recent().copied();
        self.points.write(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.previous = None;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.len() == 0
    }

    pub fn latest(&self) -> Option<PathPoint> {
        self.points.recent().copied()
    }

    /// The point pushed just before [`Self::latest`].
    pub fn previous(&self) -> Option<PathPoint> {
        self.previous
    }

    /// Arithmetic mean of the buffered points.
    pub fn centroid(&self) -> Option<PathPoint> {
        let count = self.points.len();
        if count == 0 {
            return None;
        }
        let (sum_x, sum_y) = self
            .points
            .as_slice()
            .iter()
            .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p.x, sy + p.y));
        let count = count as f32;
        Some(PathPoint {
            x: sum_x / count,
            y: sum_y / count,
        })
    }

    /// Buffered points in no particular order.
    pub fn points(&self) -> &[PathPoint] {
        self.points.as_slice()
    }
}
