//! Gesture input: turning a drag into a [`Direction`].
//!
//! Keys are handled by `Direction`'s `FromStr` impl and by the front-end.

use crate::grid::Direction;

/// Minimum displacement, in distance units, for a drag to count as a swipe.
pub const SWIPE_THRESHOLD: f64 = 30.0;

/// A point in whatever units the front-end reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal position, growing rightwards.
    pub x: f64,
    /// Vertical position, growing downwards.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Classify a drag from `start` to `end`.
///
/// The axis with the larger displacement decides; the displacement along it
/// must exceed `threshold`. Ties go to the vertical axis. Returns `None` for
/// taps and short drags.
#[must_use]
pub fn classify_swipe(start: Point, end: Point, threshold: f64) -> Option<Direction> {
    let dx = start.x - end.x;
    let dy = start.y - end.y;

    if dx.abs() > dy.abs() {
        if dx.abs() <= threshold {
            return None;
        }
        Some(if dx > 0.0 {
            Direction::Left
        } else {
            Direction::Right
        })
    } else {
        if dy.abs() <= threshold {
            return None;
        }
        Some(if dy > 0.0 { Direction::Up } else { Direction::Down })
    }
}

/// Remembers where a drag started until it ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    /// Minimum displacement for a swipe.
    threshold: f64,
    /// Start of the drag in progress.
    start: Option<Point>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

impl SwipeTracker {
    /// Create a tracker with a custom threshold.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    /// Record the start of a drag, replacing any unfinished one.
    pub fn press(&mut self, at: Point) {
        self.start = Some(at);
    }

    /// Finish the drag and classify it. A release without a press yields `None`.
    pub fn release(&mut self, at: Point) -> Option<Direction> {
        let start = self.start.take()?;
        classify_swipe(start, at, self.threshold)
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(dx: f64, dy: f64) -> Option<Direction> {
        classify_swipe(Point::new(100.0, 100.0), Point::new(100.0 + dx, 100.0 + dy), SWIPE_THRESHOLD)
    }

    #[test]
    fn test_four_directions() {
        assert_eq!(swipe(-50.0, 5.0), Some(Direction::Left));
        assert_eq!(swipe(50.0, -5.0), Some(Direction::Right));
        assert_eq!(swipe(5.0, -50.0), Some(Direction::Up));
        assert_eq!(swipe(-5.0, 50.0), Some(Direction::Down));
    }

    #[test]
    fn test_short_drag_ignored() {
        assert_eq!(swipe(0.0, 0.0), None);
        assert_eq!(swipe(30.0, 0.0), None);
        assert_eq!(swipe(0.0, -29.0), None);
        assert_eq!(swipe(31.0, 0.0), Some(Direction::Right));
    }

    #[test]
    fn test_larger_axis_wins() {
        assert_eq!(swipe(40.0, 60.0), Some(Direction::Down));
        assert_eq!(swipe(-80.0, 60.0), Some(Direction::Left));
    }

    #[test]
    fn test_tracker() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.release(Point::new(0.0, 0.0)), None);

        tracker.press(Point::new(0.0, 0.0));
        assert!(tracker.is_tracking());
        assert_eq!(tracker.release(Point::new(0.0, 45.0)), Some(Direction::Down));
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn test_tracker_custom_threshold() {
        let mut tracker = SwipeTracker::new(2.0);
        tracker.press(Point::new(10.0, 5.0));
        assert_eq!(tracker.release(Point::new(7.0, 5.0)), Some(Direction::Left));
    }
}
