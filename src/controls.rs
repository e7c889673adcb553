use crate::board::Direction;
use crate::engine::input::{KeyState, TouchStroke};
use crate::engine::Point;

// KeyboardEvent.key values
// https://developer.mozilla.org/en-US/docs/Web/API/KeyboardEvent/key/Key_Values
pub const WALL_KEY: &str = " ";

pub fn direction_keys(direction: Direction) -> &'static [&'static str] {
    match direction {
        Direction::Right => &["ArrowRight", "d"],
        Direction::Left => &["ArrowLeft", "a"],
        Direction::Up => &["ArrowUp", "w"],
        Direction::Down => &["ArrowDown", "s"],
    }
}

/// Directions whose keys are held this frame
/// - matched keys are released so one press triggers one request
pub fn poll_direction_keys(keys: &mut KeyState) -> Vec<Direction> {
    let mut requested = Vec::new();
    for direction in Direction::ALL {
        let bound = direction_keys(direction);
        if keys.any_pressed(bound) {
            requested.push(direction);
            keys.release(bound);
        }
    }
    requested
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Gesture {
    Swipe(Direction),
    /// Where the finger lifted, in client pixels
    Tap(Point),
}

/// Classify a finished touch by its dominant axis
/// - horizontal only when |dx| is strictly larger than |dy|
/// - a swipe needs to travel more than `threshold` pixels, anything shorter is a tap
pub fn classify(stroke: &TouchStroke, threshold: f64) -> Gesture {
    let dx = stroke.end.x - stroke.start.x;
    let dy = stroke.end.y - stroke.start.y;
    let (direction, magnitude) = if dx.abs() > dy.abs() {
        let direction = if dx < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        };
        (direction, dx.abs())
    } else {
        let direction = if dy < 0.0 {
            Direction::Up
        } else {
            Direction::Down
        };
        (direction, dy.abs())
    };
    if magnitude > threshold {
        Gesture::Swipe(direction)
    } else {
        Gesture::Tap(stroke.end)
    }
}

/// Pending move requests
/// - a direction is held at most once
/// - drained oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementQueue {
    pending: Vec<Direction>,
}

impl MovementQueue {
    /// Returns false when `direction` was already pending
    pub fn push(&mut self, direction: Direction) -> bool {
        if self.pending.contains(&direction) {
            return false;
        }
        self.pending.push(direction);
        true
    }

    pub fn pop(&mut self) -> Option<Direction> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(dx: f64, dy: f64) -> TouchStroke {
        TouchStroke {
            start: Point { x: 100.0, y: 100.0 },
            end: Point {
                x: 100.0 + dx,
                y: 100.0 + dy,
            },
        }
    }

    #[test]
    fn held_keys_trigger_once() {
        let mut keys = KeyState::default();
        keys.set_pressed("d");
        keys.set_pressed("ArrowUp");
        keys.set_pressed(WALL_KEY);

        assert_eq!(
            poll_direction_keys(&mut keys),
            vec![Direction::Right, Direction::Up]
        );
        assert!(poll_direction_keys(&mut keys).is_empty());
        // the wall key is not a direction key and stays held
        assert!(keys.is_pressed(WALL_KEY));
    }

    #[test]
    fn both_bindings_release_together() {
        let mut keys = KeyState::default();
        keys.set_pressed("ArrowLeft");
        keys.set_pressed("a");
        assert_eq!(poll_direction_keys(&mut keys), vec![Direction::Left]);
        assert!(!keys.any_pressed(direction_keys(Direction::Left)));
    }

    #[test]
    fn swipes_follow_the_dominant_axis() {
        assert_eq!(classify(&stroke(40.0, 5.0), 10.0), Gesture::Swipe(Direction::Right));
        assert_eq!(classify(&stroke(-40.0, 30.0), 10.0), Gesture::Swipe(Direction::Left));
        assert_eq!(classify(&stroke(3.0, -25.0), 10.0), Gesture::Swipe(Direction::Up));
        assert_eq!(classify(&stroke(0.0, 11.0), 10.0), Gesture::Swipe(Direction::Down));
        // a perfect diagonal counts as vertical
        assert_eq!(classify(&stroke(-20.0, 20.0), 10.0), Gesture::Swipe(Direction::Down));
    }

    #[test]
    fn short_touches_are_taps() {
        assert_eq!(
            classify(&stroke(10.0, 0.0), 10.0),
            Gesture::Tap(Point { x: 110.0, y: 100.0 })
        );
        assert!(matches!(classify(&stroke(0.0, 0.0), 10.0), Gesture::Tap(_)));
        assert!(matches!(classify(&stroke(-6.0, 9.0), 10.0), Gesture::Tap(_)));
    }

    #[test]
    fn queue_collapses_duplicates_and_keeps_order() {
        let mut queue = MovementQueue::default();
        assert!(queue.push(Direction::Down));
        assert!(queue.push(Direction::Left));
        assert!(!queue.push(Direction::Down));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(Direction::Down));
        assert_eq!(queue.pop(), Some(Direction::Left));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }
}
