//=========================================================================
// Stick Tracker
//=========================================================================
//
// Analog stick state with per-component delta suppression.
//
// Architecture:
//   PadState sticks → StickTracker::apply() → GamepadAxis events
//
// Each component (x / y of each stick) is compared against its own
// previous value; only changed components emit and update.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::event::InputEvent;
use super::event_queue::EventQueue;

//=== StickPosition =======================================================

/// Raw native stick reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StickPosition {
    pub x: i32,
    pub y: i32,
}

impl StickPosition {
    pub const CENTER: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

//=== AxisSpec ============================================================

/// Stable name and number reported for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSpec {
    pub name: &'static str,
    pub number: u8,
}

/// Axis names/numbers for one stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickAxes {
    pub x: AxisSpec,
    pub y: AxisSpec,
}

pub const LEFT_STICK: StickAxes = StickAxes {
    x: AxisSpec { name: "leftx", number: 2 },
    y: AxisSpec { name: "lefty", number: 1 },
};

pub const RIGHT_STICK: StickAxes = StickAxes {
    x: AxisSpec { name: "rightx", number: 5 },
    y: AxisSpec { name: "righty", number: 4 },
};

pub const TRIGGER_LEFT: AxisSpec = AxisSpec { name: "triggerleft", number: 3 };
pub const TRIGGER_RIGHT: AxisSpec = AxisSpec { name: "triggerright", number: 6 };

/// Sticks in native index order (0 = left, 1 = right).
pub const STICKS: [StickAxes; 2] = [LEFT_STICK, RIGHT_STICK];

//=== StickTracker ========================================================

/// Remembers the last reported value of both sticks.
#[derive(Debug)]
pub struct StickTracker {
    previous: [StickPosition; 2],
    max_range: f32,
}

impl StickTracker {
    /// Creates a tracker normalizing by the platform's `max_range`.
    pub fn new(max_range: i32) -> Self {
        Self {
            previous: [StickPosition::CENTER; 2],
            max_range: max_range as f32,
        }
    }

    /// Last reported position of stick `index`.
    pub fn previous(&self, index: usize) -> Option<StickPosition> {
        self.previous.get(index).copied()
    }

    /// Diffs the current readings and queues axis events for changes.
    ///
    /// Y is inverted so that up is positive on every platform. Values are
    /// raw / `max_range` and are not clamped.
    pub fn apply(&mut self, which: usize, current: [StickPosition; 2], queue: &mut EventQueue) {
        for (index, (axes, now)) in STICKS.iter().zip(current).enumerate() {
            let before = &mut self.previous[index];

            if before.x != now.x {
                queue.enqueue(InputEvent::GamepadAxis {
                    which,
                    axis: axes.x.name,
                    number: axes.x.number,
                    value: now.x as f32 / self.max_range,
                });
                before.x = now.x;
            }

            if before.y != now.y {
                queue.enqueue(InputEvent::GamepadAxis {
                    which,
                    axis: axes.y.name,
                    number: axes.y.number,
                    value: -(now.y as f32 / self.max_range),
                });
                before.y = now.y;
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn axes(queue: &mut EventQueue) -> Vec<(&'static str, f32)> {
        std::iter::from_fn(|| queue.dequeue())
            .filter_map(|e| match e {
                InputEvent::GamepadAxis { axis, value, .. } => Some((axis, value)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn identical_readings_emit_nothing() {
        let mut tracker = StickTracker::new(100);
        let mut queue = EventQueue::new();
        let reading = [StickPosition::new(10, 20), StickPosition::new(-5, 0)];

        tracker.apply(0, reading, &mut queue);
        assert_eq!(queue.len(), 3);
        queue.clear();

        tracker.apply(0, reading, &mut queue);
        assert!(queue.is_empty());
    }

    #[test]
    fn only_changed_component_emits() {
        let mut tracker = StickTracker::new(100);
        let mut queue = EventQueue::new();

        tracker.apply(0, [StickPosition::new(50, 0), StickPosition::CENTER], &mut queue);
        assert_eq!(axes(&mut queue), vec![("leftx", 0.5)]);

        tracker.apply(0, [StickPosition::new(50, 25), StickPosition::CENTER], &mut queue);
        assert_eq!(axes(&mut queue), vec![("lefty", -0.25)]);
        assert_eq!(tracker.previous(0), Some(StickPosition::new(50, 25)));
    }

    #[test]
    fn right_stick_uses_its_own_names() {
        let mut tracker = StickTracker::new(10);
        let mut queue = EventQueue::new();

        tracker.apply(0, [StickPosition::CENTER, StickPosition::new(-10, -10)], &mut queue);
        assert_eq!(axes(&mut queue), vec![("rightx", -1.0), ("righty", 1.0)]);
    }

    #[test]
    fn values_are_not_clamped() {
        let mut tracker = StickTracker::new(32767);
        let mut queue = EventQueue::new();

        tracker.apply(0, [StickPosition::new(-32768, 0), StickPosition::CENTER], &mut queue);
        let events = axes(&mut queue);
        assert_eq!(events.len(), 1);
        let (name, value) = events[0];
        assert_eq!(name, "leftx");
        assert!(value < -1.0);
        assert_eq!(value, -32768.0 / 32767.0);
    }

    #[test]
    fn axis_numbers_are_stable() {
        assert_eq!((LEFT_STICK.x.number, LEFT_STICK.y.number), (2, 1));
        assert_eq!((RIGHT_STICK.x.number, RIGHT_STICK.y.number), (5, 4));
        assert_eq!((TRIGGER_LEFT.number, TRIGGER_RIGHT.number), (3, 6));
    }
}
