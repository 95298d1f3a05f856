//=========================================================================
// Touch Arena
//=========================================================================
//
// Per-id touch tracking with explicit create / update / remove
// transitions.
//
// Architecture:
//   TouchFrame (native list) → apply_frame() → TouchArena → touch events
//
// Ids are small stable integers `0..capacity`. Each live slot keeps the
// current and previous position so moves can report a delta.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, TouchEvent};
use super::event_queue::EventQueue;

//=== TouchSample / TouchFrame ============================================

/// Raw position of one native touch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchSample {
    pub x: i32,
    pub y: i32,
}

/// One native touch-screen read. Index in `points` is the touch id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchFrame {
    pub points: Vec<TouchSample>,
}

impl TouchFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame with a single touch at `(x, y)`.
    pub fn single(x: i32, y: i32) -> Self {
        Self {
            points: vec![TouchSample { x, y }],
        }
    }

    pub fn count(&self) -> usize {
        self.points.len()
    }
}

//=== TouchPoint ==========================================================

/// Last known position of a tracked touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    pub id: usize,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    current: TouchPoint,
    previous: TouchPoint,
}

//=== TouchArena ==========================================================

/// Fixed-capacity store of active touches keyed by id.
#[derive(Debug)]
pub struct TouchArena {
    slots: Vec<Option<Slot>>,
    tracked: usize,
}

impl TouchArena {
    //--- Construction -----------------------------------------------------

    /// Creates an arena for up to `capacity` simultaneous touches.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            tracked: 0,
        }
    }

    //--- Transitions ------------------------------------------------------

    /// Creates (or re-seeds) the slot for `id`. Previous equals current.
    ///
    /// Returns `None` if `id` is beyond capacity.
    pub fn press(&mut self, id: usize, sample: TouchSample) -> Option<TouchPoint> {
        let slot = self.slots.get_mut(id)?;
        let point = TouchPoint { id, x: sample.x, y: sample.y };
        *slot = Some(Slot { current: point, previous: point });
        Some(point)
    }

    /// Moves a live touch and returns its new position and delta.
    pub fn update(&mut self, id: usize, sample: TouchSample) -> Option<(TouchPoint, i32, i32)> {
        let slot = self.slots.get_mut(id)?.as_mut()?;
        slot.previous = slot.current;
        slot.current = TouchPoint { id, x: sample.x, y: sample.y };

        let dx = slot.current.x - slot.previous.x;
        let dy = slot.current.y - slot.previous.y;
        Some((slot.current, dx, dy))
    }

    /// Removes a live touch, returning its last known position.
    pub fn release(&mut self, id: usize) -> Option<TouchPoint> {
        self.slots.get_mut(id)?.take().map(|slot| slot.current)
    }

    //--- Queries ----------------------------------------------------------

    pub fn get(&self, id: usize) -> Option<TouchPoint> {
        self.slots.get(id).copied().flatten().map(|slot| slot.current)
    }

    pub fn is_active(&self, id: usize) -> bool {
        self.get(id).is_some()
    }

    /// Lowest id with no live touch.
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Touch count seen on the previous frame (see [`apply_frame`](Self::apply_frame)).
    pub fn tracked(&self) -> usize {
        self.tracked
    }

    //--- Frame Diffing ----------------------------------------------------

    /// Diffs a native touch list against the arena and queues events.
    ///
    /// - count grew: ids at or past the old count are pressed
    /// - other listed ids move; zero-delta moves are dropped
    /// - count shrank: every id of the old range is released with zero
    ///   delta and pressure, and tracking restarts from zero so touches
    ///   still down are pressed again on the next frame
    pub fn apply_frame(&mut self, frame: &TouchFrame, queue: &mut EventQueue) {
        let count = frame.count().min(self.capacity());
        let previous = self.tracked;

        for (id, sample) in frame.points.iter().take(count).enumerate() {
            let newly_active = count > previous && id >= previous;

            if newly_active || !self.is_active(id) {
                if let Some(point) = self.press(id, *sample) {
                    queue.enqueue(InputEvent::TouchPress(touch_event(point, 0, 0, 1.0)));
                }
                continue;
            }

            if let Some((point, dx, dy)) = self.update(id, *sample) {
                if dx != 0 || dy != 0 {
                    queue.enqueue(InputEvent::TouchMoved(touch_event(point, dx, dy, 1.0)));
                }
            }
        }

        if count < previous {
            for id in 0..previous {
                if let Some(point) = self.release(id) {
                    queue.enqueue(InputEvent::TouchRelease(touch_event(point, 0, 0, 0.0)));
                }
            }
            self.tracked = 0;
        } else {
            self.tracked = count;
        }
    }
}

//--- Helpers -------------------------------------------------------------

pub(crate) fn touch_event(point: TouchPoint, dx: i32, dy: i32, pressure: f32) -> TouchEvent {
    TouchEvent {
        id: point.id,
        x: point.x as f32,
        y: point.y as f32,
        dx: dx as f32,
        dy: dy as f32,
        pressure,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut EventQueue) -> Vec<InputEvent> {
        std::iter::from_fn(|| queue.dequeue()).collect()
    }

    fn frame(points: &[(i32, i32)]) -> TouchFrame {
        TouchFrame {
            points: points.iter().map(|&(x, y)| TouchSample { x, y }).collect(),
        }
    }

    #[test]
    fn press_move_release_sequence() {
        let mut arena = TouchArena::new(4);
        let mut queue = EventQueue::new();

        arena.apply_frame(&frame(&[(100, 200)]), &mut queue);
        let events = drain(&mut queue);
        assert_eq!(events.len(), 1);
        match &events[0] {
            InputEvent::TouchPress(t) => {
                assert_eq!((t.id, t.x, t.y), (0, 100.0, 200.0));
                assert_eq!((t.dx, t.dy), (0.0, 0.0));
            }
            other => panic!("Expected TouchPress, got {:?}", other),
        }

        arena.apply_frame(&frame(&[(105, 200)]), &mut queue);
        let events = drain(&mut queue);
        assert_eq!(events.len(), 1);
        match &events[0] {
            InputEvent::TouchMoved(t) => assert_eq!((t.id, t.dx, t.dy), (0, 5.0, 0.0)),
            other => panic!("Expected TouchMoved, got {:?}", other),
        }

        arena.apply_frame(&frame(&[]), &mut queue);
        let events = drain(&mut queue);
        assert_eq!(events.len(), 1);
        match &events[0] {
            InputEvent::TouchRelease(t) => {
                assert_eq!((t.id, t.x, t.y), (0, 105.0, 200.0));
                assert_eq!((t.dx, t.dy, t.pressure), (0.0, 0.0, 0.0));
            }
            other => panic!("Expected TouchRelease, got {:?}", other),
        }
        assert_eq!(arena.active_count(), 0);
    }

    #[test]
    fn stationary_touch_produces_no_moves() {
        let mut arena = TouchArena::new(4);
        let mut queue = EventQueue::new();

        arena.apply_frame(&frame(&[(10, 10)]), &mut queue);
        drain(&mut queue);

        for _ in 0..5 {
            arena.apply_frame(&frame(&[(10, 10)]), &mut queue);
            assert!(queue.is_empty(), "Zero-delta moves should be suppressed");
        }
    }

    #[test]
    fn second_finger_is_pressed_while_first_moves() {
        let mut arena = TouchArena::new(4);
        let mut queue = EventQueue::new();

        arena.apply_frame(&frame(&[(0, 0)]), &mut queue);
        drain(&mut queue);

        arena.apply_frame(&frame(&[(3, 4), (50, 50)]), &mut queue);
        let events = drain(&mut queue);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], InputEvent::TouchMoved(t) if t.id == 0));
        assert!(matches!(events[1], InputEvent::TouchPress(t) if t.id == 1));
    }

    #[test]
    fn shrink_releases_old_range_then_represses_survivors() {
        let mut arena = TouchArena::new(4);
        let mut queue = EventQueue::new();

        arena.apply_frame(&frame(&[(0, 0), (50, 50)]), &mut queue);
        drain(&mut queue);

        arena.apply_frame(&frame(&[(0, 0)]), &mut queue);
        let events = drain(&mut queue);
        let released: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                InputEvent::TouchRelease(t) => Some(t.id),
                _ => None,
            })
            .collect();
        assert_eq!(released, vec![0, 1]);

        arena.apply_frame(&frame(&[(0, 0)]), &mut queue);
        let events = drain(&mut queue);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], InputEvent::TouchPress(t) if t.id == 0));
    }

    #[test]
    fn touches_beyond_capacity_are_ignored() {
        let mut arena = TouchArena::new(1);
        let mut queue = EventQueue::new();

        arena.apply_frame(&frame(&[(1, 1), (2, 2)]), &mut queue);
        assert_eq!(queue.len(), 1);
        assert_eq!(arena.tracked(), 1);
    }

    #[test]
    fn explicit_transitions() {
        let mut arena = TouchArena::new(2);
        assert_eq!(arena.first_free(), Some(0));

        arena.press(0, TouchSample { x: 1, y: 1 });
        assert!(arena.is_active(0));
        assert_eq!(arena.first_free(), Some(1));

        let (point, dx, dy) = arena.update(0, TouchSample { x: 4, y: 0 }).unwrap();
        assert_eq!((point.x, point.y, dx, dy), (4, 0, 3, -1));

        assert!(arena.update(1, TouchSample::default()).is_none());
        assert!(arena.press(5, TouchSample::default()).is_none());

        assert_eq!(arena.release(0).map(|p| p.x), Some(4));
        assert!(arena.release(0).is_none());
    }
}
