//=========================================================================
// Event Queue
//=========================================================================
//
// FIFO of unified input events produced during a poll pass.
//
// The driver enqueues every transition it detects, then hands events out
// one per `poll()` call. The queue is owned by a single driver and only
// touched from the polling context, so no locking is involved.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::InputEvent;

//=== EventQueue ==========================================================

/// Ordered, unbounded FIFO of [`InputEvent`]s.
///
/// Growth is bounded in practice by the number of simultaneous state
/// transitions in one frame (typically fewer than 20).
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<InputEvent>,
}

impl EventQueue {
    /// Creates an empty queue with room for a typical frame burst.
    pub fn new() -> Self {
        const FRAME_BASE: usize = 32;

        Self {
            events: VecDeque::with_capacity(FRAME_BASE),
        }
    }

    /// Appends an event at the back.
    pub fn enqueue(&mut self, event: InputEvent) {
        trace!(target: "platform::input", "Queued {}: {:?}", event.kind(), event);
        self.events.push_back(event);
    }

    /// Removes and returns the oldest event.
    pub fn dequeue(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    /// Returns the oldest event without removing it.
    pub fn peek(&self) -> Option<&InputEvent> {
        self.events.front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drops all pending events while preserving capacity.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dequeue_preserves_insertion_order() {
        let mut queue = EventQueue::new();
        queue.enqueue(InputEvent::GamepadAdded { which: 0 });
        queue.enqueue(InputEvent::LowMemory);
        queue.enqueue(InputEvent::Quit);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue(), Some(InputEvent::GamepadAdded { which: 0 }));
        assert_eq!(queue.dequeue(), Some(InputEvent::LowMemory));
        assert_eq!(queue.dequeue(), Some(InputEvent::Quit));
        assert_eq!(queue.dequeue(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn peek_does_not_consume() {
        let mut queue = EventQueue::new();
        queue.enqueue(InputEvent::LowMemory);
        queue.enqueue(InputEvent::Quit);

        assert_eq!(queue.peek(), Some(&InputEvent::LowMemory));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn clear_does_not_deallocate() {
        let mut queue = EventQueue::new();
        for _ in 0..64 {
            queue.enqueue(InputEvent::LowMemory);
        }

        let cap_before = queue.events.capacity();
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.events.capacity(), cap_before);
    }
}
