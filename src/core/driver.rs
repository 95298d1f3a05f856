//=========================================================================
// Input Driver Contract
//=========================================================================
//
// Base contract every platform HID driver implements, plus the shared
// state (queue, hysteresis flag, pad button snapshot) drivers build on.
//
// Poll lifecycle (per call):
// ```text
//  queued event? ──yes──> return it
//       │no
//  quiet frame owed? ──yes──> clear flag, return None
//       │no
//  refresh native state → enqueue transitions
//       │
//  queue empty? ──yes──> None
//       │no
//  return front, owe one quiet frame
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use bitflags::Flags;
use log::trace;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::buttons::{clamp_logical, ButtonMapping, ButtonState};
use super::event::InputEvent;
use super::event_queue::EventQueue;
use super::registry::{GamepadRegistry, PadState};
use super::stick::AxisSpec;

//=== Platform ============================================================

/// Driver implementation selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Nintendo Switch (libnx pad + applet services).
    #[default]
    Switch,

    /// Nintendo 3DS (libctru HID + APT services).
    Ctr,

    /// Desktop window via winit (touch + window messages only).
    Desktop,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Switch => "switch",
            Self::Ctr => "ctr",
            Self::Desktop => "desktop",
        };
        f.write_str(name)
    }
}

//=== InputDriver =========================================================

/// Platform-agnostic HID driver.
///
/// Consumers call [`poll`](Self::poll) repeatedly each frame until it
/// returns `None`. After the last event of a burst exactly one `None` is
/// reported before native state is sampled again.
pub trait InputDriver {
    /// Returns the next event, or `None` if nothing is pending.
    ///
    /// Never fails: a missing pad or failed native read yields `None`.
    fn poll(&mut self, joysticks: &mut dyn GamepadRegistry) -> Option<InputEvent>;

    fn platform(&self) -> Platform;

    /// Shared queue and hysteresis state (read-only view).
    fn core(&self) -> &DriverCore;

    /// Mutable shared state. Only the injectors are public on it, so the
    /// poll timing cannot be disturbed from outside the crate.
    fn core_mut(&mut self) -> &mut DriverCore;

    //--- Button Snapshot --------------------------------------------------

    /// Buttons that went down in the last captured snapshot.
    fn button_pressed(&self) -> u64 {
        0
    }

    /// Buttons that went up in the last captured snapshot.
    fn button_released(&self) -> u64 {
        0
    }

    /// Buttons held in the last captured snapshot.
    fn button_held(&self) -> u64 {
        0
    }

    /// Whether logical button `button` (1-based) is held.
    ///
    /// Out-of-range indices are clamped, never rejected.
    fn is_down(&self, _button: usize) -> bool {
        false
    }

    //--- Synthetic Events -------------------------------------------------

    fn send_focus(&mut self, focused: bool) {
        self.core_mut().send_focus(focused);
    }

    fn send_resize(&mut self, width: u32, height: u32) {
        self.core_mut().send_resize(width, height);
    }

    fn send_low_memory(&mut self) {
        self.core_mut().send_low_memory();
    }

    fn send_quit(&mut self) {
        self.core_mut().send_quit();
    }
}

//=== PollStage ===========================================================

/// Outcome of the queue/hysteresis checks that open every poll.
#[derive(Debug, Clone, PartialEq)]
pub enum PollStage {
    /// A buffered event is ready.
    Ready(InputEvent),

    /// The quiet frame owed after a burst; report `None`.
    QuietFrame,

    /// Nothing buffered; sample native state.
    Refresh,
}

//=== DriverCore ==========================================================

/// Queue and hysteresis state shared by all drivers.
///
/// Outside this crate only the read accessors and the `send_*`
/// injectors are reachable; the poll stages stay with the drivers.
///
/// ```compile_fail
/// let mut core = aetheric_hid::core::DriverCore::new();
/// core.finish_poll();
/// ```
///
/// ```compile_fail
/// let mut core = aetheric_hid::core::DriverCore::new();
/// core.queue_mut().clear();
/// ```
#[derive(Debug, Default)]
pub struct DriverCore {
    queue: EventQueue,
    hysteresis: bool,
}

impl DriverCore {
    pub fn new() -> Self {
        Self {
            queue: EventQueue::new(),
            hysteresis: false,
        }
    }

    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    pub(crate) fn queue_mut(&mut self) -> &mut EventQueue {
        &mut self.queue
    }

    /// Whether the next empty-queue poll owes a quiet frame.
    pub fn owes_quiet_frame(&self) -> bool {
        self.hysteresis
    }

    //--- Poll Stages ------------------------------------------------------

    /// Drains buffered events first, then pays off a pending quiet frame.
    pub(crate) fn begin_poll(&mut self) -> PollStage {
        if let Some(event) = self.queue.dequeue() {
            return PollStage::Ready(event);
        }

        if self.hysteresis {
            self.hysteresis = false;
            return PollStage::QuietFrame;
        }

        PollStage::Refresh
    }

    /// Returns the first event of a refresh pass and arms the quiet frame.
    pub(crate) fn finish_poll(&mut self) -> Option<InputEvent> {
        let event = self.queue.dequeue()?;
        self.hysteresis = true;
        Some(event)
    }

    //--- Synthetic Events -------------------------------------------------

    pub fn send_focus(&mut self, focused: bool) {
        self.queue.enqueue(InputEvent::WindowFocusChanged { focused });
    }

    pub fn send_resize(&mut self, width: u32, height: u32) {
        self.queue.enqueue(InputEvent::WindowResized { width, height });
    }

    pub fn send_low_memory(&mut self) {
        self.queue.enqueue(InputEvent::LowMemory);
    }

    pub fn send_quit(&mut self) {
        self.queue.enqueue(InputEvent::Quit);
    }
}

//=== PadButtons ==========================================================

/// Button snapshot of one pad plus its platform mapping table.
#[derive(Debug)]
pub struct PadButtons<K: 'static> {
    state: ButtonState<K>,
    table: &'static [ButtonMapping<K>],
}

impl<K: Flags<Bits = u64> + Copy> PadButtons<K> {
    pub fn new(table: &'static [ButtonMapping<K>]) -> Self {
        Self {
            state: ButtonState::idle(),
            table,
        }
    }

    pub fn state(&self) -> &ButtonState<K> {
        &self.state
    }

    pub fn table(&self) -> &'static [ButtonMapping<K>] {
        self.table
    }

    /// Captures this frame's edges and level state from the pad handle.
    pub fn capture(&mut self, pad: &PadState) {
        self.state = ButtonState::from_words(pad.buttons(), pad.previous_buttons());
    }

    /// Queues down/up events for every mapped entry with an edge.
    pub fn translate(&self, which: usize, queue: &mut EventQueue) {
        for mapping in self.table {
            if self.state.is_pressed(mapping.key) {
                queue.enqueue(InputEvent::GamepadButtonDown {
                    which,
                    name: mapping.name,
                    button: mapping.index,
                });
            } else if self.state.is_released(mapping.key) {
                queue.enqueue(InputEvent::GamepadButtonUp {
                    which,
                    name: mapping.name,
                    button: mapping.index,
                });
            }
        }
    }

    /// Queues a binary axis event if `key` toggled this frame.
    pub fn translate_trigger(&self, which: usize, key: K, axis: AxisSpec, queue: &mut EventQueue) {
        if !self.state.toggled(key) {
            return;
        }

        let value = if self.state.is_pressed(key) { 1.0 } else { 0.0 };
        trace!(target: "platform::input", "Trigger {} -> {}", axis.name, value);
        queue.enqueue(InputEvent::GamepadAxis {
            which,
            axis: axis.name,
            number: axis.number,
            value,
        });
    }

    pub fn is_down(&self, button: usize) -> bool {
        clamp_logical(self.table, button).is_some_and(|mapping| self.state.is_held(mapping.key))
    }

    pub fn pressed_bits(&self) -> u64 {
        self.state.pressed.bits()
    }

    pub fn released_bits(&self) -> u64 {
        self.state.released.bits()
    }

    pub fn held_bits(&self) -> u64 {
        self.state.held.bits()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
