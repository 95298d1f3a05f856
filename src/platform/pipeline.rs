//=========================================================================
// Pad Pipeline
//=========================================================================
//
// Shared native-state refresh pass for console drivers.
//
// Architecture:
//   refresh_pad()      registry lookup, pad refresh, connection edge,
//                      button edges
//   refresh_touches()  native touch list → TouchArena diff
//   refresh_axes()     trigger toggles, stick deltas
//
// Drivers call the stages in that order and add their own message pump.
//
//=========================================================================

//=== External Dependencies ===============================================

use bitflags::Flags;
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::NativeServices;
use crate::core::{
    ButtonMapping, EventQueue, GamepadRegistry, InputEvent, PadButtons, StickPosition, StickTracker,
    TouchArena, TouchFrame, TRIGGER_LEFT, TRIGGER_RIGHT,
};

//=== PadProfile ==========================================================

/// Compile-time description of one console's pad hardware.
#[derive(Debug)]
pub struct PadProfile<K: 'static> {
    pub table: &'static [ButtonMapping<K>],
    pub trigger_left: K,
    pub trigger_right: K,
    /// Raw stick value reported at full deflection.
    pub stick_max: i32,
    /// Maximum simultaneous touches the panel reports.
    pub max_touches: usize,
}

//=== PadPipeline =========================================================

/// Per-driver state carried between refresh passes.
#[derive(Debug)]
pub struct PadPipeline<K: 'static> {
    profile: &'static PadProfile<K>,
    buttons: PadButtons<K>,
    touches: TouchArena,
    sticks: StickTracker,
    frame: TouchFrame,
    current_sticks: [StickPosition; 2],
}

impl<K: Flags<Bits = u64> + Copy> PadPipeline<K> {
    pub fn new(profile: &'static PadProfile<K>) -> Self {
        Self {
            profile,
            buttons: PadButtons::new(profile.table),
            touches: TouchArena::new(profile.max_touches),
            sticks: StickTracker::new(profile.stick_max),
            frame: TouchFrame::new(),
            current_sticks: [StickPosition::CENTER; 2],
        }
    }

    pub fn buttons(&self) -> &PadButtons<K> {
        &self.buttons
    }

    pub fn touches(&self) -> &TouchArena {
        &self.touches
    }

    //--- Stages -----------------------------------------------------------

    /// Refreshes the active pad and queues connection and button events.
    ///
    /// Returns the pad id, or `None` when no pad is registered at
    /// `pad_index` or the native refresh failed (nothing is refreshed).
    pub fn refresh_pad<B: NativeServices + ?Sized>(
        &mut self,
        backend: &mut B,
        joysticks: &mut dyn GamepadRegistry,
        pad_index: usize,
        queue: &mut EventQueue,
    ) -> Option<usize> {
        let gamepad = joysticks.joystick_from_id(pad_index)?;
        let which = gamepad.id();
        let was_connected = gamepad.is_connected();

        if let Err(err) = backend.update_pad(which, gamepad.pad_state_mut()) {
            warn!(target: "platform::input", "Pad {} refresh failed: {}", which, err);
            return None;
        }

        let connected = gamepad.is_connected();
        if connected != was_connected {
            debug!(
                target: "platform::input",
                "Pad {} {}",
                which,
                if connected { "connected" } else { "disconnected" }
            );
            queue.enqueue(if connected {
                InputEvent::GamepadAdded { which }
            } else {
                InputEvent::GamepadRemoved { which }
            });
        }

        self.buttons.capture(gamepad.pad_state());
        self.current_sticks = gamepad.pad_state().sticks();
        self.buttons.translate(which, queue);

        Some(which)
    }

    /// Diffs the native touch list. With `enabled` false the panel is
    /// treated as untouched this frame.
    pub fn refresh_touches<B: NativeServices + ?Sized>(
        &mut self,
        backend: &mut B,
        enabled: bool,
        queue: &mut EventQueue,
    ) {
        self.frame.points.clear();

        if enabled {
            if let Err(err) = backend.read_touches(&mut self.frame) {
                warn!(target: "platform::input", "Touch read failed: {}", err);
                return;
            }
        }

        self.touches.apply_frame(&self.frame, queue);
    }

    /// Queues trigger toggles and changed stick components.
    pub fn refresh_axes(&mut self, which: usize, queue: &mut EventQueue) {
        self.buttons
            .translate_trigger(which, self.profile.trigger_left, TRIGGER_LEFT, queue);
        self.buttons
            .translate_trigger(which, self.profile.trigger_right, TRIGGER_RIGHT, queue);
        self.sticks.apply(which, self.current_sticks, queue);
    }
}
