//=========================================================================
// Scripted Native Services
//=========================================================================
//
// In-memory `NativeServices` for headless runs and tests.
//
// Callers set the pad, touch and system state the next reads should
// observe; every read returns a snapshot of that state. Reads can be
// forced to fail to exercise driver error paths.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, VecDeque};

use log::trace;

//=== Internal Dependencies ===============================================

use super::{FocusHandling, FocusState, NativeServices, OperationMode, SystemMessage};
use crate::core::{PadState, StickPosition, TouchFrame, TouchSample};
use crate::error::NativeError;

/// Result code reported by forced read failures.
const SCRIPTED_FAILURE: u32 = 0xdead;

//=== PadSample ===========================================================

#[derive(Debug, Clone, Copy, Default)]
struct PadSample {
    connected: bool,
    buttons: u64,
    sticks: [StickPosition; 2],
}

//=== ScriptedServices ====================================================

/// Native services driven from code.
#[derive(Debug, Default)]
pub struct ScriptedServices {
    pads: HashMap<usize, PadSample>,
    touches: Vec<TouchSample>,
    messages: VecDeque<SystemMessage>,
    focus: FocusState,
    mode: OperationMode,
    focus_handling: Option<FocusHandling>,
    fail_pads: bool,
    fail_touches: bool,
}

impl ScriptedServices {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Pads -------------------------------------------------------------

    pub fn set_connected(&mut self, pad_id: usize, connected: bool) {
        self.pads.entry(pad_id).or_default().connected = connected;
    }

    /// Sets the raw button word pad `pad_id` reports.
    pub fn set_buttons(&mut self, pad_id: usize, buttons: u64) {
        self.pads.entry(pad_id).or_default().buttons = buttons;
    }

    /// Sets stick `stick` (0 left, 1 right) of pad `pad_id`. Other
    /// indices are ignored.
    pub fn set_stick(&mut self, pad_id: usize, stick: usize, x: i32, y: i32) {
        if let Some(slot) = self.pads.entry(pad_id).or_default().sticks.get_mut(stick) {
            *slot = StickPosition::new(x, y);
        }
    }

    pub fn fail_pad_reads(&mut self, fail: bool) {
        self.fail_pads = fail;
    }

    //--- Touch ------------------------------------------------------------

    /// Sets the active touches; index is the touch id.
    pub fn set_touches(&mut self, points: &[(i32, i32)]) {
        self.touches = points.iter().map(|&(x, y)| TouchSample { x, y }).collect();
    }

    pub fn fail_touch_reads(&mut self, fail: bool) {
        self.fail_touches = fail;
    }

    //--- System -----------------------------------------------------------

    pub fn push_message(&mut self, message: SystemMessage) {
        self.messages.push_back(message);
    }

    pub fn pending_messages(&self) -> usize {
        self.messages.len()
    }

    pub fn set_focus_state(&mut self, focus: FocusState) {
        self.focus = focus;
    }

    pub fn set_operation_mode(&mut self, mode: OperationMode) {
        self.mode = mode;
    }

    /// Last suspend policy a driver applied.
    pub fn focus_handling(&self) -> Option<FocusHandling> {
        self.focus_handling
    }
}

//=== NativeServices ======================================================

impl NativeServices for ScriptedServices {
    fn update_pad(&mut self, pad_id: usize, pad: &mut PadState) -> Result<(), NativeError> {
        if self.fail_pads {
            return Err(NativeError::Failed { service: "hid", code: SCRIPTED_FAILURE });
        }

        let sample = self.pads.get(&pad_id).copied().unwrap_or_default();
        pad.latch(sample.connected, sample.buttons, sample.sticks);
        Ok(())
    }

    fn read_touches(&mut self, frame: &mut TouchFrame) -> Result<(), NativeError> {
        if self.fail_touches {
            return Err(NativeError::Unavailable("touch"));
        }

        frame.points.clear();
        frame.points.extend_from_slice(&self.touches);
        Ok(())
    }

    fn next_system_message(&mut self) -> Option<SystemMessage> {
        let message = self.messages.pop_front();
        if let Some(message) = message {
            trace!(target: "platform::system", "Scripted message {:?}", message);
        }
        message
    }

    fn focus_state(&self) -> FocusState {
        self.focus
    }

    fn operation_mode(&self) -> OperationMode {
        self.mode
    }

    fn set_focus_handling(&mut self, mode: FocusHandling) {
        self.focus_handling = Some(mode);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
