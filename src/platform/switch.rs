//=========================================================================
// Switch HID Driver
//=========================================================================
//
// Npad + touch screen + applet message pump for Nintendo Switch.
//
// Architecture:
//   NativeServices → PadPipeline<NpadButton> → EventQueue
//                  → applet messages (quit / focus / operation mode)
//
//=========================================================================

//=== External Dependencies ===============================================

use bitflags::bitflags;
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::pipeline::{PadPipeline, PadProfile};
use super::{FocusHandling, FocusState, NativeServices, OperationMode, SystemMessage};
use crate::config::{DisplaySize, DriverConfig};
use crate::core::{
    ButtonMapping, DriverCore, GamepadRegistry, InputDriver, InputEvent, Platform, PollStage,
};

//=== NpadButton ==========================================================

bitflags! {
    /// Npad button register (libnx `HidNpadButton`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NpadButton: u64 {
        const A = 1 << 0;
        const B = 1 << 1;
        const X = 1 << 2;
        const Y = 1 << 3;
        const STICK_L = 1 << 4;
        const STICK_R = 1 << 5;
        const L = 1 << 6;
        const R = 1 << 7;
        const ZL = 1 << 8;
        const ZR = 1 << 9;
        const PLUS = 1 << 10;
        const MINUS = 1 << 11;
        const LEFT = 1 << 12;
        const UP = 1 << 13;
        const RIGHT = 1 << 14;
        const DOWN = 1 << 15;
        const STICK_L_LEFT = 1 << 16;
        const STICK_L_UP = 1 << 17;
        const STICK_L_RIGHT = 1 << 18;
        const STICK_L_DOWN = 1 << 19;
        const STICK_R_LEFT = 1 << 20;
        const STICK_R_UP = 1 << 21;
        const STICK_R_RIGHT = 1 << 22;
        const STICK_R_DOWN = 1 << 23;
        const LEFT_SL = 1 << 24;
        const LEFT_SR = 1 << 25;
        const RIGHT_SL = 1 << 26;
        const RIGHT_SR = 1 << 27;

        /// SL on either Joy-Con.
        const ANY_SL = Self::LEFT_SL.bits() | Self::RIGHT_SL.bits();
        /// SR on either Joy-Con.
        const ANY_SR = Self::LEFT_SR.bits() | Self::RIGHT_SR.bits();
    }
}

//=== Mapping Table =======================================================

/// Npad bits → logical button names, in event order.
pub const SWITCH_MAPPINGS: [ButtonMapping<NpadButton>; 16] = [
    ButtonMapping { name: "a", key: NpadButton::A, index: Some(1) },
    ButtonMapping { name: "b", key: NpadButton::B, index: Some(2) },
    ButtonMapping { name: "x", key: NpadButton::X, index: Some(3) },
    ButtonMapping { name: "y", key: NpadButton::Y, index: Some(4) },
    ButtonMapping { name: "leftshoulder", key: NpadButton::L, index: Some(5) },
    ButtonMapping { name: "rightshoulder", key: NpadButton::R, index: Some(6) },
    ButtonMapping { name: "back", key: NpadButton::MINUS, index: Some(7) },
    ButtonMapping { name: "start", key: NpadButton::PLUS, index: Some(8) },
    ButtonMapping { name: "leftstick", key: NpadButton::STICK_L, index: Some(9) },
    ButtonMapping { name: "rightstick", key: NpadButton::STICK_R, index: Some(10) },
    ButtonMapping { name: "dpright", key: NpadButton::RIGHT, index: None },
    ButtonMapping { name: "dpleft", key: NpadButton::LEFT, index: None },
    ButtonMapping { name: "dpup", key: NpadButton::UP, index: None },
    ButtonMapping { name: "dpdown", key: NpadButton::DOWN, index: None },
    ButtonMapping { name: "leftshoulder", key: NpadButton::ANY_SL, index: Some(5) },
    ButtonMapping { name: "rightshoulder", key: NpadButton::ANY_SR, index: Some(6) },
];

/// Analog stick value at full deflection.
pub const JOYSTICK_MAX: i32 = 32767;

/// Touch points reported by the panel.
pub const MAX_TOUCHES: usize = 16;

static SWITCH_PROFILE: PadProfile<NpadButton> = PadProfile {
    table: &SWITCH_MAPPINGS,
    trigger_left: NpadButton::ZL,
    trigger_right: NpadButton::ZR,
    stick_max: JOYSTICK_MAX,
    max_touches: MAX_TOUCHES,
};

//=== SwitchHid ===========================================================

/// HID driver for Nintendo Switch.
pub struct SwitchHid<B: NativeServices> {
    core: DriverCore,
    backend: B,
    pipeline: PadPipeline<NpadButton>,
    pad_index: usize,
    focused: bool,
    handheld: DisplaySize,
    docked: DisplaySize,
}

impl<B: NativeServices> SwitchHid<B> {
    //--- Construction -----------------------------------------------------

    pub fn new(backend: B, config: &DriverConfig) -> Self {
        info!(target: "platform", "Switch HID driver on pad index {}", config.pad_index);
        Self {
            core: DriverCore::new(),
            backend,
            pipeline: PadPipeline::new(&SWITCH_PROFILE),
            pad_index: config.pad_index,
            focused: true,
            handheld: config.display.handheld,
            docked: config.display.docked,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    //--- Applet Messages --------------------------------------------------

    /// Handles at most one pending applet message.
    fn pump_applet_messages(&mut self) {
        let Some(message) = self.backend.next_system_message() else {
            return;
        };

        match message {
            SystemMessage::ExitRequested => {
                info!(target: "platform::system", "Applet requested exit");
                self.core.send_quit();
            }

            SystemMessage::FocusStateChanged => {
                let focused = self.backend.focus_state() == FocusState::InFocus;
                if focused == self.focused {
                    return;
                }

                debug!(target: "platform::system", "Focus changed: {}", focused);
                self.focused = focused;
                self.core.send_focus(focused);

                self.backend.set_focus_handling(if focused {
                    FocusHandling::NoSuspend
                } else {
                    FocusHandling::SuspendHomeSleepNotify
                });
            }

            SystemMessage::OperationModeChanged => {
                let size = match self.backend.operation_mode() {
                    OperationMode::Handheld => self.handheld,
                    OperationMode::Console => self.docked,
                };
                debug!(target: "platform::system", "Operation mode changed: {}x{}", size.width, size.height);
                self.core.send_resize(size.width, size.height);
            }

            SystemMessage::LowMemory => self.core.send_low_memory(),

            other => trace!(target: "platform::system", "Ignoring applet message {:?}", other),
        }
    }
}

//=== InputDriver =========================================================

impl<B: NativeServices> InputDriver for SwitchHid<B> {
    fn poll(&mut self, joysticks: &mut dyn GamepadRegistry) -> Option<InputEvent> {
        match self.core.begin_poll() {
            PollStage::Ready(event) => return Some(event),
            PollStage::QuietFrame => return None,
            PollStage::Refresh => {}
        }

        let which = self.pipeline.refresh_pad(
            &mut self.backend,
            joysticks,
            self.pad_index,
            self.core.queue_mut(),
        )?;

        self.pipeline
            .refresh_touches(&mut self.backend, true, self.core.queue_mut());
        self.pipeline.refresh_axes(which, self.core.queue_mut());

        self.pump_applet_messages();

        self.core.finish_poll()
    }

    fn platform(&self) -> Platform {
        Platform::Switch
    }

    fn core(&self) -> &DriverCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DriverCore {
        &mut self.core
    }

    fn button_pressed(&self) -> u64 {
        self.pipeline.buttons().pressed_bits()
    }

    fn button_released(&self) -> u64 {
        self.pipeline.buttons().released_bits()
    }

    fn button_held(&self) -> u64 {
        self.pipeline.buttons().held_bits()
    }

    fn is_down(&self, button: usize) -> bool {
        self.pipeline.buttons().is_down(button)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
