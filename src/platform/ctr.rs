//=========================================================================
// 3DS HID Driver
//=========================================================================
//
// HID keys + circle pad / C-stick + single-point touch screen + APT
// message pump for Nintendo 3DS.
//
// Differences from the Switch driver:
// - No leftstick/rightstick buttons; SELECT maps to "back"
// - The panel reports one touch, read only while KEY_TOUCH is held
// - APT suspend/resume drive focus; there is no operation mode
//
//=========================================================================

//=== External Dependencies ===============================================

use bitflags::bitflags;
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::pipeline::{PadPipeline, PadProfile};
use super::{NativeServices, SystemMessage};
use crate::config::DriverConfig;
use crate::core::{
    ButtonMapping, DriverCore, GamepadRegistry, InputDriver, InputEvent, Platform, PollStage,
};

//=== CtrKey ==============================================================

bitflags! {
    /// HID key register (libctru `KEY_*`), widened to 64 bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CtrKey: u64 {
        const A = 1 << 0;
        const B = 1 << 1;
        const SELECT = 1 << 2;
        const START = 1 << 3;
        const DRIGHT = 1 << 4;
        const DLEFT = 1 << 5;
        const DUP = 1 << 6;
        const DDOWN = 1 << 7;
        const R = 1 << 8;
        const L = 1 << 9;
        const X = 1 << 10;
        const Y = 1 << 11;
        const ZL = 1 << 14;
        const ZR = 1 << 15;
        const TOUCH = 1 << 20;
        const CSTICK_RIGHT = 1 << 24;
        const CSTICK_LEFT = 1 << 25;
        const CSTICK_UP = 1 << 26;
        const CSTICK_DOWN = 1 << 27;
        const CPAD_RIGHT = 1 << 28;
        const CPAD_LEFT = 1 << 29;
        const CPAD_UP = 1 << 30;
        const CPAD_DOWN = 1 << 31;
    }
}

//=== Mapping Table =======================================================

pub const CTR_MAPPINGS: [ButtonMapping<CtrKey>; 12] = [
    ButtonMapping { name: "a", key: CtrKey::A, index: Some(1) },
    ButtonMapping { name: "b", key: CtrKey::B, index: Some(2) },
    ButtonMapping { name: "x", key: CtrKey::X, index: Some(3) },
    ButtonMapping { name: "y", key: CtrKey::Y, index: Some(4) },
    ButtonMapping { name: "leftshoulder", key: CtrKey::L, index: Some(5) },
    ButtonMapping { name: "rightshoulder", key: CtrKey::R, index: Some(6) },
    ButtonMapping { name: "back", key: CtrKey::SELECT, index: Some(7) },
    ButtonMapping { name: "start", key: CtrKey::START, index: Some(8) },
    ButtonMapping { name: "dpright", key: CtrKey::DRIGHT, index: None },
    ButtonMapping { name: "dpleft", key: CtrKey::DLEFT, index: None },
    ButtonMapping { name: "dpup", key: CtrKey::DUP, index: None },
    ButtonMapping { name: "dpdown", key: CtrKey::DDOWN, index: None },
];

/// Circle pad value at full deflection.
pub const CIRCLE_PAD_MAX: i32 = 156;

static CTR_PROFILE: PadProfile<CtrKey> = PadProfile {
    table: &CTR_MAPPINGS,
    trigger_left: CtrKey::ZL,
    trigger_right: CtrKey::ZR,
    stick_max: CIRCLE_PAD_MAX,
    max_touches: 1,
};

//=== CtrHid ==============================================================

/// HID driver for Nintendo 3DS.
pub struct CtrHid<B: NativeServices> {
    core: DriverCore,
    backend: B,
    pipeline: PadPipeline<CtrKey>,
    pad_index: usize,
    focused: bool,
}

impl<B: NativeServices> CtrHid<B> {
    pub fn new(backend: B, config: &DriverConfig) -> Self {
        info!(target: "platform", "3DS HID driver on pad index {}", config.pad_index);
        Self {
            core: DriverCore::new(),
            backend,
            pipeline: PadPipeline::new(&CTR_PROFILE),
            pad_index: config.pad_index,
            focused: true,
        }
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Whether the touch panel is currently held.
    pub fn touch_held(&self) -> bool {
        self.pipeline.touches().active_count() > 0
    }

    fn set_focus(&mut self, focused: bool) {
        if focused == self.focused {
            return;
        }

        debug!(target: "platform::system", "Focus changed: {}", focused);
        self.focused = focused;
        self.core.send_focus(focused);
    }

    /// Handles at most one pending APT message.
    fn pump_apt_messages(&mut self) {
        let Some(message) = self.backend.next_system_message() else {
            return;
        };

        match message {
            SystemMessage::ExitRequested => {
                info!(target: "platform::system", "APT requested exit");
                self.core.send_quit();
            }
            SystemMessage::Suspended => self.set_focus(false),
            SystemMessage::Resumed => self.set_focus(true),
            SystemMessage::LowMemory => self.core.send_low_memory(),
            other => trace!(target: "platform::system", "Ignoring APT message {:?}", other),
        }
    }
}

//=== InputDriver =========================================================

impl<B: NativeServices> InputDriver for CtrHid<B> {
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

        let touching = self.pipeline.buttons().state().is_held(CtrKey::TOUCH);
        self.pipeline
            .refresh_touches(&mut self.backend, touching, self.core.queue_mut());
        self.pipeline.refresh_axes(which, self.core.queue_mut());

        self.pump_apt_messages();

        self.core.finish_poll()
    }

    fn platform(&self) -> Platform {
        Platform::Ctr
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
