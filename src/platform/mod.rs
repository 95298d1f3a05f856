//=========================================================================
// Platform Subsystem
//
// Per-platform HID drivers and the native-service seam they sample.
//
// Architecture:
// ```text
//  Console target:                    Desktop target:
//  ┌─────────────────────────┐       ┌─────────────────────────┐
//  │ NativeServices          │       │ winit event loop        │
//  │  (libnx / libctru)      │       │   ↓                     │
//  │   ↓ non-blocking reads  │       │ WindowPump              │
//  │ SwitchHid / CtrHid      │       │   ↓ crossbeam channel   │
//  │   ├─ PadPipeline        │       │ DesktopHid              │
//  │   └─ system messages    │       │   └─ TouchArena         │
//  └───────────┬─────────────┘       └───────────┬─────────────┘
//              └──────── InputDriver::poll ──────┘
// ```
//
// Key Design Decisions:
// - **One driver type per platform**: chosen at startup from
//   `DriverConfig::platform` via `build_driver`
// - **Native seam as a trait**: the SDK bindings implement
//   `NativeServices`; `ScriptedServices` stands in for headless runs
// - **All reads are snapshots**: nothing here blocks or retries
//
//=========================================================================

//=== Submodules ==========================================================

pub mod ctr;
pub mod desktop;
pub mod pipeline;
pub mod scripted;
pub mod switch;
pub mod system_constants;

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::info;

//=== Internal Imports ====================================================

use crate::config::DriverConfig;
use crate::core::{InputDriver, PadState, Platform, TouchFrame};
use crate::error::{DriverError, NativeError};

use ctr::CtrHid;
use desktop::{DesktopHid, WindowMessage};
use switch::SwitchHid;

//=== System Messages =====================================================

/// Notification from the OS message pump (applet / APT).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemMessage {
    /// The OS wants the application to exit.
    ExitRequested,

    /// Focus state changed; query [`NativeServices::focus_state`].
    FocusStateChanged,

    /// Docked/handheld changed; query [`NativeServices::operation_mode`].
    OperationModeChanged,

    /// Application moved to the background (HOME menu, sleep).
    Suspended,

    /// Application returned to the foreground.
    Resumed,

    /// The OS reported memory pressure.
    LowMemory,

    /// Any message this layer does not translate.
    Other(u32),
}

/// Application focus as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    InFocus,
    OutOfFocus,
    Background,
}

/// Console operation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationMode {
    #[default]
    Handheld,
    Console,
}

/// Suspend policy applied when focus changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusHandling {
    /// Keep running while focused.
    NoSuspend,

    /// Allow the OS to suspend and notify on HOME/sleep.
    SuspendHomeSleepNotify,
}

//=== NativeServices ======================================================

/// Non-blocking native HID and system queries.
///
/// Implemented by the SDK bindings on device and by
/// [`ScriptedServices`](scripted::ScriptedServices) elsewhere.
pub trait NativeServices {
    /// Samples pad `pad_id` into `pad` (connection, buttons, sticks).
    fn update_pad(&mut self, pad_id: usize, pad: &mut PadState) -> Result<(), NativeError>;

    /// Fills `frame` with the active touches, index = touch id.
    fn read_touches(&mut self, frame: &mut TouchFrame) -> Result<(), NativeError>;

    /// Next pending OS message, if any.
    fn next_system_message(&mut self) -> Option<SystemMessage>;

    fn focus_state(&self) -> FocusState;

    fn operation_mode(&self) -> OperationMode {
        OperationMode::Handheld
    }

    /// Applies the suspend policy (no-op where the platform has none).
    fn set_focus_handling(&mut self, _mode: FocusHandling) {}
}

impl<T: NativeServices + ?Sized> NativeServices for Box<T> {
    fn update_pad(&mut self, pad_id: usize, pad: &mut PadState) -> Result<(), NativeError> {
        (**self).update_pad(pad_id, pad)
    }

    fn read_touches(&mut self, frame: &mut TouchFrame) -> Result<(), NativeError> {
        (**self).read_touches(frame)
    }

    fn next_system_message(&mut self) -> Option<SystemMessage> {
        (**self).next_system_message()
    }

    fn focus_state(&self) -> FocusState {
        (**self).focus_state()
    }

    fn operation_mode(&self) -> OperationMode {
        (**self).operation_mode()
    }

    fn set_focus_handling(&mut self, mode: FocusHandling) {
        (**self).set_focus_handling(mode)
    }
}

//=== Driver Selection ====================================================

/// Source a driver samples from.
pub enum Backend {
    /// Console SDK services.
    Native(Box<dyn NativeServices>),

    /// Receiving end of a [`WindowPump`](desktop::WindowPump) channel.
    Window(Receiver<WindowMessage>),
}

impl Backend {
    fn label(&self) -> &'static str {
        match self {
            Self::Native(_) => "native",
            Self::Window(_) => "window",
        }
    }
}

/// Builds the driver named by `config.platform`.
///
/// # Errors
///
/// [`DriverError::Config`] if the config fails validation, and
/// [`DriverError::BackendMismatch`] when a console platform is paired
/// with a window backend or vice versa.
pub fn build_driver(config: &DriverConfig, backend: Backend) -> Result<Box<dyn InputDriver>, DriverError> {
    config.validate()?;

    let label = backend.label();
    let driver: Box<dyn InputDriver> = match (config.platform, backend) {
        (Platform::Switch, Backend::Native(services)) => Box::new(SwitchHid::new(services, config)),
        (Platform::Ctr, Backend::Native(services)) => Box::new(CtrHid::new(services, config)),
        (Platform::Desktop, Backend::Window(receiver)) => Box::new(DesktopHid::new(receiver)),
        (platform, _) => {
            return Err(DriverError::BackendMismatch { platform, backend: label });
        }
    };

    info!(target: "platform", "Input driver ready: {}", driver.platform());
    Ok(driver)
}

//=========================================================================
// Unit Tests
//=========================================================================
