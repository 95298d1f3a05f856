//=========================================================================
// Input Event Types
//
// Defines the unified, platform-agnostic event representation produced
// by every HID driver and drained by the framework's event loop.
//
// Responsibilities:
// - Represent pad, touch, and window/system notifications in one enum
// - Carry only the fields relevant to each kind of event
// - Keep logical button/axis names as stable `&'static str` values
//
// Event Flow:
// ```text
// Native HID services (libnx / libctru / winit)
//         ↓
//    Platform driver (diffs state per poll pass)
//         ↓
//    InputEvent (this module) → EventQueue
//         ↓
//    Consumer event loop (one event per poll)
// ```
//
//=========================================================================

//=== InputEvent ==========================================================

/// Unified input event produced by a platform driver.
///
/// Created during a poll pass, immutable once queued, and handed out by
/// value when dequeued.
///
/// # Naming contract
///
/// Button names (`"a"`, `"leftshoulder"`, `"dpup"`, ...) and axis names
/// (`"leftx"`, `"triggerright"`, ...) are consumed verbatim by scripting
/// bindings and must stay stable across releases.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pad at `which` became connected.
    GamepadAdded { which: usize },

    /// Pad at `which` became disconnected.
    GamepadRemoved { which: usize },

    /// Mapped button transitioned to pressed this frame.
    ///
    /// `button` is the logical (1-based) button index, `None` for entries
    /// without one (d-pad directions).
    GamepadButtonDown {
        which: usize,
        name: &'static str,
        button: Option<u8>,
    },

    /// Mapped button transitioned to released this frame.
    GamepadButtonUp {
        which: usize,
        name: &'static str,
        button: Option<u8>,
    },

    /// Analog axis changed.
    ///
    /// Sticks are divided by the platform's full-deflection value with up
    /// positive, so values sit near `[-1.0, 1.0]` but are not clamped (a raw
    /// Switch reading of -32768 gives slightly below -1.0); triggers
    /// report `1.0` on press and `0.0` on release.
    GamepadAxis {
        which: usize,
        axis: &'static str,
        number: u8,
        value: f32,
    },

    /// A touch id appeared.
    TouchPress(TouchEvent),

    /// An active touch id moved by a non-zero delta.
    TouchMoved(TouchEvent),

    /// A touch id disappeared. Delta and pressure are always zero.
    TouchRelease(TouchEvent),

    /// Application gained or lost focus.
    WindowFocusChanged { focused: bool },

    /// Display size changed (e.g. docked / handheld switch).
    WindowResized { width: u32, height: u32 },

    /// The OS reported memory pressure.
    LowMemory,

    /// The OS asked the application to close.
    Quit,
}

//=== TouchEvent ==========================================================

/// Payload shared by the three touch variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub pressure: f32,
}

//--- Implementation ------------------------------------------------------

impl InputEvent {
    /// Short, stable kind label (used in log output and tests).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GamepadAdded { .. } => "gamepadadded",
            Self::GamepadRemoved { .. } => "gamepadremoved",
            Self::GamepadButtonDown { .. } => "gamepadpressed",
            Self::GamepadButtonUp { .. } => "gamepadreleased",
            Self::GamepadAxis { .. } => "gamepadaxis",
            Self::TouchPress(_) => "touchpressed",
            Self::TouchMoved(_) => "touchmoved",
            Self::TouchRelease(_) => "touchreleased",
            Self::WindowFocusChanged { .. } => "focus",
            Self::WindowResized { .. } => "resize",
            Self::LowMemory => "lowmemory",
            Self::Quit => "quit",
        }
    }

    /// Returns the touch payload for touch variants.
    pub fn touch(&self) -> Option<&TouchEvent> {
        match self {
            Self::TouchPress(t) | Self::TouchMoved(t) | Self::TouchRelease(t) => Some(t),
            _ => None,
        }
    }

    /// Returns `true` for events produced by pad polling.
    pub fn is_gamepad(&self) -> bool {
        matches!(
            self,
            Self::GamepadAdded { .. }
                | Self::GamepadRemoved { .. }
                | Self::GamepadButtonDown { .. }
                | Self::GamepadButtonUp { .. }
                | Self::GamepadAxis { .. }
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
