//=========================================================================
// Core Input Model
//
// Platform-agnostic building blocks shared by every HID driver.
//
// Responsibilities:
// - Define the unified `InputEvent` and its FIFO `EventQueue`
// - Model native button registers as edge/level snapshots
// - Track touches and sticks between poll passes
// - Define the driver contract (`InputDriver`) and its shared state
// - Describe the gamepad registry drivers consume
//
// Notes:
// Nothing in `core` talks to native services; the `platform` module
// feeds it samples and owns the per-console specifics.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod buttons;
pub mod driver;
pub mod event;
pub mod event_queue;
pub mod registry;
pub mod stick;
pub mod string_map;
pub mod touch;

//=== Public API ==========================================================

pub use buttons::{ButtonMapping, ButtonState};
pub use driver::{DriverCore, InputDriver, PadButtons, Platform, PollStage};
pub use event::{InputEvent, TouchEvent};
pub use event_queue::EventQueue;
pub use registry::{Gamepad, GamepadRegistry, JoystickRegistry, PadState};
pub use stick::{AxisSpec, StickPosition, StickTracker, TRIGGER_LEFT, TRIGGER_RIGHT};
pub use string_map::StringMap;
pub use touch::{TouchArena, TouchFrame, TouchPoint, TouchSample};
