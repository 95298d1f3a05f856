//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_hid::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Configuration
pub use crate::config::{DriverBuilder, DriverConfig};

// Driver contract and events
pub use crate::core::{GamepadRegistry, InputDriver, InputEvent, JoystickRegistry, Platform, TouchEvent};

// Driver selection and native seam
pub use crate::platform::{build_driver, Backend, NativeServices, SystemMessage};

// Desktop pump
pub use crate::platform::desktop::{window_channel, WindowMessage, WindowPump};

// Errors
pub use crate::error::{ConfigError, DriverError, NativeError};
