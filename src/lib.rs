//=========================================================================
// Aetheric HID: Library Root
//
// Console input backends that translate native HID state (pads, touch
// screens, system messages) into one queue of `InputEvent`s.
//
// Responsibilities:
// - Expose the driver contract (`InputDriver`) and its event model
// - Provide the Switch, 3DS and desktop drivers under `platform`
// - Load driver settings from TOML (`config`)
//
// Typical usage:
// ```no_run
// use aetheric_hid::prelude::*;
//
// fn pump(driver: &mut dyn InputDriver, joysticks: &mut JoystickRegistry) {
//     while let Some(event) = driver.poll(joysticks) {
//         println!("{:?}", event);
//     }
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the platform-agnostic pieces: events, queue, button and
// touch tracking, the driver trait and the gamepad registry.
//
// `platform` holds one driver per target and the `NativeServices` seam
// the console drivers sample through.
//
pub mod config;
pub mod core;
pub mod error;
pub mod platform;
pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use crate::config::{DriverBuilder, DriverConfig};
pub use crate::core::{InputDriver, InputEvent, Platform};
pub use crate::error::{ConfigError, DriverError, NativeError};
pub use crate::platform::{build_driver, Backend};
