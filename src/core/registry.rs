//=========================================================================
// Gamepad Registry
//=========================================================================
//
// Logical pad indices → gamepad objects.
//
// Drivers consume the registry through the `GamepadRegistry` trait: they
// look up the active pad once per poll pass and refresh its native pad
// handle, but never change registry membership.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::stick::StickPosition;

//=== PadState ============================================================

/// Native pad handle: connection flag, button words, raw sticks.
///
/// Backends refresh it through [`PadState::latch`], which keeps the
/// previous button word so edges can be derived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PadState {
    connected: bool,
    buttons_cur: u64,
    buttons_old: u64,
    sticks: [StickPosition; 2],
}

impl PadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a fresh native sample, shifting current buttons to old.
    ///
    /// A disconnected pad reports no buttons held.
    pub fn latch(&mut self, connected: bool, buttons: u64, sticks: [StickPosition; 2]) {
        self.buttons_old = self.buttons_cur;
        self.buttons_cur = if connected { buttons } else { 0 };
        self.connected = connected;
        self.sticks = sticks;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Buttons held in the latest sample.
    pub fn buttons(&self) -> u64 {
        self.buttons_cur
    }

    /// Buttons held in the sample before the latest one.
    pub fn previous_buttons(&self) -> u64 {
        self.buttons_old
    }

    pub fn sticks(&self) -> [StickPosition; 2] {
        self.sticks
    }
}

//=== Gamepad =============================================================

/// A registered pad and its native handle.
#[derive(Debug, Clone)]
pub struct Gamepad {
    id: usize,
    pad: PadState,
}

impl Gamepad {
    pub fn new(id: usize) -> Self {
        Self { id, pad: PadState::new() }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_connected(&self) -> bool {
        self.pad.is_connected()
    }

    pub fn pad_state(&self) -> &PadState {
        &self.pad
    }

    pub fn pad_state_mut(&mut self) -> &mut PadState {
        &mut self.pad
    }
}

//=== GamepadRegistry =====================================================

/// Lookup contract drivers consume.
pub trait GamepadRegistry {
    /// Pad at logical `index`, or `None` if nothing is registered there.
    fn joystick_from_id(&mut self, index: usize) -> Option<&mut Gamepad>;

    fn joystick_count(&self) -> usize;
}

//=== JoystickRegistry ====================================================

/// In-memory registry holding active pads in index order.
///
/// Removing a pad compacts the list, so later pads shift down one index.
#[derive(Debug, Default)]
pub struct JoystickRegistry {
    active: Vec<Gamepad>,
}

impl JoystickRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pad with native id `id`, returning the existing entry
    /// if it is already registered.
    pub fn add_gamepad(&mut self, id: usize) -> &mut Gamepad {
        let index = match self.index_of(id) {
            Some(index) => index,
            None => {
                debug!(target: "platform::input", "Registered gamepad {}", id);
                self.active.push(Gamepad::new(id));
                self.active.len() - 1
            }
        };
        &mut self.active[index]
    }

    /// Unregisters the pad with native id `id`.
    pub fn remove_gamepad(&mut self, id: usize) -> Option<Gamepad> {
        let index = self.index_of(id)?;
        debug!(target: "platform::input", "Unregistered gamepad {}", id);
        Some(self.active.remove(index))
    }

    /// Logical index of the pad with native id `id`.
    pub fn index_of(&self, id: usize) -> Option<usize> {
        self.active.iter().position(|pad| pad.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Gamepad> {
        self.active.iter()
    }
}

impl GamepadRegistry for JoystickRegistry {
    fn joystick_from_id(&mut self, index: usize) -> Option<&mut Gamepad> {
        self.active.get_mut(index)
    }

    fn joystick_count(&self) -> usize {
        self.active.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_shifts_previous_buttons() {
        let mut pad = PadState::new();
        pad.latch(true, 0b01, [StickPosition::CENTER; 2]);
        pad.latch(true, 0b10, [StickPosition::new(3, 4), StickPosition::CENTER]);

        assert_eq!(pad.previous_buttons(), 0b01);
        assert_eq!(pad.buttons(), 0b10);
        assert_eq!(pad.sticks()[0], StickPosition::new(3, 4));
    }

    #[test]
    fn disconnected_pad_reports_no_buttons() {
        let mut pad = PadState::new();
        pad.latch(true, 0b11, [StickPosition::CENTER; 2]);
        pad.latch(false, 0b11, [StickPosition::CENTER; 2]);

        assert!(!pad.is_connected());
        assert_eq!(pad.buttons(), 0);
        assert_eq!(pad.previous_buttons(), 0b11);
    }

    #[test]
    fn add_is_idempotent() {
        let mut registry = JoystickRegistry::new();
        registry.add_gamepad(7);
        registry.add_gamepad(7);

        assert_eq!(registry.joystick_count(), 1);
        assert_eq!(registry.index_of(7), Some(0));
    }

    #[test]
    fn lookup_by_index() {
        let mut registry = JoystickRegistry::new();
        registry.add_gamepad(4);
        registry.add_gamepad(9);

        assert_eq!(registry.joystick_from_id(1).map(|pad| pad.id()), Some(9));
        assert!(registry.joystick_from_id(2).is_none());
    }

    #[test]
    fn removal_compacts_indices() {
        let mut registry = JoystickRegistry::new();
        registry.add_gamepad(0);
        registry.add_gamepad(1);
        registry.add_gamepad(2);

        assert_eq!(registry.remove_gamepad(1).map(|pad| pad.id()), Some(1));
        assert!(registry.remove_gamepad(1).is_none());
        assert_eq!(registry.index_of(2), Some(1));
        assert_eq!(registry.iter().map(Gamepad::id).collect::<Vec<_>>(), vec![0, 2]);
    }
}
