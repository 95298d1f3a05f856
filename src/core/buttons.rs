//=========================================================================
// Button Model
//=========================================================================
//
// Edge/level snapshots of a native button register and the static tables
// that map register bits to stable logical button names.
//
// Architecture:
//   PadState (cur, old words) → ButtonState<K> → mapping walk → events
//
// `K` is a `bitflags` register type (`NpadButton`, `CtrKey`, ...). All
// registers are widened to `u64` so the base driver can expose raw masks.
//
//=========================================================================

//=== External Dependencies ===============================================

use bitflags::Flags;

//=== ButtonMapping =======================================================

/// One entry of a platform's button table.
///
/// Tables are `const` data; keys within one table are pairwise disjoint.
#[derive(Debug, Clone, Copy)]
pub struct ButtonMapping<K: 'static> {
    /// Stable logical name consumed by scripting bindings.
    pub name: &'static str,
    /// Native register bit(s) for this entry.
    pub key: K,
    /// Logical 1-based button index, `None` for d-pad entries.
    pub index: Option<u8>,
}

//=== ButtonState =========================================================

/// Per-pass snapshot of one button register.
///
/// `pressed`/`released` are this-frame edges, `held` is level state.
/// Built from the current and previous register words, so a bit can never
/// be both pressed and released in the same snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState<K> {
    pub pressed: K,
    pub released: K,
    pub held: K,
}

impl<K: Flags<Bits = u64> + Copy> ButtonState<K> {
    /// Snapshot with nothing pressed, released, or held.
    pub fn idle() -> Self {
        Self {
            pressed: K::from_bits_retain(0),
            released: K::from_bits_retain(0),
            held: K::from_bits_retain(0),
        }
    }

    /// Derives edges from the current and previous register words.
    pub fn from_words(current: u64, previous: u64) -> Self {
        Self {
            pressed: K::from_bits_retain(current & !previous),
            released: K::from_bits_retain(previous & !current),
            held: K::from_bits_retain(current),
        }
    }

    pub fn is_pressed(&self, key: K) -> bool {
        self.pressed.bits() & key.bits() != 0
    }

    pub fn is_released(&self, key: K) -> bool {
        self.released.bits() & key.bits() != 0
    }

    pub fn is_held(&self, key: K) -> bool {
        self.held.bits() & key.bits() != 0
    }

    /// Returns `true` if `key` had an edge in either direction.
    pub fn toggled(&self, key: K) -> bool {
        self.is_pressed(key) || self.is_released(key)
    }
}

//=== Table Helpers =======================================================

/// Number of leading entries that carry a logical index.
pub fn indexed_len<K>(table: &[ButtonMapping<K>]) -> usize {
    table.iter().take_while(|m| m.index.is_some()).count()
}

/// Resolves a 1-based logical index to a table entry.
///
/// Out-of-range indices are clamped into the indexed prefix rather than
/// rejected; legacy callers pass arbitrary values here.
pub fn clamp_logical<K>(table: &[ButtonMapping<K>], button: usize) -> Option<&ButtonMapping<K>> {
    let last = indexed_len(table).checked_sub(1)?;
    table.get(button.saturating_sub(1).min(last))
}

/// Returns `true` when no two entries share a register bit.
pub fn keys_disjoint<K: Flags<Bits = u64> + Copy>(table: &[ButtonMapping<K>]) -> bool {
    let mut seen = 0u64;
    for mapping in table {
        let bits = mapping.key.bits();
        if seen & bits != 0 {
            return false;
        }
        seen |= bits;
    }
    true
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bitflags::bitflags;

    bitflags! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        struct TestKey: u64 {
            const A = 1 << 0;
            const B = 1 << 1;
            const UP = 1 << 2;
        }
    }

    const TABLE: [ButtonMapping<TestKey>; 3] = [
        ButtonMapping { name: "a", key: TestKey::A, index: Some(1) },
        ButtonMapping { name: "b", key: TestKey::B, index: Some(2) },
        ButtonMapping { name: "dpup", key: TestKey::UP, index: None },
    ];

    #[test]
    fn edges_are_mutually_exclusive() {
        for current in 0..8u64 {
            for previous in 0..8u64 {
                let state = ButtonState::<TestKey>::from_words(current, previous);
                assert_eq!(state.pressed.bits() & state.released.bits(), 0);
            }
        }
    }

    #[test]
    fn from_words_detects_press_and_release() {
        let state = ButtonState::<TestKey>::from_words(0b001, 0b010);
        assert!(state.is_pressed(TestKey::A));
        assert!(state.is_released(TestKey::B));
        assert!(state.is_held(TestKey::A));
        assert!(!state.is_held(TestKey::B));
        assert!(state.toggled(TestKey::A));
        assert!(!state.toggled(TestKey::UP));
    }

    #[test]
    fn held_without_edge_is_not_toggled() {
        let state = ButtonState::<TestKey>::from_words(0b001, 0b001);
        assert!(state.is_held(TestKey::A));
        assert!(!state.toggled(TestKey::A));
    }

    #[test]
    fn idle_snapshot_is_empty() {
        let state = ButtonState::<TestKey>::idle();
        assert_eq!(state.held.bits(), 0);
        assert_eq!(state.pressed.bits(), 0);
    }

    #[test]
    fn logical_index_is_clamped() {
        assert_eq!(indexed_len(&TABLE), 2);
        assert_eq!(clamp_logical(&TABLE, 0).map(|m| m.name), Some("a"));
        assert_eq!(clamp_logical(&TABLE, 1).map(|m| m.name), Some("a"));
        assert_eq!(clamp_logical(&TABLE, 2).map(|m| m.name), Some("b"));
        assert_eq!(clamp_logical(&TABLE, 99).map(|m| m.name), Some("b"));
    }

    #[test]
    fn clamp_on_unindexed_table_is_none() {
        let table = [ButtonMapping { name: "dpup", key: TestKey::UP, index: None }];
        assert!(clamp_logical(&table, 1).is_none());
    }

    #[test]
    fn overlap_is_detected() {
        assert!(keys_disjoint(&TABLE));

        let overlapping = [
            ButtonMapping { name: "a", key: TestKey::A, index: Some(1) },
            ButtonMapping { name: "ab", key: TestKey::A | TestKey::B, index: Some(2) },
        ];
        assert!(!keys_disjoint(&overlapping));
    }
}
