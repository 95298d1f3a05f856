//=========================================================================
// String Map
//=========================================================================
//
// Bidirectional name ↔ value lookup over a static constant table.
//
//=========================================================================

/// Read-only view over a `(name, value)` table.
///
/// Lookups are linear and case-sensitive; tables are small and fixed.
#[derive(Debug, Clone, Copy)]
pub struct StringMap<T: 'static> {
    entries: &'static [(&'static str, T)],
}

impl<T: Copy + PartialEq> StringMap<T> {
    pub const fn new(entries: &'static [(&'static str, T)]) -> Self {
        Self { entries }
    }

    /// Value registered under `name`.
    pub fn find_value(&self, name: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    /// First name registered for `value`.
    pub fn find_name(&self, value: T) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, candidate)| *candidate == value)
            .map(|(name, _)| *name)
    }

    /// All names in table order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Color {
        Red,
        Green,
        Blue,
    }

    const COLORS: StringMap<Color> =
        StringMap::new(&[("red", Color::Red), ("green", Color::Green), ("crimson", Color::Red)]);

    #[test]
    fn lookup_in_both_directions() {
        assert_eq!(COLORS.find_value("green"), Some(Color::Green));
        assert_eq!(COLORS.find_name(Color::Green), Some("green"));
    }

    #[test]
    fn first_alias_wins_for_reverse_lookup() {
        assert_eq!(COLORS.find_value("crimson"), Some(Color::Red));
        assert_eq!(COLORS.find_name(Color::Red), Some("red"));
    }

    #[test]
    fn misses_are_none() {
        assert_eq!(COLORS.find_value("Red"), None);
        assert_eq!(COLORS.find_name(Color::Blue), None);
    }

    #[test]
    fn names_keep_table_order() {
        assert_eq!(COLORS.names(), vec!["red", "green", "crimson"]);
        assert_eq!(COLORS.len(), 3);
        assert!(!COLORS.is_empty());
    }
}
