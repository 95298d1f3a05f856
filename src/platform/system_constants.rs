//=========================================================================
// 3DS System Constants
//=========================================================================
//
// Named system-configuration values (CFG service) and their display
// names, exposed through `StringMap` tables.
//
// Discriminants match the raw libctru `CFG_*` codes.
//
//=========================================================================

use crate::core::StringMap;

//=== Language ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Language {
    Japanese = 0,
    English = 1,
    French = 2,
    German = 3,
    Italian = 4,
    Spanish = 5,
    SimplifiedChinese = 6,
    Korean = 7,
    Dutch = 8,
    Portuguese = 9,
    Russian = 10,
    TraditionalChinese = 11,
}

/// Display names of system languages. "Portugese" is the name games
/// already match on and is kept as spelled.
pub const LANGUAGES: StringMap<Language> = StringMap::new(&[
    ("Japanese", Language::Japanese),
    ("English", Language::English),
    ("French", Language::French),
    ("German", Language::German),
    ("Italian", Language::Italian),
    ("Spanish", Language::Spanish),
    ("Simplified Chinese", Language::SimplifiedChinese),
    ("Korean", Language::Korean),
    ("Dutch", Language::Dutch),
    ("Portugese", Language::Portuguese),
    ("Russian", Language::Russian),
    ("Traditional Chinese", Language::TraditionalChinese),
]);

//=== SystemModel =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SystemModel {
    Original = 0,
    Xl = 1,
    New = 2,
    TwoDs = 3,
    NewXl = 4,
    NewTwoDsXl = 5,
}

pub const MODELS: StringMap<SystemModel> = StringMap::new(&[
    ("3DS", SystemModel::Original),
    ("3DSXL", SystemModel::Xl),
    ("New 3DS", SystemModel::New),
    ("2DS", SystemModel::TwoDs),
    ("New 3DSXL", SystemModel::NewXl),
    ("New 2DSXL", SystemModel::NewTwoDsXl),
]);

impl SystemModel {
    /// "New" hardware (faster CPU, C-stick, ZL/ZR).
    pub fn is_new(self) -> bool {
        matches!(self, Self::New | Self::NewXl | Self::NewTwoDsXl)
    }
}

//=== Region ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Region {
    Japan = 0,
    UnitedStates = 1,
    Europe = 2,
    Australia = 3,
    China = 4,
    Korea = 5,
    Taiwan = 6,
}

pub const REGIONS: StringMap<Region> = StringMap::new(&[
    ("Japan", Region::Japan),
    ("United States", Region::UnitedStates),
    ("Europe", Region::Europe),
    ("Australia", Region::Australia),
    ("China", Region::China),
    ("Korea", Region::Korea),
    ("Taiwan", Region::Taiwan),
]);

//=== Raw Codes ===========================================================

macro_rules! impl_from_raw {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $ty {
            /// Converts a raw CFG code; unknown codes yield `None`.
            pub fn from_raw(code: u8) -> Option<Self> {
                [$(Self::$variant),+].into_iter().find(|value| *value as u8 == code)
            }

            pub fn raw(self) -> u8 {
                self as u8
            }
        }
    };
}

impl_from_raw!(Language {
    Japanese, English, French, German, Italian, Spanish,
    SimplifiedChinese, Korean, Dutch, Portuguese, Russian, TraditionalChinese,
});
impl_from_raw!(SystemModel { Original, Xl, New, TwoDs, NewXl, NewTwoDsXl });
impl_from_raw!(Region { Japan, UnitedStates, Europe, Australia, China, Korea, Taiwan });

//=========================================================================
// Unit Tests
//=========================================================================
