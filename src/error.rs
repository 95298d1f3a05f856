//=========================================================================
// Error Types
//=========================================================================
//
// Failure taxonomy for the HID backends.
//
// Polling itself never surfaces errors: native read failures are logged
// and the affected update is skipped for that frame. These types cover
// native service reads, configuration loading, and driver construction.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::Platform;

//=== NativeError =========================================================

/// A native service query failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NativeError {
    /// The service was never initialized or is not present on this unit.
    #[error("{0} service unavailable")]
    Unavailable(&'static str),

    /// The service returned a failing result code.
    #[error("{service} failed with result {code:#010x}")]
    Failed { service: &'static str, code: u32 },
}

//=== ConfigError =========================================================

/// Configuration could not be loaded or is invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

//=== DriverError =========================================================

/// A driver could not be built from configuration.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("platform `{platform}` cannot run on a {backend} backend")]
    BackendMismatch {
        platform: Platform,
        backend: &'static str,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_error_formats_result_code() {
        let err = NativeError::Failed { service: "hid", code: 0x2a2 };
        assert_eq!(err.to_string(), "hid failed with result 0x000002a2");
        assert_eq!(NativeError::Unavailable("applet").to_string(), "applet service unavailable");
    }

    #[test]
    fn mismatch_names_both_sides() {
        let err = DriverError::BackendMismatch {
            platform: Platform::Desktop,
            backend: "native",
        };
        let text = err.to_string();
        assert!(text.contains("desktop"));
        assert!(text.contains("native"));
    }

    #[test]
    fn errors_implement_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<NativeError>();
        assert_error::<ConfigError>();
        assert_error::<DriverError>();
    }
}
