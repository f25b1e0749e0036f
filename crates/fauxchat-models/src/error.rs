//! Error types for the `fauxchat-models` crate.
//!
//! All fallible constructors and the organizer entry point return variants
//! of [`ModelError`].

/// Errors produced when constructing model types or running the organizer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A clock value was not a well-formed "HH:MM" time.
    #[error("invalid clock time \"{value}\": {reason}")]
    InvalidClockTime {
        /// The value that failed validation.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// A battery level was outside the 0–100 range.
    #[error("invalid battery level {value}: {reason}")]
    InvalidBatteryLevel {
        /// The value that failed validation.
        value: u16,
        /// Human-readable explanation.
        reason: String,
    },

    /// A pasted script contained no non-blank lines.
    #[error("script is empty after trimming")]
    EmptyScript,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_clock_time() {
        let err = ModelError::InvalidClockTime {
            value: "25:99".into(),
            reason: "must be HH:MM with hours 00-23 and minutes 00-59".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid clock time \"25:99\": must be HH:MM with hours 00-23 and minutes 00-59"
        );
    }

    #[test]
    fn error_display_battery_level() {
        let err = ModelError::InvalidBatteryLevel {
            value: 150,
            reason: "must be between 0 and 100".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid battery level 150: must be between 0 and 100"
        );
    }

    #[test]
    fn error_display_empty_script() {
        assert_eq!(
            ModelError::EmptyScript.to_string(),
            "script is empty after trimming"
        );
    }
}
