// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{ConfigError, DriverFlags};

/// Environment variable holding the terminal type hint.
pub const TERM_ENV_VAR: &str = "TERM";

/// Environment variable holding a [`DriverFlags`] expression, eg: `CTRL_I | NO_TERMINFO`.
pub const FLAGS_ENV_VAR: &str = "R3BL_TERM_INPUT_FLAGS";

/// Everything needed to build a [`KeyTable`] and open a platform reader.
///
/// [`KeyTable`]: crate::KeyTable
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DriverConfig {
    pub flags: DriverFlags,
    /// Terminal type hint (usually `$TERM`), used to pick terminfo supplements.
    pub term: Option<String>,
}

impl DriverConfig {
    #[must_use]
    pub fn new(flags: DriverFlags, term: Option<String>) -> Self { Self { flags, term } }

    /// Reads [`TERM_ENV_VAR`] and [`FLAGS_ENV_VAR`] from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFlags`] if [`FLAGS_ENV_VAR`] is set but can't be
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_values(
            std::env::var(TERM_ENV_VAR).ok(),
            std::env::var(FLAGS_ENV_VAR).ok(),
        )
    }

    /// Same as [`Self::from_env()`] but with the raw values passed in.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFlags`] if `flags` can't be parsed.
    pub fn from_env_values(
        term: Option<String>,
        flags: Option<String>,
    ) -> Result<Self, ConfigError> {
        let term = term.filter(|it| !it.trim().is_empty());
        let flags = match flags.as_deref().map(str::trim) {
            None | Some("") => DriverFlags::default(),
            Some(text) => bitflags::parser::from_str::<DriverFlags>(text)
                .map_err(|err| ConfigError::invalid_flags(text, err))?,
        };
        Ok(Self { flags, term })
    }
}

#[cfg(test)]
mod tests_driver_config {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    #[test]
    fn test_empty_values_use_defaults() {
        let config = DriverConfig::from_env_values(Some("  ".into()), Some(String::new()))
            .unwrap();
        assert_eq!(config, DriverConfig::default());
    }

    #[test]
    fn test_flag_names_are_parsed() {
        let config = DriverConfig::from_env_values(
            Some("xterm-256color".into()),
            Some("CTRL_I | NO_TERMINFO".into()),
        )
        .unwrap();
        assert_eq!(config.flags, DriverFlags::CTRL_I | DriverFlags::NO_TERMINFO);
        assert_eq!(config.term.as_deref(), Some("xterm-256color"));
    }

    #[test]
    fn test_hex_flags_are_parsed() {
        let config = DriverConfig::from_env_values(None, Some("0x3".into())).unwrap();
        assert_eq!(config.flags, DriverFlags::CTRL_AT | DriverFlags::CTRL_I);
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let result = DriverConfig::from_env_values(None, Some("CTRL_Q".into()));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidFlags { ref value, .. }) if value == "CTRL_Q"
        ));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        let saved_term = std::env::var(TERM_ENV_VAR).ok();
        unsafe {
            std::env::set_var(TERM_ENV_VAR, "linux");
            std::env::set_var(FLAGS_ENV_VAR, "NO_XTERM");
        }

        let config = DriverConfig::from_env().unwrap();

        unsafe {
            std::env::remove_var(FLAGS_ENV_VAR);
            match saved_term {
                Some(term) => std::env::set_var(TERM_ENV_VAR, term),
                None => std::env::remove_var(TERM_ENV_VAR),
            }
        }

        assert_eq!(config.term.as_deref(), Some("linux"));
        assert_eq!(config.flags, DriverFlags::NO_XTERM);
    }
}
