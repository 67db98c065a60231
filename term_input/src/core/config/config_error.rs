// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::FLAGS_ENV_VAR;

/// Errors loading a [`DriverConfig`] from the environment.
///
/// [`DriverConfig`]: super::DriverConfig
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("Invalid driver flags {value:?} in ${env_var}")]
    #[diagnostic(
        code(r3bl_term_input::config::invalid_flags),
        help(
            "Use flag names joined by `|`, eg: `CTRL_I | NO_TERMINFO`, or a hex value \
             like `0x3`"
        )
    )]
    InvalidFlags {
        env_var: &'static str,
        value: String,
        #[source]
        source: bitflags::parser::ParseError,
    },
}

impl ConfigError {
    pub(super) fn invalid_flags(
        value: impl Into<String>,
        source: bitflags::parser::ParseError,
    ) -> Self {
        Self::InvalidFlags {
            env_var: FLAGS_ENV_VAR,
            value: value.into(),
            source,
        }
    }
}
