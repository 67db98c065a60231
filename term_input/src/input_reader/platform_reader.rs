// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{RawEventReader, ReaderSetupError};
use crate::DriverConfig;

/// Opens the reader for the current platform's terminal input.
///
/// | Platform | Reader                         |
/// | :------- | :----------------------------- |
/// | unix     | [`MioStdinReader`] on stdin    |
/// | windows  | [`WindowsConsoleReader`]       |
///
/// This is the only place where the variant is picked.
///
/// # Errors
///
/// Returns [`ReaderSetupError`] when the OS resources backing the reader can't be
/// created.
///
/// [`MioStdinReader`]: super::MioStdinReader
/// [`WindowsConsoleReader`]: super::WindowsConsoleReader
pub fn open_platform_reader(
    config: &DriverConfig,
) -> Result<Box<dyn RawEventReader>, ReaderSetupError> {
    #[cfg(unix)]
    {
        let reader = super::MioStdinReader::from_stdin(config)?;
        Ok(Box::new(reader))
    }

    #[cfg(windows)]
    {
        // Console records bypass the byte decoder, so the key table config is unused.
        let _unused = config;
        let reader = super::WindowsConsoleReader::from_console_input()?;
        Ok(Box::new(reader))
    }
}
