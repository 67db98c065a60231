// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// Creates a file appender that never rotates.
///
/// Note that if you wrap this up in a non blocking writer, as shown below, the guard
/// has to be kept alive for the lifetime of the app, otherwise nothing is written:
///
/// ```ignore
/// tracing_appender::non_blocking(try_create_rolling_file_appender("foo")?);
/// ```
///
/// # Errors
///
/// Returns an error if `path_str` has no parent folder or no file name.
pub fn try_create_rolling_file_appender(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let parent = path.parent().ok_or_else(|| {
        miette::miette!(
            "Can't access current folder {}. It might not exist, or don't have required permissions.",
            path.display()
        )
    })?;

    let file_stem = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't access file name {}. It might not exist, or don't have required permissions.",
            path.display()
        )
    })?;

    Ok(tracing_appender::rolling::never(parent, file_stem))
}

#[cfg(test)]
mod tests_rolling_file_appender {
    use super::*;

    #[test]
    fn test_path_without_file_name_is_rejected() {
        assert!(try_create_rolling_file_appender("/").is_err());
    }
}
