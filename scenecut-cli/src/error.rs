// ============================================================================
// scenecut-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// The CLI reports everything through scenecut-core's CoreError so that a
// single `Error: <message>` line and exit code 1 cover every failure.
//
// KEY COMPONENTS:
// - CliResult: Type alias for CLI operations
// - CliErrorContext: Adds a context prefix to errors and missing values

use scenecut_core::{CoreError, CoreResult};

use std::fmt;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Extension trait for adding context to errors in the CLI.
pub trait CliErrorContext<T> {
    /// Add context to an error.
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", context, core_error))
        })
    }
}

impl<T> CliErrorContext<T> for Option<T> {
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.ok_or_else(|| CoreError::OperationFailed(context.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_context_prefixes_message() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        let err = result.cli_context("Writing shots.txt").unwrap_err();
        assert_eq!(err.to_string(), "Writing shots.txt: I/O error: disk full");

        let missing: Option<u8> = None;
        assert_eq!(
            missing.cli_context("no value").unwrap_err().to_string(),
            "no value"
        );
    }
}
