// Process exit codes.
//
// User-facing outcomes (unknown diagram, unexpected HTTP status, filter
// miss) are not errors and exit with `Success`. Usage errors are reported
// by clap with its own exit code 2.

use crate::api::ApiError;
use crate::commands::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    /// Configuration could not be loaded, or another unclassified failure.
    GeneralError = 1,

    /// Transport failure, undecodable response, or invalid request body.
    ApiFailure = 86,
}

impl ExitCode {
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    /// Classify an error bubbled up to `main`.
    pub fn for_error(err: &anyhow::Error) -> Self {
        if let Some(cmd_err) = err.downcast_ref::<CommandError>() {
            return ExitCode::from(cmd_err);
        }
        if err.downcast_ref::<ApiError>().is_some() {
            return ExitCode::ApiFailure;
        }
        ExitCode::GeneralError
    }
}

impl From<&CommandError> for ExitCode {
    fn from(err: &CommandError) -> Self {
        match err {
            CommandError::Api(_) => ExitCode::ApiFailure,
            CommandError::Output(_) => ExitCode::GeneralError,
        }
    }
}
