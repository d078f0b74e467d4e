use crate::domain::ExitState;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving the runtime binary or driving it.
///
/// None of these are recovered internally; every typed operation hands
/// them back to the caller unchanged.
#[derive(Debug, Error)]
pub enum PodmanError {
    /// The configured binary path does not exist or cannot be inspected.
    #[error("binary {} has not been found: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The path exists but is not a regular file.
    #[error("binary {} is not a regular file", .path.display())]
    InvalidBinary { path: PathBuf },

    /// The process could not be started.
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    /// A streamed process terminated unsuccessfully.
    #[error("`{command}` (pid {pid}) exited with {status}")]
    Exit {
        command: String,
        pid: u32,
        status: ExitState,
    },

    /// A buffered invocation failed to launch, exited non-zero, or hit an I/O error.
    #[error("`{command}` failed: {reason}")]
    Execution {
        command: String,
        reason: String,
        #[source]
        source: Option<io::Error>,
    },

    /// Runtime output did not match the expected format.
    #[error("expected output starting with {expected:?}, got {output:?}")]
    Parse {
        expected: &'static str,
        output: String,
    },
}

impl PodmanError {
    pub(crate) fn execution_io(command: &str, source: io::Error) -> Self {
        Self::Execution {
            command: command.to_string(),
            reason: source.to_string(),
            source: Some(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, PodmanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_error_message() {
        let err = PodmanError::Exit {
            command: "podman pod rm demo".into(),
            pid: 42,
            status: ExitState::from_code(125),
        };
        assert_eq!(
            err.to_string(),
            "`podman pod rm demo` (pid 42) exited with exit code 125"
        );
    }

    #[test]
    fn test_execution_io_keeps_source() {
        let err = PodmanError::execution_io(
            "podman --version",
            io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"),
        );
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("pipe closed"));
    }
}
