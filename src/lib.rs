pub mod cli;
pub mod domain;
pub mod error;
pub mod infra;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use domain::{Container, Image, LogsOptions, Pod, Project, PsOptions, Service};
pub use error::{PodmanError, Result};
pub use infra::{CommandExecutor, Invocation, ProcessHandle, RuntimeBinary};
pub use services::PodmanClient;
