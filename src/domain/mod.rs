mod container;
mod options;
pub mod project;
pub mod traits;

pub use container::{Container, Image, Pod, Service};
pub use options::{LogsOptions, PsOptions};
pub use project::{PROJECT_LABEL, Project};
pub use traits::{CapturedOutput, ChildProcess, ExitState, LogSink, ProcessLauncher};
