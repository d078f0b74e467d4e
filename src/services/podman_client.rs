use super::operation::{Mode, PodmanOperation};
use crate::domain::{Container, Image, LogsOptions, Pod, PsOptions};
use crate::error::{PodmanError, Result};
use crate::infra::{CommandExecutor, DEFAULT_BINARY, Invocation, RuntimeBinary};
use std::time::Duration;
use tracing::debug;

/// Text `podman --version` prints before the version number
pub const VERSION_PREFIX: &str = "podman version ";

/// Typed podman operations on top of a [`CommandExecutor`].
///
/// Errors from the executor are returned unchanged; nothing is retried.
#[derive(Debug)]
pub struct PodmanClient {
    executor: CommandExecutor,
    pod_settle: Duration,
}

impl PodmanClient {
    /// Resolves `path` once and builds a client around it
    pub fn new(path: &str, dry_run: bool) -> Result<Self> {
        let binary = RuntimeBinary::resolve(path)?;
        Ok(Self::from_executor(CommandExecutor::new(binary, dry_run)))
    }

    /// Bare `podman` from `PATH`, dry run off
    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_BINARY, false)
    }

    pub fn from_executor(executor: CommandExecutor) -> Self {
        Self {
            executor,
            pod_settle: Duration::ZERO,
        }
    }

    /// Fixed pause after `pod create` so the pod can settle
    pub fn with_pod_settle_delay(mut self, delay: Duration) -> Self {
        self.pod_settle = delay;
        self
    }

    pub fn executor(&self) -> &CommandExecutor {
        &self.executor
    }

    /// Raw `podman --version` output
    pub fn version_string(&self) -> Result<String> {
        self.run(PodmanOperation::Version)
    }

    /// Version number, e.g. `4.3.1`
    pub fn get_version(&self) -> Result<String> {
        parse_version(&self.version_string()?)
    }

    pub fn pod_create(&self, pod: &Pod) -> Result<()> {
        self.run(PodmanOperation::PodCreate(pod))?;
        Ok(())
    }

    pub fn pod_remove(&self, pod: &Pod) -> Result<()> {
        self.run(PodmanOperation::PodRemove(pod))?;
        Ok(())
    }

    /// Image ID with surrounding whitespace removed
    pub fn image_get_id(&self, image: &Image) -> Result<String> {
        let output = self.run(PodmanOperation::ImageId(image))?;
        Ok(output.trim().to_string())
    }

    pub fn image_pull(&self, image: &Image) -> Result<()> {
        self.run(PodmanOperation::ImagePull(image))?;
        Ok(())
    }

    pub fn image_push(&self, image: &Image) -> Result<()> {
        self.run(PodmanOperation::ImagePush(image))?;
        Ok(())
    }

    /// `extra_args` go between `stop` and the container name
    pub fn container_stop(&self, container: &Container, extra_args: &[String]) -> Result<()> {
        self.run(PodmanOperation::ContainerStop {
            container,
            extra_args,
        })?;
        Ok(())
    }

    pub fn logs(&self, container: &Container, options: &LogsOptions) -> Result<()> {
        self.run(PodmanOperation::Logs { container, options })?;
        Ok(())
    }

    pub fn ps(&self, options: &PsOptions) -> Result<()> {
        self.run(PodmanOperation::Ps(options))?;
        Ok(())
    }

    /// Buffered operations return stdout; streamed ones relay it and
    /// return an empty string.
    fn run(&self, op: PodmanOperation<'_>) -> Result<String> {
        match op.mode() {
            Mode::Buffered => self.executor.capture_output(&op.args()),
            Mode::Streamed => {
                let mut invocation = Invocation::new(op.args());
                if matches!(op, PodmanOperation::PodCreate(_)) {
                    invocation = invocation.with_post_delay(self.pod_settle);
                }
                self.executor.run_streamed(&invocation)?;
                Ok(String::new())
            }
        }
    }
}

/// Takes the text after [`VERSION_PREFIX`], without trailing whitespace
pub fn parse_version(output: &str) -> Result<String> {
    match output.split_once(VERSION_PREFIX) {
        Some((_, version)) => {
            let version = version.trim_end();
            debug!("podman version {version}");
            Ok(version.to_string())
        }
        None => Err(PodmanError::Parse {
            expected: VERSION_PREFIX,
            output: output.to_string(),
        }),
    }
}
