use crate::domain::Project;
use crate::infra::{ClientConfig, CommandExecutor, ConfigOverrides, RuntimeBinary, load_config};
use crate::services::PodmanClient;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Everything a command needs: the client and the session registry
#[derive(Debug)]
pub struct AppContext {
    pub client: PodmanClient,
    pub project: Project,
    pub config: ClientConfig,
}

impl AppContext {
    /// Loads config, applies overrides and resolves the binary once
    pub fn load(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = load_config(config_path)?;
        config.merge(overrides);

        let directory = std::env::current_dir().context("reading current directory")?;
        Self::from_config(config, &directory)
    }

    pub fn from_config(config: ClientConfig, directory: &Path) -> Result<Self> {
        let path = config.expanded_podman_path()?;
        let binary = RuntimeBinary::resolve(&path)
            .with_context(|| format!("resolving podman binary {path:?}"))?;
        debug!("using podman at {binary}");

        let executor = CommandExecutor::new(binary, config.dry_run);
        Self::with_executor(config, executor, directory)
    }

    /// Builds the context around an existing executor
    pub fn with_executor(
        config: ClientConfig,
        executor: CommandExecutor,
        directory: &Path,
    ) -> Result<Self> {
        let client =
            PodmanClient::from_executor(executor).with_pod_settle_delay(config.post_delay());
        let project = config.project(directory)?;

        Ok(Self {
            client,
            project,
            config,
        })
    }

    /// Project name used for the `ps` label filter, if one was configured.
    ///
    /// `ps` stays unfiltered without an explicit `project_name`, even though
    /// the registry name falls back to the directory name.
    pub fn project_filter(&self) -> Option<String> {
        self.config.project_name.clone()
    }

    pub fn is_dry_run(&self) -> bool {
        self.client.executor().is_dry_run()
    }
}
