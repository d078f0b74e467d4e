use super::locator::DEFAULT_BINARY;
use crate::domain::{Container, Pod, Project, Service};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "podcompose.toml";

/// Client settings read from `podcompose.toml`
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Bare `podman` or a path; `~` and `$VARS` are expanded
    pub podman_path: String,
    pub dry_run: bool,
    pub project_name: Option<String>,
    /// Pause after `pod create`, in milliseconds
    pub post_delay_ms: u64,
    pub pods: BTreeMap<String, PodConfig>,
    pub services: BTreeMap<String, ServiceConfig>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PodConfig {
    pub share: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    #[serde(default)]
    pub containers: Vec<String>,
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub podman_path: Option<String>,
    pub dry_run: bool,
    pub project_name: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            podman_path: DEFAULT_BINARY.to_string(),
            dry_run: false,
            project_name: None,
            post_delay_ms: 0,
            pods: BTreeMap::new(),
            services: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Applies overrides on top of file values
    pub fn merge(&mut self, overrides: ConfigOverrides) {
        if let Some(path) = overrides.podman_path {
            self.podman_path = path;
        }
        if overrides.dry_run {
            self.dry_run = true;
        }
        if let Some(name) = overrides.project_name {
            self.project_name = Some(name);
        }
    }

    /// `podman_path` with `~` and environment variables expanded
    pub fn expanded_podman_path(&self) -> Result<String> {
        let expanded = shellexpand::full(&self.podman_path)
            .with_context(|| format!("expanding podman_path {:?}", self.podman_path))?;
        Ok(expanded.into_owned())
    }

    pub fn post_delay(&self) -> Duration {
        Duration::from_millis(self.post_delay_ms)
    }

    /// Builds the session registry from the declared pods and services
    pub fn project(&self, directory: &Path) -> Result<Project> {
        let name = self.project_name.clone().unwrap_or_else(|| {
            directory
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        let mut project = Project::new(name, directory);

        for (pod_name, pod) in &self.pods {
            let share = pod.share.clone().unwrap_or_else(|| "none".to_string());
            project.add_pod(Pod::new(pod_name.clone(), share));
        }

        for service_name in self.services.keys() {
            project.add_service(Service::new(service_name.clone()));
        }

        for (service_name, service) in &self.services {
            let svc = Service::new(service_name.clone());
            for container in &service.containers {
                project.add_container(Container::new(container.clone(), &svc))?;
            }
        }

        Ok(project)
    }
}

/// Loads `path`, or `./podcompose.toml` when no path is given.
///
/// A missing default file yields the defaults; an explicit path must exist.
pub fn load_config(path: Option<&Path>) -> Result<ClientConfig> {
    let (config_path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from("./").join(DEFAULT_CONFIG_NAME), false),
    };

    if !required && !config_path.exists() {
        debug!("no config at {:?}, using defaults", config_path);
        return Ok(ClientConfig::default());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("reading config {:?}", config_path))?;
    let config: ClientConfig = toml::from_str(&content)
        .with_context(|| format!("parsing config {:?}", config_path))?;

    Ok(config)
}
