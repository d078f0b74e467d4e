use super::{Container, Pod, PsOptions, Service};
use anyhow::{Result, bail};
use std::collections::HashMap;
use std::path::PathBuf;

/// Label podman-compose attaches to every container of a project
pub const PROJECT_LABEL: &str = "io.podman.compose.project";

/// In-memory registry of the pods, services and containers of one session.
///
/// Nothing here is reconciled with the runtime: after external changes the
/// registry may be stale, and podman stays the source of truth.
#[derive(Debug, Clone, Default)]
pub struct Project {
    /// Project name, used for the compose label filter
    pub name: String,
    /// Directory the project was loaded from
    pub directory: PathBuf,
    pods: HashMap<String, Pod>,
    services: HashMap<String, Service>,
    containers: HashMap<String, Container>,
}

impl Project {
    pub fn new(name: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
            ..Default::default()
        }
    }

    /// `io.podman.compose.project=<name>`
    pub fn project_label(&self) -> String {
        format!("{PROJECT_LABEL}={}", self.name)
    }

    /// Listing options scoped to this project
    pub fn ps_options(&self, all: bool, quiet: bool) -> PsOptions {
        PsOptions {
            all,
            quiet,
            project: Some(self.name.clone()),
        }
    }

    /// Registers a pod, replacing any previous pod with the same name
    pub fn add_pod(&mut self, pod: Pod) -> Option<Pod> {
        self.pods.insert(pod.name.clone(), pod)
    }

    pub fn add_service(&mut self, service: Service) -> Option<Service> {
        self.services.insert(service.name.clone(), service)
    }

    /// Registers a container. Its service must already be known.
    pub fn add_container(&mut self, container: Container) -> Result<Option<Container>> {
        if !self.services.contains_key(&container.service) {
            bail!(
                "container {} references unknown service '{}'",
                container.name,
                container.service
            );
        }
        Ok(self.containers.insert(container.name.clone(), container))
    }

    pub fn pod(&self, name: &str) -> Option<&Pod> {
        self.pods.get(name)
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    pub fn container(&self, name: &str) -> Option<&Container> {
        self.containers.get(name)
    }

    pub fn service_of(&self, container: &Container) -> Option<&Service> {
        self.services.get(&container.service)
    }

    /// Containers belonging to `service`, sorted by name
    pub fn containers_for(&self, service: &str) -> Vec<&Container> {
        let mut found: Vec<&Container> = self
            .containers
            .values()
            .filter(|c| c.service == service)
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    pub fn pods(&self) -> impl Iterator<Item = &Pod> {
        self.pods.values()
    }

    pub fn remove_pod(&mut self, name: &str) -> Option<Pod> {
        self.pods.remove(name)
    }

    pub fn remove_container(&mut self, name: &str) -> Option<Container> {
        self.containers.remove(name)
    }
}
