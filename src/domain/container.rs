/// A named group of containers sharing the listed namespaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pod {
    pub name: String,
    /// Comma-separated namespace list passed to `--share`
    pub share: String,
}

impl Pod {
    pub fn new(name: impl Into<String>, share: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            share: share.into(),
        }
    }
}

/// Image reference, e.g. `docker.io/library/alpine:3.20`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub name: String,
}

impl Image {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A container known to the session.
///
/// `service` is the name of the owning [`Service`]; the [`super::Project`]
/// registry resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    pub service: String,
}

impl Container {
    pub fn new(name: impl Into<String>, service: &Service) -> Self {
        Self {
            name: name.into(),
            service: service.name.clone(),
        }
    }

    /// A container with no service label, for ad-hoc calls by name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            service: String::new(),
        }
    }
}
