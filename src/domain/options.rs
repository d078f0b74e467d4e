/// Flags for `podman logs`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogsOptions {
    pub follow: bool,
    pub timestamps: bool,
    /// Number of trailing lines; `None`, empty or `"all"` shows everything
    pub tail: Option<String>,
}

impl LogsOptions {
    /// The tail value to pass, if any
    pub fn effective_tail(&self) -> Option<&str> {
        self.tail
            .as_deref()
            .filter(|tail| !tail.is_empty() && *tail != "all")
    }
}

/// Flags for `podman ps`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PsOptions {
    /// Include stopped containers
    pub all: bool,
    /// Print container IDs only
    pub quiet: bool,
    /// Restrict to containers labelled with this compose project
    pub project: Option<String>,
}

impl PsOptions {
    pub fn project_filter(&self) -> Option<&str> {
        self.project.as_deref().filter(|name| !name.is_empty())
    }
}
