mod operation;
mod podman_client;

pub use crate::domain::{LogsOptions, PsOptions};
pub use operation::{Mode, PodmanOperation};
pub use podman_client::{PodmanClient, VERSION_PREFIX, parse_version};
