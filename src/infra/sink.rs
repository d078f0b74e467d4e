use crate::domain::LogSink;
use tracing::info;

/// Default sink: everything goes through `tracing`.
///
/// Relayed process lines use the `podcompose::output` target so they can be
/// filtered separately with `RUST_LOG`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn command(&self, command_line: &str) {
        info!("podman cmd: {command_line}");
    }

    fn output(&self, line: &str) {
        info!(target: "podcompose::output", "{line}");
    }
}
