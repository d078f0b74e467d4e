use super::context::AppContext;
use anyhow::Result;
use tracing::{info, warn};

/// Reports where podman resolves to and whether it answers `--version`
pub fn run(ctx: &AppContext) -> Result<()> {
    let binary = ctx.client.executor().binary();
    info!("configured binary: {binary}");

    match binary.search_path() {
        Some(path) => info!("found at {}", path.display()),
        None => warn!("{binary} not found on PATH"),
    }

    match ctx.client.get_version() {
        Ok(version) => info!("podman {version}"),
        Err(err) => warn!("could not query version: {err}"),
    }

    if ctx.is_dry_run() {
        info!("dry run is enabled; streamed commands will only be logged");
    }

    info!(
        "project '{}' ({} pod(s) declared)",
        ctx.project.name,
        ctx.project.pods().count()
    );

    Ok(())
}
