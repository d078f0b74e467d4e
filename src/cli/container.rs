use super::context::AppContext;
use crate::domain::{Container, LogsOptions, PsOptions};
use anyhow::{Result, bail};
use clap::Args;
use tracing::info;

#[derive(Args, Debug)]
pub struct StopArgs {
    /// Container name, or service name with --service
    pub name: String,
    /// Stop every registered container of the named service
    #[arg(long)]
    pub service: bool,
    /// Extra arguments passed to `podman stop` before the name
    #[arg(last = true)]
    pub extra: Vec<String>,
}

#[derive(Args, Debug)]
pub struct LogsArgs {
    pub name: String,
    /// Follow log output
    #[arg(short, long)]
    pub follow: bool,
    /// Show timestamps
    #[arg(short, long)]
    pub timestamps: bool,
    /// Number of lines from the end (`all` for everything)
    #[arg(long)]
    pub tail: Option<String>,
}

#[derive(Args, Debug)]
pub struct PsArgs {
    /// Show all containers, not only running ones
    #[arg(short, long)]
    pub all: bool,
    /// Only print container IDs
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn stop(args: StopArgs, ctx: &AppContext) -> Result<()> {
    if !args.service {
        let container = ctx
            .project
            .container(&args.name)
            .cloned()
            .unwrap_or_else(|| Container::named(args.name.clone()));
        ctx.client.container_stop(&container, &args.extra)?;
        return Ok(());
    }

    if ctx.project.service(&args.name).is_none() {
        bail!("service '{}' is not declared in the config", args.name);
    }

    let containers = ctx.project.containers_for(&args.name);
    if containers.is_empty() {
        info!("service {} has no registered containers", args.name);
        return Ok(());
    }

    for container in containers {
        ctx.client.container_stop(container, &args.extra)?;
    }
    Ok(())
}

pub fn logs(args: LogsArgs, ctx: &AppContext) -> Result<()> {
    let options = LogsOptions {
        follow: args.follow,
        timestamps: args.timestamps,
        tail: args.tail,
    };
    ctx.client.logs(&Container::named(args.name), &options)?;
    Ok(())
}

pub fn ps(args: PsArgs, ctx: &AppContext) -> Result<()> {
    let options = PsOptions {
        all: args.all,
        quiet: args.quiet,
        project: ctx.project_filter(),
    };
    ctx.client.ps(&options)?;
    Ok(())
}
