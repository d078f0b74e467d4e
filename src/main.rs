use anyhow::Result;
use clap::{Parser, Subcommand};
use podcompose::cli::{self, AppContext, ImageCommand, LogsArgs, PodCommand, PsArgs, StopArgs};
use podcompose::infra::ConfigOverrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "podcompose",
    version,
    about = "Drives podman to manage pods, images and containers"
)]
struct Cli {
    /// Config file (default: ./podcompose.toml if present)
    #[arg(long, env = "PODCOMPOSE_CONFIG")]
    config: Option<PathBuf>,

    /// podman binary: bare `podman` or a path to an executable
    #[arg(long, env = "PODCOMPOSE_PODMAN_PATH")]
    podman_path: Option<String>,

    /// Log commands without running them
    #[arg(long, env = "PODCOMPOSE_DRY_RUN")]
    dry_run: bool,

    /// Compose project name, used to filter `ps`
    #[arg(short, long, env = "PODCOMPOSE_PROJECT")]
    project: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the podman version
    Version,
    /// Check the podman binary and configuration
    Doctor,
    /// Create or remove pods
    Pod(PodCommand),
    /// Pull, push or inspect images
    Image(ImageCommand),
    /// Stop a container
    Stop(StopArgs),
    /// Show container logs
    Logs(LogsArgs),
    /// List containers
    Ps(PsArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let overrides = ConfigOverrides {
        podman_path: cli.podman_path,
        dry_run: cli.dry_run,
        project_name: cli.project,
    };
    let ctx = AppContext::load(cli.config.as_deref(), overrides)?;

    match cli.command {
        Commands::Version => {
            println!("{}", ctx.client.get_version()?);
            Ok(())
        }
        Commands::Doctor => cli::doctor::run(&ctx),
        Commands::Pod(cmd) => cli::pod::run(cmd, &ctx),
        Commands::Image(cmd) => cli::image::run(cmd, &ctx),
        Commands::Stop(args) => cli::container::stop(args, &ctx),
        Commands::Logs(args) => cli::container::logs(args, &ctx),
        Commands::Ps(args) => cli::container::ps(args, &ctx),
    }
}
