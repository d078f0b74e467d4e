use super::context::AppContext;
use crate::domain::Pod;
use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;

#[derive(Args, Debug)]
pub struct PodCommand {
    #[command(subcommand)]
    pub action: PodAction,
}

#[derive(Subcommand, Debug)]
pub enum PodAction {
    /// Create a pod
    Create {
        name: String,
        /// Namespaces shared by the pod's containers (default from config, else `none`)
        #[arg(long)]
        share: Option<String>,
    },
    /// Remove a pod
    Rm { name: String },
}

pub fn run(cmd: PodCommand, ctx: &AppContext) -> Result<()> {
    match cmd.action {
        PodAction::Create { name, share } => {
            let pod = resolve_pod(ctx, &name, share);
            ctx.client.pod_create(&pod)?;
            if !ctx.is_dry_run() {
                info!("pod {} created (share={})", pod.name, pod.share);
            }
            Ok(())
        }
        PodAction::Rm { name } => {
            let pod = resolve_pod(ctx, &name, None);
            ctx.client.pod_remove(&pod)?;
            if !ctx.is_dry_run() {
                info!("pod {} removed", pod.name);
            }
            Ok(())
        }
    }
}

/// Declared pod from the registry, with `share` taking precedence
fn resolve_pod(ctx: &AppContext, name: &str, share: Option<String>) -> Pod {
    let declared = ctx.project.pod(name);
    let share = share
        .or_else(|| declared.map(|p| p.share.clone()))
        .unwrap_or_else(|| "none".to_string());
    Pod::new(name, share)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{ClientConfig, CommandExecutor, RuntimeBinary};
    use crate::test_support::MockLauncher;
    use std::path::Path;
    use std::sync::Arc;

    fn context(config: &str) -> (AppContext, Arc<MockLauncher>) {
        let launcher = Arc::new(MockLauncher::new());
        let executor =
            CommandExecutor::new(RuntimeBinary::default(), false).with_launcher(launcher.clone());
        let config: ClientConfig = toml::from_str(config).unwrap();
        let ctx = AppContext::with_executor(config, executor, Path::new("/srv/demo")).unwrap();
        (ctx, launcher)
    }

    #[test]
    fn test_create_uses_declared_share() {
        let (ctx, launcher) = context("[pods.demo]\nshare = \"net\"\n");
        let cmd = PodCommand {
            action: PodAction::Create {
                name: "demo".into(),
                share: None,
            },
        };
        run(cmd, &ctx).unwrap();
        assert_eq!(
            launcher.last_args().unwrap(),
            vec!["pod", "create", "--name=demo", "--share=net"]
        );
    }

    #[test]
    fn test_flag_overrides_declared_share() {
        let (ctx, launcher) = context("[pods.demo]\nshare = \"net\"\n");
        let cmd = PodCommand {
            action: PodAction::Create {
                name: "demo".into(),
                share: Some("ipc,uts".into()),
            },
        };
        run(cmd, &ctx).unwrap();
        assert_eq!(
            launcher.last_args().unwrap(),
            vec!["pod", "create", "--name=demo", "--share=ipc,uts"]
        );
    }

    #[test]
    fn test_undeclared_pod_shares_nothing() {
        let (ctx, launcher) = context("");
        let cmd = PodCommand {
            action: PodAction::Create {
                name: "scratch".into(),
                share: None,
            },
        };
        run(cmd, &ctx).unwrap();
        assert_eq!(
            launcher.last_args().unwrap(),
            vec!["pod", "create", "--name=scratch", "--share=none"]
        );
    }

    #[test]
    fn test_rm() {
        let (ctx, launcher) = context("");
        let cmd = PodCommand {
            action: PodAction::Rm {
                name: "demo".into(),
            },
        };
        run(cmd, &ctx).unwrap();
        assert_eq!(launcher.last_args().unwrap(), vec!["pod", "rm", "demo"]);
    }
}
