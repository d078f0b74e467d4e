use crate::domain::{Container, Image, LogsOptions, PROJECT_LABEL, Pod, PsOptions};

/// How an operation talks to the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Wait for completion and return stdout
    Buffered,
    /// Relay stdout line by line, then wait
    Streamed,
}

/// Every podman call the client knows how to make.
///
/// Argument order follows the podman CLI exactly.
#[derive(Debug, Clone, Copy)]
pub enum PodmanOperation<'a> {
    Version,
    PodCreate(&'a Pod),
    PodRemove(&'a Pod),
    ImageId(&'a Image),
    ImagePull(&'a Image),
    ImagePush(&'a Image),
    ContainerStop {
        container: &'a Container,
        extra_args: &'a [String],
    },
    Logs {
        container: &'a Container,
        options: &'a LogsOptions,
    },
    Ps(&'a PsOptions),
}

impl PodmanOperation<'_> {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Version | Self::ImageId(_) => Mode::Buffered,
            _ => Mode::Streamed,
        }
    }

    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Version => vec!["--version".into()],
            Self::PodCreate(pod) => vec![
                "pod".into(),
                "create".into(),
                format!("--name={}", pod.name),
                format!("--share={}", pod.share),
            ],
            Self::PodRemove(pod) => vec!["pod".into(), "rm".into(), pod.name.clone()],
            Self::ImageId(image) => vec![
                "inspect".into(),
                "-t".into(),
                "image".into(),
                "-f".into(),
                "{{.Id}}".into(),
                image.name.clone(),
            ],
            Self::ImagePull(image) => vec!["pull".into(), image.name.clone()],
            Self::ImagePush(image) => vec!["push".into(), image.name.clone()],
            Self::ContainerStop {
                container,
                extra_args,
            } => {
                let mut args = Vec::with_capacity(extra_args.len() + 2);
                args.push("stop".into());
                args.extend(extra_args.iter().cloned());
                args.push(container.name.clone());
                args
            }
            Self::Logs { container, options } => {
                let mut args = vec!["logs".to_string()];
                if options.follow {
                    args.push("-f".into());
                }
                if options.timestamps {
                    args.push("-t".into());
                }
                if let Some(tail) = options.effective_tail() {
                    args.push("--tail".into());
                    args.push(tail.into());
                }
                args.push(container.name.clone());
                args
            }
            Self::Ps(options) => {
                let mut args = vec!["ps".to_string()];
                if options.all {
                    args.push("-a".into());
                }
                if options.quiet {
                    args.push("--format".into());
                    args.push("{{.ID}}".into());
                }
                if let Some(project) = options.project_filter() {
                    args.push("--filter".into());
                    args.push(format!("label={PROJECT_LABEL}={project}"));
                }
                args
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pod_create_args() {
        let pod = Pod::new("demo", "net");
        assert_eq!(
            PodmanOperation::PodCreate(&pod).args(),
            vec!["pod", "create", "--name=demo", "--share=net"]
        );
    }

    #[test]
    fn test_pod_remove_args() {
        let pod = Pod::new("demo", "net");
        assert_eq!(
            PodmanOperation::PodRemove(&pod).args(),
            vec!["pod", "rm", "demo"]
        );
    }

    #[test]
    fn test_image_id_args() {
        let image = Image::new("alpine:3.20");
        let op = PodmanOperation::ImageId(&image);
        assert_eq!(
            op.args(),
            vec!["inspect", "-t", "image", "-f", "{{.Id}}", "alpine:3.20"]
        );
        assert_eq!(op.mode(), Mode::Buffered);
    }

    #[test]
    fn test_stop_extra_args_before_name() {
        let container = Container::named("web");
        let extra = vec!["-t".to_string(), "5".to_string()];
        let op = PodmanOperation::ContainerStop {
            container: &container,
            extra_args: &extra,
        };
        assert_eq!(op.args(), vec!["stop", "-t", "5", "web"]);
        assert_eq!(op.mode(), Mode::Streamed);
    }

    #[test]
    fn test_stop_without_extra_args() {
        let container = Container::named("web");
        let op = PodmanOperation::ContainerStop {
            container: &container,
            extra_args: &[],
        };
        assert_eq!(op.args(), vec!["stop", "web"]);
    }

    #[test]
    fn test_logs_follow_with_tail() {
        let container = Container::named("web");
        let options = LogsOptions {
            follow: true,
            timestamps: false,
            tail: Some("10".into()),
        };
        let op = PodmanOperation::Logs {
            container: &container,
            options: &options,
        };
        assert_eq!(op.args(), vec!["logs", "-f", "--tail", "10", "web"]);
    }

    #[test]
    fn test_logs_tail_all_omitted() {
        let container = Container::named("web");
        let options = LogsOptions {
            follow: false,
            timestamps: true,
            tail: Some("all".into()),
        };
        let op = PodmanOperation::Logs {
            container: &container,
            options: &options,
        };
        assert_eq!(op.args(), vec!["logs", "-t", "web"]);
    }

    #[test]
    fn test_ps_plain() {
        let options = PsOptions::default();
        assert_eq!(PodmanOperation::Ps(&options).args(), vec!["ps"]);
    }

    #[test]
    fn test_ps_all_quiet_project() {
        let options = PsOptions {
            all: true,
            quiet: true,
            project: Some("demo".into()),
        };
        assert_eq!(
            PodmanOperation::Ps(&options).args(),
            vec![
                "ps",
                "-a",
                "--format",
                "{{.ID}}",
                "--filter",
                "label=io.podman.compose.project=demo"
            ]
        );
    }

    #[test]
    fn test_version_is_buffered() {
        assert_eq!(PodmanOperation::Version.args(), vec!["--version"]);
        assert_eq!(PodmanOperation::Version.mode(), Mode::Buffered);
    }
}
