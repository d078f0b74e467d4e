use super::locator::RuntimeBinary;
use super::process::SystemLauncher;
use super::sink::TracingSink;
use crate::domain::{ChildProcess, ExitState, LogSink, ProcessLauncher};
use crate::error::{PodmanError, Result};
use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// One streamed execution: arguments, whether to wait, and how long to
/// pause afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub args: Vec<String>,
    pub wait: bool,
    /// Fixed pause after completion so asynchronous runtime state can
    /// settle. This is not a readiness check.
    pub post_delay: Duration,
}

impl Invocation {
    /// Waits for completion, no post delay
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            wait: true,
            post_delay: Duration::ZERO,
        }
    }

    /// Return once stdout is drained without reaping the process
    pub fn no_wait(mut self) -> Self {
        self.wait = false;
        self
    }

    pub fn with_post_delay(mut self, delay: Duration) -> Self {
        self.post_delay = delay;
        self
    }
}

/// A launched process. The child is reaped on drop if nobody waited for it.
pub struct ProcessHandle {
    child: Box<dyn ChildProcess>,
    status: Option<ExitState>,
}

impl ProcessHandle {
    fn new(child: Box<dyn ChildProcess>) -> Self {
        Self {
            child,
            status: None,
        }
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Exit state, if the process has been waited for
    pub fn status(&self) -> Option<ExitState> {
        self.status
    }

    pub fn wait(&mut self) -> io::Result<ExitState> {
        if let Some(status) = self.status {
            return Ok(status);
        }
        let status = self.child.wait()?;
        self.status = Some(status);
        Ok(status)
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.child.id())
            .field("status", &self.status)
            .finish()
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        if self.status.is_some() {
            return;
        }
        if let Err(err) = self.child.wait() {
            debug!("failed to reap pid {}: {err}", self.child.id());
        }
    }
}

/// Runs the podman binary, either buffering its output or relaying it line
/// by line to a [`LogSink`].
///
/// Every command line is sent to the sink before anything is launched, dry
/// run or not.
pub struct CommandExecutor {
    binary: RuntimeBinary,
    dry_run: bool,
    sink: Arc<dyn LogSink>,
    launcher: Arc<dyn ProcessLauncher>,
}

impl CommandExecutor {
    pub fn new(binary: RuntimeBinary, dry_run: bool) -> Self {
        Self {
            binary,
            dry_run,
            sink: Arc::new(TracingSink),
            launcher: Arc::new(SystemLauncher::new()),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_launcher(mut self, launcher: Arc<dyn ProcessLauncher>) -> Self {
        self.launcher = launcher;
        self
    }

    pub fn binary(&self) -> &RuntimeBinary {
        &self.binary
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Binary followed by each argument, single-space separated
    pub fn command_line(&self, args: &[String]) -> String {
        let mut line = self.binary.program();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Runs to completion and returns all of stdout, decoded lossily like
    /// streamed lines.
    ///
    /// Read-only queries go through here, so dry run does not apply.
    pub fn capture_output(&self, args: &[String]) -> Result<String> {
        let command = self.command_line(args);
        self.sink.command(&command);

        let output = self
            .launcher
            .output(&self.binary.program(), args)
            .map_err(|err| PodmanError::execution_io(&command, err))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let reason = if stderr.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {stderr}", output.status)
            };
            return Err(PodmanError::Execution {
                command,
                reason,
                source: None,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Launches the process and relays stdout to the sink as it arrives.
    ///
    /// Returns `None` in dry-run mode, where nothing is launched.
    pub fn run_streamed(&self, invocation: &Invocation) -> Result<Option<ProcessHandle>> {
        let command = self.command_line(&invocation.args);
        self.sink.command(&command);

        if self.dry_run {
            debug!("dry run: skipping `{command}`");
            return Ok(None);
        }

        let child = self
            .launcher
            .spawn(&self.binary.program(), &invocation.args)
            .map_err(|source| PodmanError::Launch {
                command: command.clone(),
                source,
            })?;
        let mut handle = ProcessHandle::new(child);

        if let Some(stdout) = handle.child.take_stdout() {
            self.relay(stdout)
                .map_err(|err| PodmanError::execution_io(&command, err))?;
        }

        if invocation.wait {
            let status = handle
                .wait()
                .map_err(|err| PodmanError::execution_io(&command, err))?;
            if !status.success() {
                return Err(PodmanError::Exit {
                    command,
                    pid: handle.id(),
                    status,
                });
            }
        }

        if !invocation.post_delay.is_zero() {
            debug!("sleeping {:?} after `{command}`", invocation.post_delay);
            thread::sleep(invocation.post_delay);
        }

        Ok(Some(handle))
    }

    fn relay(&self, stdout: Box<dyn Read + Send>) -> io::Result<()> {
        let mut reader = BufReader::new(stdout);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }
            let line = String::from_utf8_lossy(&buf);
            self.sink.output(line.trim_end_matches(['\n', '\r']));
        }
    }
}

impl fmt::Debug for CommandExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandExecutor")
            .field("binary", &self.binary)
            .field("dry_run", &self.dry_run)
            .field("launcher", &self.launcher)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemorySink, MockLauncher, SinkEntry};

    fn executor(dry_run: bool) -> (CommandExecutor, Arc<MockLauncher>, Arc<MemorySink>) {
        let launcher = Arc::new(MockLauncher::new());
        let sink = Arc::new(MemorySink::new());
        let executor = CommandExecutor::new(RuntimeBinary::default(), dry_run)
            .with_launcher(launcher.clone())
            .with_sink(sink.clone());
        (executor, launcher, sink)
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_command_line_joins_with_single_space() {
        let (executor, _, _) = executor(false);
        let line = executor.command_line(&args(&["ps", "-a", "--format", "{{.ID}}"]));
        assert_eq!(line, "podman ps -a --format {{.ID}}");
        assert_eq!(
            executor.command_line(&args(&["ps", "-a", "--format", "{{.ID}}"])),
            line
        );
    }

    #[test]
    fn test_command_line_without_args() {
        let (executor, _, _) = executor(false);
        assert_eq!(executor.command_line(&[]), "podman");
    }

    #[test]
    fn test_dry_run_launches_nothing() {
        let (executor, launcher, sink) = executor(true);
        let handle = executor
            .run_streamed(&Invocation::new(["pod", "rm", "demo"]))
            .unwrap();

        assert!(handle.is_none());
        assert_eq!(launcher.spawn_count(), 0);
        assert_eq!(
            sink.entries(),
            vec![SinkEntry::Command("podman pod rm demo".into())]
        );
    }

    #[test]
    fn test_streamed_lines_relayed_in_order() {
        let (executor, launcher, sink) = executor(false);
        launcher.set_stdout("a\nb\n\nc");

        let handle = executor
            .run_streamed(&Invocation::new(["pull", "alpine"]))
            .unwrap()
            .unwrap();

        assert_eq!(handle.status(), Some(ExitState::from_code(0)));
        assert_eq!(sink.output_lines(), vec!["a", "b", "", "c"]);
        assert_eq!(launcher.spawn_count(), 1);
    }

    #[test]
    fn test_non_zero_exit_is_exit_error() {
        let (executor, launcher, _) = executor(false);
        launcher.set_exit_code(125);

        let err = executor
            .run_streamed(&Invocation::new(["pod", "rm", "ghost"]))
            .unwrap_err();

        match err {
            PodmanError::Exit {
                command, status, ..
            } => {
                assert_eq!(command, "podman pod rm ghost");
                assert_eq!(status.code(), Some(125));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_wait_skips_exit_check() {
        let (executor, launcher, _) = executor(false);
        launcher.set_exit_code(1);

        let mut handle = executor
            .run_streamed(&Invocation::new(["logs", "-f", "web"]).no_wait())
            .unwrap()
            .unwrap();

        assert_eq!(handle.status(), None);
        assert_eq!(handle.wait().unwrap().code(), Some(1));
    }

    #[test]
    fn test_spawn_failure_is_launch_error() {
        let (executor, launcher, _) = executor(false);
        launcher.set_fail_launch(true);

        let err = executor
            .run_streamed(&Invocation::new(["ps"]))
            .unwrap_err();
        assert!(matches!(err, PodmanError::Launch { .. }));
    }

    #[test]
    fn test_capture_output_returns_stdout() {
        let (executor, launcher, sink) = executor(true);
        launcher.set_stdout("podman version 5.2.0\n");

        let output = executor.capture_output(&args(&["--version"])).unwrap();

        assert_eq!(output, "podman version 5.2.0\n");
        assert_eq!(launcher.output_count(), 1);
        assert_eq!(
            sink.entries(),
            vec![SinkEntry::Command("podman --version".into())]
        );
    }

    #[test]
    fn test_capture_output_failure_includes_stderr() {
        let (executor, launcher, _) = executor(false);
        launcher.set_stdout("partial");
        launcher.set_stderr("Error: no such image\n");
        launcher.set_exit_code(125);

        let err = executor
            .capture_output(&args(&["inspect", "missing"]))
            .unwrap_err();

        match err {
            PodmanError::Execution { reason, .. } => {
                assert_eq!(reason, "exit code 125: Error: no such image");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_capture_output_replaces_invalid_utf8() {
        let (executor, launcher, _) = executor(false);
        launcher.set_stdout_bytes(b"sha256:ab\xffcd\n");

        let output = executor.capture_output(&args(&["inspect", "x"])).unwrap();

        assert_eq!(output, "sha256:ab\u{fffd}cd\n");
    }

    #[test]
    fn test_relay_failure_reaps_child_once() {
        let (executor, launcher, sink) = executor(false);
        launcher.set_stdout("a\n");
        launcher.set_fail_stdout(true);

        let err = executor
            .run_streamed(&Invocation::new(["pull", "x"]))
            .unwrap_err();

        match err {
            PodmanError::Execution {
                command, source, ..
            } => {
                assert_eq!(command, "podman pull x");
                assert_eq!(source.unwrap().kind(), io::ErrorKind::BrokenPipe);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(launcher.wait_count(), 1);
        assert_eq!(sink.output_lines(), vec!["a"]);
    }

    #[test]
    fn test_dropping_unwaited_handle_reaps_child() {
        let (executor, launcher, _) = executor(false);

        let handle = executor
            .run_streamed(&Invocation::new(["logs", "-f", "web"]).no_wait())
            .unwrap()
            .unwrap();
        assert_eq!(launcher.wait_count(), 0);

        drop(handle);
        assert_eq!(launcher.wait_count(), 1);
    }

    #[test]
    fn test_waited_handle_not_reaped_twice() {
        let (executor, launcher, _) = executor(false);

        let mut handle = executor
            .run_streamed(&Invocation::new(["ps"]))
            .unwrap()
            .unwrap();
        handle.wait().unwrap();
        drop(handle);

        assert_eq!(launcher.wait_count(), 1);
    }

    #[test]
    fn test_post_delay_applied() {
        let (executor, _, _) = executor(false);
        let start = std::time::Instant::now();
        executor
            .run_streamed(
                &Invocation::new(["pod", "create"]).with_post_delay(Duration::from_millis(20)),
            )
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
