use crate::domain::{CapturedOutput, ChildProcess, ExitState, ProcessLauncher};
use std::io::{self, Read};
use std::process::{Child, Command, Stdio};

/// Launches real processes through `std::process`.
///
/// Streamed children inherit stderr so runtime diagnostics reach the
/// terminal directly; buffered calls capture it for error reports.
#[derive(Debug, Default)]
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessLauncher for SystemLauncher {
    fn output(&self, program: &str, args: &[String]) -> io::Result<CapturedOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        Ok(CapturedOutput {
            status: output.status.into(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn spawn(&self, program: &str, args: &[String]) -> io::Result<Box<dyn ChildProcess>> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        Ok(Box::new(SystemChild { child }))
    }
}

#[derive(Debug)]
struct SystemChild {
    child: Child,
}

impl ChildProcess for SystemChild {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn take_stdout(&mut self) -> Option<Box<dyn Read + Send>> {
        self.child
            .stdout
            .take()
            .map(|stdout| Box::new(stdout) as Box<dyn Read + Send>)
    }

    fn wait(&mut self) -> io::Result<ExitState> {
        self.child.wait().map(ExitState::from)
    }
}
