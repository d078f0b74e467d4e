use std::fmt::{self, Debug};
use std::io::{self, Read};
use std::process::ExitStatus;

/// How a process finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitState {
    code: Option<i32>,
}

impl ExitState {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// A process terminated by a signal has no exit code
    pub fn terminated() -> Self {
        Self { code: None }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ExitState {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ExitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => write!(f, "termination by signal"),
        }
    }
}

/// Everything a buffered invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub status: ExitState,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Line-oriented destination for command lines and relayed process output
pub trait LogSink: Send + Sync {
    /// Called once per invocation, before anything is launched
    fn command(&self, command_line: &str);

    /// Called for every line the process writes to stdout, in order
    fn output(&self, line: &str);
}

/// A process started by a [`ProcessLauncher`].
pub trait ChildProcess: Send + Sync + Debug {
    fn id(&self) -> u32;

    /// Takes the stdout pipe. Returns `None` once taken.
    fn take_stdout(&mut self) -> Option<Box<dyn Read + Send>>;

    fn wait(&mut self) -> io::Result<ExitState>;
}

/// Starts external processes on behalf of the executor
pub trait ProcessLauncher: Send + Sync + Debug {
    /// Runs to completion, capturing stdout and stderr
    fn output(&self, program: &str, args: &[String]) -> io::Result<CapturedOutput>;

    /// Starts the process with stdout attached to a pipe
    fn spawn(&self, program: &str, args: &[String]) -> io::Result<Box<dyn ChildProcess>>;
}
