use crate::domain::{CapturedOutput, ChildProcess, ExitState, LogSink, ProcessLauncher};
use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchKind {
    Output,
    Spawn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub kind: LaunchKind,
    pub program: String,
    pub args: Vec<String>,
}

/// Launcher double: records every launch and replays canned output.
///
/// Accepts any invocation and exits 0 unless told otherwise.
#[derive(Debug)]
pub struct MockLauncher {
    launches: RwLock<Vec<Launch>>,
    stdout: RwLock<Vec<u8>>,
    stderr: RwLock<String>,
    exit_code: RwLock<i32>,
    fail_launch: RwLock<bool>,
    fail_stdout: RwLock<bool>,
    waits: Arc<AtomicUsize>,
}

impl MockLauncher {
    pub fn new() -> Self {
        Self {
            launches: RwLock::new(Vec::new()),
            stdout: RwLock::new(Vec::new()),
            stderr: RwLock::new(String::new()),
            exit_code: RwLock::new(0),
            fail_launch: RwLock::new(false),
            fail_stdout: RwLock::new(false),
            waits: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn set_stdout(&self, stdout: &str) {
        self.set_stdout_bytes(stdout.as_bytes());
    }

    pub fn set_stdout_bytes(&self, stdout: &[u8]) {
        *self.stdout.write().unwrap() = stdout.to_vec();
    }

    /// Spawned children's stdout fails with `BrokenPipe` once the canned
    /// bytes are exhausted
    pub fn set_fail_stdout(&self, fail: bool) {
        *self.fail_stdout.write().unwrap() = fail;
    }

    /// How many times spawned children have been waited for
    pub fn wait_count(&self) -> usize {
        self.waits.load(Ordering::SeqCst)
    }

    pub fn set_stderr(&self, stderr: &str) {
        *self.stderr.write().unwrap() = stderr.to_string();
    }

    pub fn set_exit_code(&self, code: i32) {
        *self.exit_code.write().unwrap() = code;
    }

    pub fn set_fail_launch(&self, fail: bool) {
        *self.fail_launch.write().unwrap() = fail;
    }

    pub fn launches(&self) -> Vec<Launch> {
        self.launches.read().unwrap().clone()
    }

    pub fn last_args(&self) -> Option<Vec<String>> {
        self.launches.read().unwrap().last().map(|l| l.args.clone())
    }

    pub fn spawn_count(&self) -> usize {
        self.count(LaunchKind::Spawn)
    }

    pub fn output_count(&self) -> usize {
        self.count(LaunchKind::Output)
    }

    fn count(&self, kind: LaunchKind) -> usize {
        self.launches
            .read()
            .unwrap()
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }

    fn record(&self, kind: LaunchKind, program: &str, args: &[String]) -> io::Result<()> {
        self.launches.write().unwrap().push(Launch {
            kind,
            program: program.to_string(),
            args: args.to_vec(),
        });

        if *self.fail_launch.read().unwrap() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("mock launch failure: {program}"),
            ));
        }
        Ok(())
    }

    fn exit_state(&self) -> ExitState {
        ExitState::from_code(*self.exit_code.read().unwrap())
    }
}

impl Default for MockLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLauncher for MockLauncher {
    fn output(&self, program: &str, args: &[String]) -> io::Result<CapturedOutput> {
        self.record(LaunchKind::Output, program, args)?;

        Ok(CapturedOutput {
            status: self.exit_state(),
            stdout: self.stdout.read().unwrap().clone(),
            stderr: self.stderr.read().unwrap().clone().into_bytes(),
        })
    }

    fn spawn(&self, program: &str, args: &[String]) -> io::Result<Box<dyn ChildProcess>> {
        self.record(LaunchKind::Spawn, program, args)?;

        Ok(Box::new(MockChild {
            pid: 4242,
            stdout: Some(MockStdout {
                data: Cursor::new(self.stdout.read().unwrap().clone()),
                fail_at_end: *self.fail_stdout.read().unwrap(),
            }),
            exit: self.exit_state(),
            waits: self.waits.clone(),
        }))
    }
}

#[derive(Debug)]
struct MockStdout {
    data: Cursor<Vec<u8>>,
    fail_at_end: bool,
}

impl Read for MockStdout {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.read(buf)?;
        if n == 0 && self.fail_at_end {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"));
        }
        Ok(n)
    }
}

#[derive(Debug)]
struct MockChild {
    pid: u32,
    stdout: Option<MockStdout>,
    exit: ExitState,
    waits: Arc<AtomicUsize>,
}

impl ChildProcess for MockChild {
    fn id(&self) -> u32 {
        self.pid
    }

    fn take_stdout(&mut self) -> Option<Box<dyn Read + Send>> {
        self.stdout
            .take()
            .map(|stdout| Box::new(stdout) as Box<dyn Read + Send>)
    }

    fn wait(&mut self) -> io::Result<ExitState> {
        self.waits.fetch_add(1, Ordering::SeqCst);
        Ok(self.exit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEntry {
    Command(String),
    Output(String),
}

/// Sink that keeps everything in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: RwLock<Vec<SinkEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<SinkEntry> {
        self.entries.read().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                SinkEntry::Command(line) => Some(line.clone()),
                SinkEntry::Output(_) => None,
            })
            .collect()
    }

    pub fn output_lines(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                SinkEntry::Output(line) => Some(line.clone()),
                SinkEntry::Command(_) => None,
            })
            .collect()
    }
}

impl LogSink for MemorySink {
    fn command(&self, command_line: &str) {
        self.entries
            .write()
            .unwrap()
            .push(SinkEntry::Command(command_line.to_string()));
    }

    fn output(&self, line: &str) {
        self.entries
            .write()
            .unwrap()
            .push(SinkEntry::Output(line.to_string()));
    }
}
