//! Process execution behind a swappable runner.
//!
//! Every external tool call goes through [`CommandRunner`], so the bootstrap
//! flow can be driven by a scripted runner in tests and by [`SystemRunner`]
//! for real.

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Status reported when the program cannot be found on PATH (shell convention)
pub const NOT_FOUND_STATUS: i32 = 127;

/// How a child process is wired to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IoMode {
    /// Collect stdout/stderr, close stdin
    #[default]
    Capture,
    /// Stream stdout/stderr to the terminal, close stdin so prompts can't block
    Inherit,
    /// Inherit stdin, stdout and stderr
    Interactive,
}

/// A single external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
    pub io: IoMode,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            cwd: None,
            io: IoMode::default(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn io(mut self, mode: IoMode) -> Self {
        self.io = mode;
        self
    }

    /// True if any argument equals `needle`
    pub fn has_arg(&self, needle: &str) -> bool {
        self.args.iter().any(|a| a == needle)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.envs {
            write!(f, "{}={} ", key, value)?;
        }
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Exit status and captured streams of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn with_status(status: i32) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// Short human-readable description of what went wrong
    pub fn detail(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        format!("exit status {}", self.status)
    }
}

/// Runs external commands
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput> {
        (**self).run(spec)
    }
}

/// Runs commands as real child processes, blocking until each exits
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput> {
        let program = match which::which(&spec.program) {
            Ok(path) => path,
            // An explicit path that exists is spawned as-is so the OS error
            // (e.g. not executable) comes back as a spawn failure.
            Err(_) if is_existing_path(&spec.program) => PathBuf::from(&spec.program),
            Err(err) => {
                debug!(program = %spec.program, error = %err, "program not found");
                return Ok(ProcessOutput {
                    status: NOT_FOUND_STATUS,
                    stdout: String::new(),
                    stderr: format!("{}: command not found", spec.program),
                });
            }
        };

        let mut cmd = Command::new(&program);
        cmd.args(&spec.args);
        cmd.envs(spec.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if let Some(dir) = &spec.cwd {
            cmd.current_dir(dir);
        }

        debug!(command = %spec, path = %program.display(), "running");

        let output = match spec.io {
            IoMode::Capture => {
                let out = cmd
                    .stdin(Stdio::null())
                    .output()
                    .with_context(|| format!("Failed to run `{}`", spec))?;
                ProcessOutput {
                    status: out.status.code().unwrap_or(-1),
                    stdout: String::from_utf8_lossy(&out.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&out.stderr).to_string(),
                }
            }
            IoMode::Inherit => {
                let status = cmd
                    .stdin(Stdio::null())
                    .status()
                    .with_context(|| format!("Failed to run `{}`", spec))?;
                ProcessOutput::with_status(status.code().unwrap_or(-1))
            }
            IoMode::Interactive => {
                let status = cmd
                    .status()
                    .with_context(|| format!("Failed to run `{}`", spec))?;
                ProcessOutput::with_status(status.code().unwrap_or(-1))
            }
        };

        debug!(command = %spec, status = output.status, "finished");
        Ok(output)
    }
}

fn is_existing_path(program: &str) -> bool {
    let path = Path::new(program);
    let has_dir = path
        .parent()
        .is_some_and(|parent| !parent.as_os_str().is_empty());
    has_dir && path.exists()
}
