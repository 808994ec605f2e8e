//! Test doubles shared by the integration tests

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use poetry_venv::{CommandRunner, CommandSpec, Config, ProcessOutput, Reporter};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;

// Patterns matched against the rendered command line
pub const VERSION: &str = "pyenv --version";
pub const DELETE: &str = "pyenv virtualenv-delete";
pub const CREATE: &str = "pyenv virtualenv ";
pub const INSTALL: &str = "pyenv install";
pub const PIP: &str = "-m pip install";
pub const INIT: &str = "poetry init";

enum Response {
    Status(i32),
    SpawnError(String),
}

/// Records every command and answers from a per-pattern script.
/// Commands with no scripted response left succeed.
pub struct ScriptedRunner {
    rules: Vec<(String, RefCell<VecDeque<Response>>)>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Answer successive commands matching `pattern` with `statuses`
    pub fn on(mut self, pattern: &str, statuses: &[i32]) -> Self {
        let queue = statuses.iter().map(|s| Response::Status(*s)).collect();
        self.rules.push((pattern.to_string(), RefCell::new(queue)));
        self
    }

    /// Fail to spawn the next command matching `pattern`
    pub fn spawn_error_on(mut self, pattern: &str, message: &str) -> Self {
        let queue = VecDeque::from([Response::SpawnError(message.to_string())]);
        self.rules.push((pattern.to_string(), RefCell::new(queue)));
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pattern: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.to_string().contains(pattern))
            .count()
    }

    pub fn position(&self, pattern: &str) -> Option<usize> {
        self.calls
            .borrow()
            .iter()
            .position(|c| c.to_string().contains(pattern))
    }

    pub fn find(&self, pattern: &str) -> Option<CommandSpec> {
        self.calls
            .borrow()
            .iter()
            .find(|c| c.to_string().contains(pattern))
            .cloned()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput> {
        self.calls.borrow_mut().push(spec.clone());
        let line = spec.to_string();

        let response = self
            .rules
            .iter()
            .find(|(pattern, _)| line.contains(pattern.as_str()))
            .and_then(|(_, queue)| queue.borrow_mut().pop_front());

        match response {
            None | Some(Response::Status(0)) => Ok(ProcessOutput::with_status(0)),
            Some(Response::Status(status)) => Ok(ProcessOutput {
                status,
                stdout: String::new(),
                stderr: format!("scripted failure of `{}`", line),
            }),
            Some(Response::SpawnError(message)) => Err(anyhow!(message)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Step,
    Success,
    Warn,
    Error,
    Hint,
}

/// Keeps every message instead of printing it
#[derive(Default)]
pub struct RecordingReporter {
    messages: RefCell<Vec<(Kind, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(&self, kind: Kind) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn any(&self, kind: Kind, needle: &str) -> bool {
        self.of(kind).iter().any(|m| m.contains(needle))
    }

    fn push(&self, kind: Kind, message: &str) {
        self.messages.borrow_mut().push((kind, message.to_string()));
    }
}

impl Reporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.push(Kind::Step, message)
    }
    fn success(&self, message: &str) {
        self.push(Kind::Success, message)
    }
    fn warn(&self, message: &str) {
        self.push(Kind::Warn, message)
    }
    fn error(&self, message: &str) {
        self.push(Kind::Error, message)
    }
    fn hint(&self, message: &str) {
        self.push(Kind::Hint, message)
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(PathBuf::from("/work/project"), |_| None)
}
