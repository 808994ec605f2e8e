//! pyenv and pyenv-virtualenv commands

use crate::runner::{CommandSpec, IoMode};

/// Where to send users who don't have pyenv yet
pub const INSTALL_URL: &str = "https://github.com/pyenv/pyenv#installation";

/// Selects the interpreter for `pyenv exec`
const VERSION_VAR: &str = "PYENV_VERSION";

/// Builds pyenv command lines for a given pyenv executable
#[derive(Debug, Clone)]
pub struct Pyenv {
    program: String,
}

impl Pyenv {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// `pyenv --version`, used as the presence check
    pub fn version(&self) -> CommandSpec {
        CommandSpec::new(&self.program).arg("--version")
    }

    /// `pyenv virtualenv-delete -f <name>`
    pub fn delete_virtualenv(&self, name: &str) -> CommandSpec {
        CommandSpec::new(&self.program).args(["virtualenv-delete", "-f", name])
    }

    /// `pyenv virtualenv <version> <name>`
    pub fn create_virtualenv(&self, version: &str, name: &str) -> CommandSpec {
        CommandSpec::new(&self.program).args(["virtualenv", version, name])
    }

    /// `pyenv install --skip-existing <version>`. Streams the build log; stdin
    /// stays closed so the "already installed, continue?" prompt can't block.
    pub fn install(&self, version: &str) -> CommandSpec {
        CommandSpec::new(&self.program)
            .args(["install", "--skip-existing", version])
            .io(IoMode::Inherit)
    }

    /// `pyenv exec <args...>` pinned to the virtualenv `name`
    pub fn exec_in<I, S>(&self, name: &str, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new(&self.program)
            .arg("exec")
            .args(args)
            .env(VERSION_VAR, name)
    }

    /// Shell command that activates the virtualenv
    pub fn activate_hint(&self, name: &str) -> String {
        format!("{} activate {}", self.program, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_virtualenv_args() {
        let spec = Pyenv::new("pyenv").create_virtualenv("3.11.0", "demo");
        assert_eq!(spec.program, "pyenv");
        assert_eq!(spec.args, ["virtualenv", "3.11.0", "demo"]);
        assert_eq!(spec.io, IoMode::Capture);
    }

    #[test]
    fn test_delete_is_forced() {
        let spec = Pyenv::new("pyenv").delete_virtualenv("demo");
        assert_eq!(spec.args, ["virtualenv-delete", "-f", "demo"]);
    }

    #[test]
    fn test_install_skips_existing_without_prompt() {
        let spec = Pyenv::new("pyenv").install("3.9.5");
        assert!(spec.has_arg("--skip-existing"));
        assert_eq!(spec.io, IoMode::Inherit);
    }

    #[test]
    fn test_exec_in_pins_version() {
        let spec = Pyenv::new("/opt/pyenv/bin/pyenv").exec_in("demo", ["python", "-V"]);
        assert_eq!(spec.program, "/opt/pyenv/bin/pyenv");
        assert_eq!(spec.args, ["exec", "python", "-V"]);
        assert_eq!(spec.envs, [("PYENV_VERSION".to_string(), "demo".to_string())]);
    }

    #[test]
    fn test_activate_hint() {
        assert_eq!(Pyenv::new("pyenv").activate_hint("demo"), "pyenv activate demo");
    }
}
