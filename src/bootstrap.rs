//! Create a pyenv virtualenv, install Poetry into it and run `poetry init`.
//!
//! The flow is strictly sequential. The one recovery path: if creating the
//! virtualenv fails, the requested Python is installed and creation is
//! retried exactly once.

use anyhow::Result;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Config, DEFAULT_PYTHON_VERSION};
use crate::report::Reporter;
use crate::runner::{CommandRunner, ProcessOutput};
use crate::tools::{poetry, pyenv, Pyenv};

/// Exit status for a completed bootstrap
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status for any fatal failure
pub const EXIT_FAILURE: i32 = 1;

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapRequest {
    /// Virtualenv name, passed to pyenv unvalidated
    pub name: String,
    /// Python version the virtualenv is built on
    pub version: String,
    /// Delete a same-named virtualenv first
    pub force: bool,
}

impl BootstrapRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: DEFAULT_PYTHON_VERSION.to_string(),
            force: false,
        }
    }
}

/// Fatal failures of the bootstrap flow
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("{tool} is not installed or not working: {detail}")]
    MissingPrerequisite { tool: String, detail: String },

    #[error("Failed to create virtualenv '{name}' with Python {version}: {detail}")]
    EnvironmentCreation {
        name: String,
        version: String,
        detail: String,
    },

    #[error("Failed to install {package} into '{name}': {detail}")]
    PackageManagerInstall {
        package: String,
        name: String,
        detail: String,
    },

    #[error("poetry init failed: {detail}")]
    ProjectInit { detail: String },
}

impl BootstrapError {
    /// What the user can do about it, if anything
    pub fn remediation(&self) -> Option<String> {
        match self {
            BootstrapError::MissingPrerequisite { .. } => {
                Some(format!("Install pyenv first: {}", pyenv::INSTALL_URL))
            }
            BootstrapError::EnvironmentCreation { name, .. } => Some(format!(
                "If a virtualenv named '{}' already exists, rerun with --force to recreate it",
                name
            )),
            _ => None,
        }
    }
}

/// Result of one `pyenv virtualenv` attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// First attempt failed; most likely the Python version isn't installed
    NeedsRuntimeInstall(ProcessOutput),
    /// Retry failed too
    Failed(ProcessOutput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    First,
    Retry,
}

/// Drives the external tools through the bootstrap sequence
pub struct Bootstrap<R, P> {
    runner: R,
    reporter: P,
    pyenv: Pyenv,
    config: Config,
}

impl<R: CommandRunner, P: Reporter> Bootstrap<R, P> {
    pub fn new(runner: R, reporter: P, config: Config) -> Self {
        Self {
            runner,
            reporter,
            pyenv: Pyenv::new(config.pyenv.clone()),
            config,
        }
    }

    /// Run every step, stopping at the first fatal failure
    pub fn run(&self, request: &BootstrapRequest) -> Result<()> {
        info!(name = %request.name, version = %request.version, force = request.force, "bootstrap");

        self.check_prerequisite()?;

        if request.force {
            self.delete_existing(&request.name);
        }

        self.create_with_fallback(request)?;
        self.install_package_manager(&request.name)?;
        self.init_project(&request.name)?;

        self.reporter.success(&format!(
            "Virtualenv '{}' (Python {}) is ready with Poetry installed",
            request.name, request.version
        ));
        self.reporter.hint(&format!(
            "Activate it with: {}",
            self.pyenv.activate_hint(&request.name)
        ));
        Ok(())
    }

    fn check_prerequisite(&self) -> Result<()> {
        let out = self.runner.run(&self.pyenv.version())?;
        if out.success() {
            debug!(version = %out.stdout.trim(), "pyenv found");
            return Ok(());
        }

        Err(BootstrapError::MissingPrerequisite {
            tool: self.pyenv.program().to_string(),
            detail: out.detail(),
        }
        .into())
    }

    /// Best effort: a missing virtualenv (or any other failure) is ignored
    fn delete_existing(&self, name: &str) {
        self.reporter
            .step(&format!("Removing existing virtualenv '{}'", name));
        match self.runner.run(&self.pyenv.delete_virtualenv(name)) {
            Ok(out) if !out.success() => {
                debug!(status = out.status, detail = %out.detail(), "virtualenv-delete failed, ignoring");
            }
            Ok(_) => {}
            Err(err) => debug!(error = %err, "virtualenv-delete could not run, ignoring"),
        }
    }

    fn create(&self, request: &BootstrapRequest, attempt: Attempt) -> Result<CreateOutcome> {
        let spec = self
            .pyenv
            .create_virtualenv(&request.version, &request.name);
        let out = self.runner.run(&spec)?;
        Ok(match (out.success(), attempt) {
            (true, _) => CreateOutcome::Created,
            (false, Attempt::First) => CreateOutcome::NeedsRuntimeInstall(out),
            (false, Attempt::Retry) => CreateOutcome::Failed(out),
        })
    }

    fn create_with_fallback(&self, request: &BootstrapRequest) -> Result<()> {
        self.reporter.step(&format!(
            "Creating virtualenv '{}' with Python {}",
            request.name, request.version
        ));

        let mut attempt = Attempt::First;
        loop {
            match self.create(request, attempt)? {
                CreateOutcome::Created => return Ok(()),
                CreateOutcome::NeedsRuntimeInstall(out) => {
                    debug!(detail = %out.detail(), "first virtualenv attempt failed");
                    self.install_runtime(&request.version)?;
                    attempt = Attempt::Retry;
                }
                CreateOutcome::Failed(out) => {
                    return Err(BootstrapError::EnvironmentCreation {
                        name: request.name.clone(),
                        version: request.version.clone(),
                        detail: out.detail(),
                    }
                    .into())
                }
            }
        }
    }

    /// A failed install is only a warning: the retried create decides.
    fn install_runtime(&self, version: &str) -> Result<()> {
        self.reporter.warn(&format!(
            "Python {} does not seem to be installed; installing it with pyenv",
            version
        ));
        let install = self.runner.run(&self.pyenv.install(version))?;
        if !install.success() {
            self.reporter.warn(&format!(
                "pyenv install {} exited with status {}",
                version, install.status
            ));
        }
        Ok(())
    }

    fn install_package_manager(&self, name: &str) -> Result<()> {
        self.reporter
            .step(&format!("Installing {} into '{}'", self.config.package, name));
        let out = self
            .runner
            .run(&poetry::install(&self.pyenv, name, &self.config.package))?;
        if !out.success() {
            return Err(BootstrapError::PackageManagerInstall {
                package: self.config.package.clone(),
                name: name.to_string(),
                detail: out.detail(),
            }
            .into());
        }
        Ok(())
    }

    fn init_project(&self, name: &str) -> Result<()> {
        self.reporter.step(&format!(
            "Running poetry init in {}",
            self.config.project_dir.display()
        ));
        let out = self
            .runner
            .run(&poetry::init(&self.pyenv, name, &self.config.project_dir))?;
        if !out.success() {
            return Err(BootstrapError::ProjectInit {
                detail: out.detail(),
            }
            .into());
        }
        Ok(())
    }
}

/// Run the bootstrap and turn the result into a process exit status
pub fn execute<R, P>(runner: R, reporter: P, config: Config, request: &BootstrapRequest) -> i32
where
    R: CommandRunner,
    P: Reporter,
{
    let bootstrap = Bootstrap::new(runner, reporter, config);
    match bootstrap.run(request) {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => report_failure(&bootstrap.reporter, &err),
    }
}

/// Print a fatal error (and its remediation, if known); returns the exit status
pub fn report_failure<P: Reporter>(reporter: &P, err: &anyhow::Error) -> i32 {
    reporter.error(&format!("{:#}", err));
    if let Some(hint) = err
        .downcast_ref::<BootstrapError>()
        .and_then(BootstrapError::remediation)
    {
        reporter.hint(&hint);
    }
    EXIT_FAILURE
}
