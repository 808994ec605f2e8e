//! Poetry install and project init, run inside a pyenv virtualenv

use super::Pyenv;
use crate::runner::{CommandSpec, IoMode};
use std::path::Path;

/// Install `package` with the virtualenv's own pip
pub fn install(pyenv: &Pyenv, venv: &str, package: &str) -> CommandSpec {
    pyenv
        .exec_in(venv, ["python", "-m", "pip", "install", package])
        .io(IoMode::Inherit)
}

/// `poetry init` in `project_dir`. Interactive: Poetry asks for project metadata.
pub fn init(pyenv: &Pyenv, venv: &str, project_dir: &Path) -> CommandSpec {
    pyenv
        .exec_in(venv, ["poetry", "init"])
        .current_dir(project_dir)
        .io(IoMode::Interactive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_uses_venv_pip() {
        let spec = install(&Pyenv::new("pyenv"), "demo", "poetry==1.8.3");
        assert_eq!(
            spec.to_string(),
            "PYENV_VERSION=demo pyenv exec python -m pip install poetry==1.8.3"
        );
        assert_eq!(spec.io, IoMode::Inherit);
    }

    #[test]
    fn test_init_is_interactive_in_project_dir() {
        let spec = init(&Pyenv::new("pyenv"), "demo", Path::new("/work/app"));
        assert_eq!(spec.args, ["exec", "poetry", "init"]);
        assert_eq!(spec.cwd.as_deref(), Some(Path::new("/work/app")));
        assert_eq!(spec.io, IoMode::Interactive);
    }
}
