//! Command lines for the external tools poetry-venv drives.

pub mod poetry;
pub mod pyenv;

pub use pyenv::Pyenv;
