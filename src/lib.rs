pub mod bootstrap;
pub mod config;
pub mod logging;
pub mod report;
pub mod runner;
pub mod tools;

// Re-export commonly used types
pub use bootstrap::{Bootstrap, BootstrapError, BootstrapRequest, CreateOutcome};
pub use config::Config;
pub use report::{ConsoleReporter, Reporter};
pub use runner::{CommandRunner, CommandSpec, IoMode, ProcessOutput, SystemRunner};
