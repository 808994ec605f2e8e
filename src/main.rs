use clap::Parser;

use poetry_venv::bootstrap::{self, BootstrapRequest};
use poetry_venv::config::{Config, DEFAULT_PYTHON_VERSION};
use poetry_venv::{logging, ConsoleReporter, SystemRunner};

// No `version` on the command: `--version` selects the Python version here.
#[derive(Parser)]
#[command(name = "poetry-venv", about = "Create a pyenv virtualenv and initialize a Poetry project in it", long_about = None)]
struct Cli {
    /// Name of the virtualenv to create
    venv_name: String,

    /// Python version to build the virtualenv on
    #[arg(long, default_value = DEFAULT_PYTHON_VERSION)]
    version: String,

    /// Delete an existing virtualenv with the same name first
    #[arg(short, long)]
    force: bool,

    /// Show debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let reporter = ConsoleReporter::new(cli.no_color);
    let request = BootstrapRequest {
        name: cli.venv_name,
        version: cli.version,
        force: cli.force,
    };

    let exit_code = match Config::load() {
        Ok(config) => bootstrap::execute(SystemRunner, reporter, config, &request),
        Err(err) => bootstrap::report_failure(&reporter, &err),
    };
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
