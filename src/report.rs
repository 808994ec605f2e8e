//! User-facing console output.

use colored::*;

/// Everything the bootstrap flow tells the user goes through here
pub trait Reporter {
    /// A step is starting
    fn step(&self, message: &str);
    /// Something went right
    fn success(&self, message: &str);
    /// Recoverable problem
    fn warn(&self, message: &str);
    /// Fatal problem
    fn error(&self, message: &str);
    /// Suggestion the user can act on
    fn hint(&self, message: &str);
}

impl<P: Reporter + ?Sized> Reporter for &P {
    fn step(&self, message: &str) {
        (**self).step(message)
    }
    fn success(&self, message: &str) {
        (**self).success(message)
    }
    fn warn(&self, message: &str) {
        (**self).warn(message)
    }
    fn error(&self, message: &str) {
        (**self).error(message)
    }
    fn hint(&self, message: &str) {
        (**self).hint(message)
    }
}

/// Colored terminal output. Errors go to stderr, everything else to stdout;
/// each stream is colored only if it is a terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter {
    stdout_color: bool,
    stderr_color: bool,
}

impl ConsoleReporter {
    pub fn new(no_color: bool) -> Self {
        Self::with_colors(
            !no_color && atty::is(atty::Stream::Stdout),
            !no_color && atty::is(atty::Stream::Stderr),
        )
    }

    pub fn with_colors(stdout_color: bool, stderr_color: bool) -> Self {
        Self {
            stdout_color,
            stderr_color,
        }
    }

    fn step_line(&self, message: &str) -> String {
        format!(
            "{} {}",
            paint(self.stdout_color, "→", |s| s.cyan().bold()),
            message
        )
    }

    fn success_line(&self, message: &str) -> String {
        format!(
            "{} {}",
            paint(self.stdout_color, "✓", |s| s.green().bold()),
            paint(self.stdout_color, message, |s| s.green())
        )
    }

    fn warn_line(&self, message: &str) -> String {
        format!(
            "{} {}",
            paint(self.stdout_color, "⚠", |s| s.yellow().bold()),
            paint(self.stdout_color, message, |s| s.yellow())
        )
    }

    fn error_line(&self, message: &str) -> String {
        format!(
            "{} {}",
            paint(self.stderr_color, "✗", |s| s.red().bold()),
            paint(self.stderr_color, message, |s| s.red())
        )
    }

    fn hint_line(&self, message: &str) -> String {
        format!("💡 {}", paint(self.stdout_color, message, |s| s.dimmed()))
    }
}

fn paint(enabled: bool, text: &str, style: fn(&str) -> ColoredString) -> String {
    if enabled {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

impl Reporter for ConsoleReporter {
    fn step(&self, message: &str) {
        println!("{}", self.step_line(message));
    }

    fn success(&self, message: &str) {
        println!("{}", self.success_line(message));
    }

    fn warn(&self, message: &str) {
        println!("{}", self.warn_line(message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", self.error_line(message));
    }

    fn hint(&self, message: &str) {
        println!("{}", self.hint_line(message));
    }
}
