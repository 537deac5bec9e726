//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print skipped item (yellow label)
pub fn skipped(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.yellow(), msg);
}

/// Print finished step (green "Done")
pub fn done(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "Done".green(), msg);
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}
