//! Colored console lines

use console::Style;

/// Print an uncolored progress line
pub fn log_info(message: &str) {
    println!("{message}");
}

/// Print a green line
pub fn log_success(message: &str) {
    println!("{}", Style::new().green().apply_to(message));
}

/// Print a yellow line
pub fn log_warning(message: &str) {
    println!("{}", Style::new().yellow().apply_to(message));
}

/// Print a red line to stderr
pub fn log_error(message: &str) {
    eprintln!("{}", Style::new().red().apply_to(message));
}
