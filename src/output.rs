//! Operator-facing status lines printed by commands and the menu loop.

use chrono::{DateTime, Local};

/// Compact timestamp, `DD/HHMMSS`.
pub fn cts() -> String {
    format_cts(Local::now())
}

pub fn format_cts(t: DateTime<Local>) -> String {
    t.format("%d/%H%M%S").to_string()
}

pub fn status_line(message: &str) -> String {
    format!("[admin] {message} [{}]", cts())
}

pub fn error_line(message: &str) -> String {
    format!("[err][admin] {message} [{}]", cts())
}

pub fn report(message: &str) {
    println!("{}", status_line(message));
}

pub fn report_err(message: &str) {
    println!("{}", error_line(message));
}
