/// ANSI color helper utilities for terminal output.
use crate::models::Status;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

pub fn color_for_status(status: Status) -> &'static str {
    match status {
        Status::Present => GREEN,
        Status::Absent => RED,
        Status::Washroom => CYAN,
        Status::Activity => YELLOW,
        Status::Bunking => MAGENTA,
    }
}

pub fn colorize_status(status: Status) -> String {
    format!("{}{}{RESET}", color_for_status(status), status)
}

/// Ritorna il valore in grigio se vuoto o "None".
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "None" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
