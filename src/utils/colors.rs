/// ANSI color helper utilities for terminal output.
use crate::models::account::AccountStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// active → green, blocked → red, inactive → grey
pub fn color_for_status(status: AccountStatus) -> &'static str {
    match status {
        AccountStatus::Active => GREEN,
        AccountStatus::Blocked => RED,
        AccountStatus::Inactive => GREY,
    }
}

pub fn colorize_status(status: AccountStatus) -> String {
    format!("{}{}{}", color_for_status(status), status, RESET)
}

/// Returns the value greyed out when it is empty or a placeholder.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{}{RESET}", if value.is_empty() { "--" } else { value })
    } else {
        value.to_string()
    }
}
