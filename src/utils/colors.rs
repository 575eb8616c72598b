/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Progress color: green when done, yellow while in progress, grey if untouched.
pub fn color_for_progress(completed: i64, total: i64) -> &'static str {
    if total > 0 && completed >= total {
        GREEN
    } else if completed > 0 {
        YELLOW
    } else {
        GREY
    }
}

/// Missed-interaction color: red when any were missed.
pub fn color_for_missed(missed: Option<i64>) -> &'static str {
    match missed {
        Some(m) if m > 0 => RED,
        Some(_) => GREEN,
        None => GREY,
    }
}
