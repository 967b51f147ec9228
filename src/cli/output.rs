//! Human-facing status output
//!
//! Status lines go to stdout and are colorized only when stdout is a
//! terminal; piped output stays plain. Diagnostics (skip notices, errors) are
//! the logging layer's job, not this module's.

use atty::Stream;

const GREEN: &str = "32";
const YELLOW: &str = "33";
const BLUE: &str = "34";

/// Prints a success line (green on a terminal).
pub fn success(message: &str) {
    println!("{}", paint(GREEN, message));
}

/// Prints an advisory line (yellow on a terminal).
pub fn notice(message: &str) {
    println!("{}", paint(YELLOW, message));
}

/// Prints a follow-up hint (blue on a terminal).
pub fn hint(message: &str) {
    println!("{}", paint(BLUE, message));
}

fn paint(color: &str, message: &str) -> String {
    if atty::is(Stream::Stdout) {
        format!("\x1b[{}m{}\x1b[0m", color, message)
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_is_plain_without_terminal() {
        // Test harness output is captured, so stdout is not a tty here.
        assert_eq!(paint(GREEN, "done"), "done");
    }
}
