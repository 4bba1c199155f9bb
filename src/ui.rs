//! Progress and error output. Everything here goes to stderr: on success
//! the tool's stdout carries exactly one line, the new version.

pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message); // Red color
}

pub fn display_status(message: &str) {
    eprintln!("\x1b[33m→\x1b[0m {}", message); // Yellow color
}
