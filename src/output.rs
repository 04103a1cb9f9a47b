//! User-facing messages.
//!
//! Everything the user is meant to read (as opposed to logs) goes through here.
//! Prefixes are colored only when the stream is a terminal.

use owo_colors::OwoColorize;
use std::fmt::Display;

fn stdout_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

fn prefix<'a>(label: &'a str, tty: bool, paint: fn(&'a str) -> String) -> String {
    if tty { paint(label) } else { label.to_string() }
}

pub fn print_info(msg: &str) {
    let p = prefix("info:", stdout_tty(), |s| s.cyan().bold().to_string());
    println!("{p} {msg}");
}

pub fn print_success(msg: &str) {
    let p = prefix("ok:", stdout_tty(), |s| s.green().bold().to_string());
    println!("{p} {msg}");
}

pub fn print_warn(msg: &str) {
    let p = prefix("warn:", stderr_tty(), |s| s.yellow().bold().to_string());
    eprintln!("{p} {msg}");
}

pub fn print_error(msg: &str) {
    let p = prefix("error:", stderr_tty(), |s| s.red().bold().to_string());
    eprintln!("{p} {msg}");
}

/// A bare line on stdout, for output meant to be piped (e.g. `--print-config`).
pub fn print_user(msg: impl Display) {
    println!("{msg}");
}
