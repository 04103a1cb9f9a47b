//! Filesystem operations: classification, destination policy and execution.

mod classify;
mod delete;
mod exec;
pub mod helpers;
mod mv;
mod safe;
mod shell;

pub use classify::classify_mv;
pub use delete::delete_entry;
pub use exec::{BatchReport, Executor, OpReport, Outcome};
pub use helpers::{describe_io_error, io_error_with_help};
pub use mv::run_mv;
pub use safe::resolve_destination;
pub use shell::run_shell;
