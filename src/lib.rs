//! Core library for `edmv`.
//!
//! Bulk rename, move, delete and shell-process directory entries by editing a listing
//! in a text editor. The pipeline is:
//!
//! - [`listing`] produces the ordered paths under a root,
//! - a [`ListEditor`] lets the user change them,
//! - [`diff`] pairs original and edited lines by position,
//! - [`plan`] turns each changed pair into an [`Operation`],
//! - [`ops`] applies operations and classifies failures,
//! - [`session`] ties it together, including the review pass and loop mode.

pub mod cli;
pub mod config;
pub mod diff;
pub mod editor;
pub mod errors;
pub mod listing;
pub mod ops;
pub mod output;
pub mod plan;
pub mod platform;
pub mod review;
pub mod session;
pub mod shutdown;

pub use config::{
    Config, LogLevel, create_template_config, default_config_path, default_log_path,
    load_config, load_config_from_xml_path, path_has_symlink_ancestor,
};
pub use diff::{ChangePair, resolve_changes};
pub use editor::{CommandEditor, ListEditor, resolve_editor_command};
pub use errors::{EdmvError, MoveResult, OpFailure};
pub use listing::{ListOptions, SortKey, list_entries};
pub use ops::{BatchReport, Executor, Outcome, classify_mv, resolve_destination};
pub use plan::{Operation, plan, plan_all};
pub use review::{format_review_line, parse_review};
pub use session::{CycleReport, Session};
