//! Applying planned operations to the filesystem.

use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use super::delete::delete_entry;
use super::mv::run_mv;
use super::safe::resolve_destination;
use super::shell::run_shell;
use crate::config::Config;
use crate::errors::{MoveResult, OpFailure};
use crate::plan::Operation;
use crate::shutdown;

/// What happened to one operation of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Failed(OpFailure),
    /// Dry-run: reported, not executed.
    Planned,
    /// Not attempted because a shutdown was requested.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpReport {
    pub op: Operation,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub items: Vec<OpReport>,
}

impl BatchReport {
    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.items.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn applied(&self) -> usize {
        self.count(|o| *o == Outcome::Applied)
    }

    pub fn planned(&self) -> usize {
        self.count(|o| *o == Outcome::Planned)
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| *o == Outcome::Skipped)
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Operation, &OpFailure)> {
        self.items.iter().filter_map(|r| match &r.outcome {
            Outcome::Failed(f) => Some((&r.op, f)),
            _ => None,
        })
    }
}

/// Executes operations relative to a working root.
#[derive(Debug, Clone)]
pub struct Executor {
    root: PathBuf,
    safe: bool,
    recursive_delete: bool,
    dry_run: bool,
}

impl Executor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            safe: false,
            recursive_delete: false,
            dry_run: false,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self {
            root: cfg.root.clone(),
            safe: cfg.safe,
            recursive_delete: cfg.recursive_delete,
            dry_run: cfg.dry_run,
        }
    }

    pub fn safe(mut self, on: bool) -> Self {
        self.safe = on;
        self
    }

    pub fn recursive_delete(mut self, on: bool) -> Self {
        self.recursive_delete = on;
        self
    }

    pub fn dry_run(mut self, on: bool) -> Self {
        self.dry_run = on;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Perform a single operation. Ignores dry-run; see `apply_all`.
    pub fn execute(&self, op: &Operation) -> MoveResult {
        match op {
            Operation::Delete { src } => delete_entry(&self.root, src, self.recursive_delete),
            Operation::Move { src, dst } => {
                let target = resolve_destination(&self.root, src, dst, self.safe)
                    .map_err(|e| OpFailure::Unclassified(format!("{e:#}")))?;
                run_mv(&self.root, src, &target)
            }
            Operation::ShellExec { cmd, .. } => run_shell(&self.root, cmd),
        }
    }

    /// Run `ops` in order. Failures are recorded and the batch continues; a shutdown
    /// request stops it and marks the rest as skipped.
    pub fn apply_all(&self, ops: &[Operation]) -> BatchReport {
        let mut report = BatchReport::default();
        for (idx, op) in ops.iter().enumerate() {
            if shutdown::is_requested() {
                warn!(remaining = ops.len() - idx, "shutdown requested; skipping remaining operations");
                report.items.extend(ops[idx..].iter().map(|op| OpReport {
                    op: op.clone(),
                    outcome: Outcome::Skipped,
                }));
                break;
            }

            let outcome = if self.dry_run {
                info!(op = %op, "dry-run: would apply");
                Outcome::Planned
            } else {
                match self.execute(op) {
                    Ok(()) => {
                        info!(op = %op, "applied");
                        Outcome::Applied
                    }
                    Err(f) => {
                        error!(code = f.code(), kind = f.kind(), src = op.src(), op = %op, error = %f, "operation failed");
                        Outcome::Failed(f)
                    }
                }
            };
            report.items.push(OpReport {
                op: op.clone(),
                outcome,
            });
        }
        report
    }
}
