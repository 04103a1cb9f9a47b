//! One edit-and-apply session over a working directory.
//!
//! A cycle: list -> edit -> (re-edit until line counts match) -> diff -> review
//! -> plan -> apply. `run` repeats cycles in loop mode while the previous one
//! actually changed something.

use anyhow::Result;
use std::thread;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::diff::{ChangePair, resolve_changes};
use crate::editor::ListEditor;
use crate::errors::EdmvError;
use crate::listing::list_entries;
use crate::ops::{BatchReport, Executor};
use crate::output as out;
use crate::plan::plan_all;
use crate::review::{format_review_line, parse_review};
use crate::shutdown;

/// Summary of one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Entries in the listing shown to the user.
    pub listed: usize,
    /// Changes left after the review step.
    pub changes: Vec<ChangePair>,
    pub batch: BatchReport,
}

pub struct Session<E: ListEditor> {
    cfg: Config,
    editor: E,
    executor: Executor,
}

impl<E: ListEditor> Session<E> {
    pub fn new(cfg: Config, editor: E) -> Self {
        let executor = Executor::from_config(&cfg);
        Self {
            cfg,
            editor,
            executor,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Run cycles until there is nothing more to do.
    pub fn run(&mut self) -> Result<Vec<CycleReport>> {
        let mut reports = Vec::new();
        loop {
            let report = self.run_cycle()?;
            let again = self.cfg.loop_mode
                && !self.cfg.dry_run
                && report.batch.applied() > 0
                && !shutdown::is_requested();
            reports.push(report);
            if !again {
                break;
            }
            debug!(cycle = reports.len() + 1, "loop mode: starting next cycle");
        }
        Ok(reports)
    }

    pub fn run_cycle(&mut self) -> Result<CycleReport> {
        let root = self.cfg.root.clone();
        let original = list_entries(&root, &self.cfg.listing).map_err(|e| EdmvError::Listing {
            root: root.clone(),
            message: format!("{e:#}"),
        })?;
        let mut report = CycleReport {
            listed: original.len(),
            ..CycleReport::default()
        };
        if original.is_empty() {
            out::print_info(&format!("nothing to edit in {}", root.display()));
            return Ok(report);
        }

        let edited = self.edit_until_aligned(&original)?;
        let mut changes = resolve_changes(&original, &edited)?;
        if changes.is_empty() {
            info!("no changes");
            return Ok(report);
        }

        if !self.cfg.fast {
            changes = self.review(&changes)?;
            if changes.is_empty() {
                info!("every change was dropped during review");
                return Ok(report);
            }
        }

        let ops = plan_all(&changes)?;
        report.changes = changes;
        report.batch = self.executor.apply_all(&ops);
        self.print_batch(&report.batch);
        Ok(report)
    }

    fn edit_until_aligned(&mut self, original: &[String]) -> Result<Vec<String>> {
        let mut edited = self.editor.edit(original, None)?;
        while edited.len() != original.len() {
            let mismatch = EdmvError::LengthMismatch {
                original: original.len(),
                edited: edited.len(),
            };
            if shutdown::is_requested() {
                return Err(mismatch.into());
            }
            warn!(original = original.len(), edited = edited.len(), "line count changed; reopening editor");
            out::print_warn(&format!("{mismatch}. Reopening the editor with the original alongside."));
            if !self.cfg.mismatch_delay.is_zero() {
                thread::sleep(self.cfg.mismatch_delay);
            }
            edited = self.editor.edit(&edited, Some(original))?;
        }
        Ok(edited)
    }

    /// Let the user confirm or prune the pending changes.
    fn review(&mut self, changes: &[ChangePair]) -> Result<Vec<ChangePair>> {
        let lines: Vec<String> = changes.iter().map(format_review_line).collect();
        let reviewed = self.editor.edit(&lines, None)?;
        let kept: Vec<ChangePair> = parse_review(&reviewed)?
            .into_iter()
            .filter(|p| p.original != p.edited)
            .collect();
        debug!(proposed = changes.len(), kept = kept.len(), "review finished");
        Ok(kept)
    }

    fn print_batch(&self, batch: &BatchReport) {
        if self.cfg.dry_run {
            for item in &batch.items {
                out::print_info(&format!("dry-run: {}", item.op));
            }
            return;
        }
        for (op, failure) in batch.failures() {
            out::print_error(&format!("{op}: {failure} [code {}]", failure.code()));
        }
        if batch.skipped() > 0 {
            out::print_warn(&format!("interrupted; {} operation(s) skipped", batch.skipped()));
        }
        info!(
            applied = batch.applied(),
            failed = batch.failures().count(),
            skipped = batch.skipped(),
            "cycle finished"
        );
    }
}
