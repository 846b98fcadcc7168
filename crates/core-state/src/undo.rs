//! Snapshot-based undo for a single edited line.
//!
//! A contiguous run of typed characters is captured by a *single* snapshot
//! taken lazily at the first keystroke of the run. Any other mutation ends the
//! run and pushes its own snapshot, so each discrete edit (kill, paste,
//! completion, history recall) undoes individually. Successive identical
//! snapshots are skipped. There is no redo stack.

use tracing::trace;

/// Maximum number of snapshots retained.
pub const UNDO_HISTORY_MAX: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSnapshot {
    pub contents: String,
    pub cursor: usize,
}

impl LineSnapshot {
    pub fn new(contents: impl Into<String>, cursor: usize) -> Self {
        Self {
            contents: contents.into(),
            cursor,
        }
    }
}

/// Typing run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertRun {
    Inactive,
    Active { edits: u32 },
}

#[derive(Debug)]
pub struct UndoEngine {
    undo_stack: Vec<LineSnapshot>,
    insert_run: InsertRun,
    snapshots_skipped: u64,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoEngine {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            insert_run: InsertRun::Inactive,
            snapshots_skipped: 0,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn insert_run(&self) -> InsertRun {
        self.insert_run
    }

    pub fn snapshots_skipped(&self) -> u64 {
        self.snapshots_skipped
    }

    /// Record the state *before* a discrete edit. Ends any typing run.
    pub fn push_snapshot(&mut self, snapshot: LineSnapshot) {
        self.insert_run = InsertRun::Inactive;
        self.push(snapshot);
    }

    /// Record the state before a typed character; only the first keystroke of
    /// a run is captured.
    pub fn note_typed(&mut self, before: impl FnOnce() -> LineSnapshot) {
        if let InsertRun::Active { edits } = &mut self.insert_run {
            *edits += 1;
            return;
        }
        self.push(before());
        self.insert_run = InsertRun::Active { edits: 1 };
    }

    pub fn end_insert_run(&mut self) {
        self.insert_run = InsertRun::Inactive;
    }

    /// Pop the most recent snapshot.
    pub fn undo(&mut self) -> Option<LineSnapshot> {
        self.insert_run = InsertRun::Inactive;
        let snap = self.undo_stack.pop();
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), restored = snap.is_some(), "undo_pop");
        snap
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.insert_run = InsertRun::Inactive;
    }

    fn push(&mut self, snapshot: LineSnapshot) {
        if self.undo_stack.last() == Some(&snapshot) {
            self.snapshots_skipped += 1;
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "snapshot_dedupe_skip");
            return;
        }
        self.undo_stack.push(snapshot);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "push_snapshot");
        if self.undo_stack.len() > UNDO_HISTORY_MAX {
            self.undo_stack.remove(0);
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
    }
}
