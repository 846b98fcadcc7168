//! Key-at-a-time line read session.
//!
//! The host calls [`LineReader::begin`] once per prompt and then
//! [`LineReader::feed`] for every key event until it returns
//! [`ReadOutcome::Accepted`] or [`ReadOutcome::Aborted`]. Bound keys are
//! dispatched; unbound printable keys are typed into the line, and
//! consecutive keystrokes coalesce into one undo unit.

use core_events::{KeyEvent, KeyModifiers};
use core_keymap::{CharKeyTranslator, KeyBindingSet, KeyTranslator};
use core_model::{EditError, LineEditor};
use core_state::UndoEngine;
use core_terminal::ConsoleOutput;
use tracing::{debug, trace, warn};

use crate::dispatcher::dispatch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// More input is needed.
    Pending,
    Accepted(String),
    Aborted,
}

pub struct LineReader<C: ConsoleOutput> {
    editor: LineEditor<C>,
    bindings: KeyBindingSet,
    translator: Box<dyn KeyTranslator>,
    undo: UndoEngine,
    last_was_completion: bool,
}

impl<C: ConsoleOutput> LineReader<C> {
    pub fn new(editor: LineEditor<C>, bindings: KeyBindingSet) -> Self {
        Self {
            editor,
            bindings,
            translator: Box::new(CharKeyTranslator),
            undo: UndoEngine::new(),
            last_was_completion: false,
        }
    }

    pub fn with_translator(mut self, translator: Box<dyn KeyTranslator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn editor(&self) -> &LineEditor<C> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut LineEditor<C> {
        &mut self.editor
    }

    pub fn bindings(&self) -> &KeyBindingSet {
        &self.bindings
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }

    pub fn into_editor(self) -> LineEditor<C> {
        self.editor
    }

    /// Start reading a new line: empty buffer, history cursor past the end,
    /// fresh undo stack, prompt drawn at the console cursor.
    pub fn begin(&mut self, prompt: &str) -> Result<(), EditError> {
        self.editor.set_prompt(prompt)?;
        self.editor.reset();
        self.editor.history_mut().reset_cursor();
        self.undo.clear();
        self.last_was_completion = false;
        self.editor.display_prompt()
    }

    /// Process one key event.
    ///
    /// A line too long for the console is not fatal, and neither is recalled
    /// or completed text holding control characters: the key is dropped and
    /// the session stays pending.
    pub fn feed(&mut self, key: KeyEvent) -> Result<ReadOutcome, EditError> {
        match self.apply(key) {
            Err(EditError::Unsupported { required, capacity }) => {
                warn!(target: "actions.dispatch", ?key, required, capacity, "key_dropped_line_too_long");
                self.last_was_completion = false;
                Ok(ReadOutcome::Pending)
            }
            Err(EditError::InvalidArgument(reason)) => {
                warn!(target: "actions.dispatch", ?key, reason, "key_dropped_invalid_text");
                self.last_was_completion = false;
                Ok(ReadOutcome::Pending)
            }
            other => other,
        }
    }

    fn apply(&mut self, key: KeyEvent) -> Result<ReadOutcome, EditError> {
        if let Some(op) = self.bindings.resolve(&key, self.translator.as_ref()) {
            let continuing = self.last_was_completion && op.is_completion();
            let result = dispatch(op, &mut self.editor, &mut self.undo, continuing)?;
            self.last_was_completion = op.is_completion();
            if result.accept {
                return self.accept();
            }
            if result.abort {
                return self.abort();
            }
            return Ok(ReadOutcome::Pending);
        }

        self.last_was_completion = false;
        if key.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) {
            trace!(target: "actions.dispatch", ?key, "unbound_key");
            return Ok(ReadOutcome::Pending);
        }
        let Some(c) = self.translator.translate(&key).filter(|c| !c.is_control()) else {
            trace!(target: "actions.dispatch", ?key, "unbound_key");
            return Ok(ReadOutcome::Pending);
        };
        let before = self.editor.snapshot();
        self.editor.type_char(c)?;
        self.undo.note_typed(|| before);
        Ok(ReadOutcome::Pending)
    }

    fn accept(&mut self) -> Result<ReadOutcome, EditError> {
        self.editor.move_cursor_to_end()?;
        self.editor.finish_line()?;
        let line = self.editor.contents();
        if !line.trim().is_empty() {
            self.editor.save_to_history();
        }
        self.editor.history_mut().reset_cursor();
        self.undo.clear();
        debug!(target: "actions.dispatch", len = line.chars().count(), "line_accepted");
        Ok(ReadOutcome::Accepted(line))
    }

    fn abort(&mut self) -> Result<ReadOutcome, EditError> {
        self.editor.finish_line()?;
        self.undo.clear();
        debug!(target: "actions.dispatch", "line_aborted");
        Ok(ReadOutcome::Aborted)
    }
}
