//! # Editor session
//!
//! ## Overview
//!
//! An [EditorSession] owns the logical buffer and the caret, and turns the
//! keyboard boundary's [EditorEvent]s into buffer mutations and completion
//! activity. The expensive work is debounced: edits mark the completion and
//! save gates, and the host's event loop calls [EditorSession::tick] to run
//! whichever passes have fallen due.
//!
//! Everything runs synchronously inside the calling event handler; there are
//! no threads, timers, or locks anywhere in a session.
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::buffer::{CharOff, TextBuffer};
use crate::debounce::Debounce;
use crate::engine::CompletionEngine;
use crate::errors::SessionResult;
use crate::list::MoveDir1D;
use crate::surface::{Persistence, PresentationSurface, SuggestionSurface};

/// What a tab keypress inserts when no suggestion list is active.
const TAB_FILL: &str = "    ";

/// Named configuration for an [EditorSession].
#[derive(Clone, Debug)]
pub struct EditorConfig {
    /// Quiet window after the last edit before a completion pass runs.
    pub completion_window: Duration,

    /// Quiet window after the last edit before buffer contents are persisted.
    pub save_window: Duration,

    /// Buffer contents used when the persistence boundary has nothing stored.
    pub placeholder: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            completion_window: Duration::from_millis(150),
            save_window: Duration::from_millis(1000),
            placeholder: String::new(),
        }
    }
}

/// Edit and control events delivered by the keyboard boundary.
///
/// The core never binds to input devices; the host translates key and
/// pointer input into these values and feeds them to
/// [EditorSession::handle_event].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EditorEvent {
    /// Insert a character at the caret.
    Insert(char),

    /// Delete the character before the caret.
    DeleteBackward,

    /// Insert a tab. With no active suggestion list this becomes spaces;
    /// otherwise it is left for the suggestion surface's focus handling.
    Tab,

    /// Cancel the active suggestion list, if any.
    Escape,

    /// Move suggestion focus.
    Navigate(MoveDir1D),

    /// Accept the focused suggestion.
    Accept,
}

/// Owns a buffer, caret, and completion engine, and drives them from events.
pub struct EditorSession<P: Persistence> {
    config: EditorConfig,
    buffer: TextBuffer,
    caret: CharOff,
    engine: CompletionEngine,
    completion_gate: Debounce,
    save_gate: Debounce,
    store: P,
}

impl<P: Persistence> EditorSession<P> {
    /// Start a session from previously persisted contents, falling back to
    /// the configured placeholder text, and render the initial presentation.
    pub fn open(
        config: EditorConfig,
        mut store: P,
        presentation: &mut dyn PresentationSurface,
    ) -> SessionResult<Self> {
        let text = match store.load()? {
            Some(text) => text,
            None => config.placeholder.clone(),
        };

        debug!(chars = text.chars().count(), "opening editor session");

        let buffer = TextBuffer::from(&text);
        presentation.render(&text);

        let session = EditorSession {
            completion_gate: Debounce::new(config.completion_window),
            save_gate: Debounce::new(config.save_window),
            config,
            buffer,
            caret: CharOff::from(0),
            engine: CompletionEngine::default(),
            store,
        };

        Ok(session)
    }

    /// The logical buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The caret as a linear offset.
    pub fn caret(&self) -> CharOff {
        self.caret
    }

    /// The completion engine.
    pub fn engine(&self) -> &CompletionEngine {
        &self.engine
    }

    /// Move the caret, clamped into the buffer.
    pub fn set_caret(&mut self, caret: CharOff) {
        self.caret = self.buffer.clamp(caret);
    }

    /// Apply one event from the keyboard boundary.
    pub fn handle_event(
        &mut self,
        event: EditorEvent,
        now: Instant,
        presentation: &mut dyn PresentationSurface,
        suggestions: &mut dyn SuggestionSurface,
    ) {
        trace!(?event, "editor event");

        match event {
            EditorEvent::Insert(c) => {
                let at = usize::from(self.caret);

                self.buffer.insert(self.caret, &c.to_string());
                self.caret = CharOff::from(at + 1);
                presentation.render(&self.buffer.to_string());

                // Newlines end the word being typed, so they only schedule a
                // save; anything printable schedules a completion pass too.
                if c != '\n' {
                    self.completion_gate.mark(now);
                }

                self.save_gate.mark(now);
            },
            EditorEvent::DeleteBackward => {
                let at = usize::from(self.caret);

                if at == 0 {
                    return;
                }

                // Deleting the first column joins two line nodes; the word
                // at the caret changes context, so a completion pass is due.
                if self.buffer.offset_to_position(self.caret).column == 0 {
                    self.completion_gate.mark(now);
                }

                self.buffer.remove(CharOff::from(at - 1)..CharOff::from(at));
                self.caret = CharOff::from(at - 1);
                presentation.render(&self.buffer.to_string());

                self.save_gate.mark(now);
            },
            EditorEvent::Tab => {
                // With a list showing, tab is the surface's focus key.
                if self.engine.is_active() {
                    return;
                }

                let at = usize::from(self.caret);

                self.buffer.insert(self.caret, TAB_FILL);
                self.caret = CharOff::from(at + TAB_FILL.len());
                presentation.render(&self.buffer.to_string());

                self.save_gate.mark(now);
            },
            EditorEvent::Escape => {
                self.engine.cancel();
                suggestions.clear();
            },
            EditorEvent::Navigate(dir) => {
                self.engine.navigate(dir);
                self.show_suggestions(presentation, suggestions);
            },
            EditorEvent::Accept => {
                let Some(caret) = self.engine.accept(&mut self.buffer) else {
                    suggestions.clear();
                    return;
                };

                suggestions.clear();

                // The presentation is rebuilt from the new logical buffer
                // before the caret is restored through the position mapper.
                presentation.render(&self.buffer.to_string());

                let pos = self.buffer.offset_to_position(caret);
                self.caret = self.buffer.position_to_offset(&pos);

                self.save_gate.mark(now);
            },
        }
    }

    /// Run whichever debounced passes have fallen due.
    ///
    /// Completion and save are gated independently; only the last edit
    /// within each quiet window actually runs its pass.
    pub fn tick(
        &mut self,
        now: Instant,
        presentation: &mut dyn PresentationSurface,
        suggestions: &mut dyn SuggestionSurface,
    ) {
        if self.completion_gate.take(now) {
            self.engine.trigger(&self.buffer, self.caret);

            if self.engine.is_active() {
                self.show_suggestions(presentation, suggestions);
            } else {
                suggestions.clear();
            }
        }

        if self.save_gate.take(now) {
            // Fire-and-forget: a failed save is logged, never surfaced.
            if let Err(e) = self.store.save(&self.buffer.to_string()) {
                debug!(error = %e, "saving buffer contents failed");
            }
        }
    }

    /// The named configuration the session was opened with.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    fn show_suggestions(
        &self,
        presentation: &dyn PresentationSurface,
        suggestions: &mut dyn SuggestionSurface,
    ) {
        let Some(session) = self.engine.session() else {
            return;
        };

        let list = session.list();
        let anchor = presentation.caret_screen_origin();

        suggestions.show(&list.display_rows(), list.focus_row(), anchor);
    }
}
