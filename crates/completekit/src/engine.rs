//! # Completion engine
//!
//! ## Overview
//!
//! The engine is a two-state machine. It is inactive until a completion pass
//! finds a non-empty word at the caret with at least one ranked match; it
//! then holds a [CompletionSession] until the suggestion is accepted, the
//! pass is re-run, or the host cancels. Every pass rebuilds the session from
//! scratch: the candidate sets involved are small, and a full rebuild cannot
//! desynchronize from the buffer.
//!
//! A session captures the caret offset and the buffer revision at build
//! time. Acceptance consumes the captured offset exactly once, and refuses
//! to run at all if the buffer has mutated since capture; the host's next
//! debounced pass will repopulate the list for the new buffer.
use tracing::debug;

use crate::buffer::{CharOff, TextBuffer};
use crate::fuzzy::fuzzy_search;
use crate::lexer::{extract_keywords, tokenize, RESERVED_WORDS};
use crate::list::{MoveDir1D, SuggestionList};

/// A populated suggestion list plus the caret state captured when it was
/// built.
#[derive(Clone, Debug)]
pub struct CompletionSession {
    list: SuggestionList,
    query: String,
    caret: CharOff,
    revision: u64,
}

impl CompletionSession {
    /// The ranked suggestion list.
    pub fn list(&self) -> &SuggestionList {
        &self.list
    }

    /// The word being typed when the list was built.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The caret offset captured when the list was built.
    pub fn caret(&self) -> CharOff {
        self.caret
    }
}

/// Drives the inactive/active completion cycle over a [TextBuffer].
#[derive(Debug, Default)]
pub struct CompletionEngine {
    session: Option<CompletionSession>,
}

impl CompletionEngine {
    /// Whether a suggestion list is currently populated.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&CompletionSession> {
        self.session.as_ref()
    }

    /// Run a completion pass for the word at `caret`.
    ///
    /// Any previous session is discarded first. When the word at the caret
    /// is empty, or nothing matches it, the engine deactivates silently and
    /// this returns [None].
    pub fn trigger(&mut self, buffer: &TextBuffer, caret: CharOff) -> Option<&CompletionSession> {
        self.session = None;

        let caret = buffer.clamp(caret);
        let query = buffer.slice(buffer.word_at(caret));

        if query.trim().is_empty() {
            return None;
        }

        let lexemes = tokenize(&buffer.to_string());

        // Reserved words are always candidates; words seen in the buffer
        // follow in first-seen order.
        let mut candidates: Vec<String> =
            RESERVED_WORDS.iter().map(|word| word.to_string()).collect();

        for word in extract_keywords(&lexemes) {
            if !candidates.contains(&word) {
                candidates.push(word);
            }
        }

        let matches = fuzzy_search(&candidates, &query);
        let list = SuggestionList::new(matches)?;

        debug!(query = %query, matches = list.len(), "completion pass populated suggestions");

        self.session = Some(CompletionSession {
            list,
            query,
            caret,
            revision: buffer.revision(),
        });

        return self.session.as_ref();
    }

    /// Move focus through the active suggestion list, wrapping at the ends.
    pub fn navigate(&mut self, dir: MoveDir1D) {
        if let Some(session) = &mut self.session {
            session.list.navigate(dir);
        }
    }

    /// Discard the active session, if any.
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            debug!("completion cancelled");
        }
    }

    /// Accept the focused suggestion: splice it over the word at the
    /// captured caret and return the new caret offset.
    ///
    /// The session is consumed either way. If the buffer has mutated since
    /// the session was built, the captured offset is stale and acceptance is
    /// refused.
    pub fn accept(&mut self, buffer: &mut TextBuffer) -> Option<CharOff> {
        let session = self.session.take()?;

        if session.revision != buffer.revision() {
            debug!("buffer mutated since capture; dropping stale suggestions");

            return None;
        }

        let replacement = session.list.selected_text();
        let caret = buffer.replace_word(replacement, session.caret);

        debug!(replacement = %replacement, "accepted suggestion");

        Some(caret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_texts(session: &CompletionSession) -> Vec<String> {
        session.list().matches().iter().map(|m| m.text.clone()).collect()
    }

    #[test]
    fn test_trigger_populates_from_buffer_and_reserved_words() {
        let buffer = TextBuffer::from("const forecast = 1;\nfo");
        let mut engine = CompletionEngine::default();

        let session = engine.trigger(&buffer, CharOff::from(22)).unwrap();
        assert_eq!(session.query(), "fo");

        let texts = match_texts(session);

        // "for" is reserved and ranks ahead of the identifier "forecast".
        assert!(texts.contains(&"for".to_string()));
        assert!(texts.contains(&"forecast".to_string()));
        assert!(engine.is_active());
    }

    #[test]
    fn test_trigger_deactivates_on_empty_word() {
        let buffer = TextBuffer::from("const x = 1; ");
        let mut engine = CompletionEngine::default();

        // Populate first, then retrigger at whitespace.
        engine.trigger(&buffer, CharOff::from(7)).unwrap();
        assert!(engine.is_active());

        assert!(engine.trigger(&buffer, CharOff::from(13)).is_none());
        assert!(!engine.is_active());
    }

    #[test]
    fn test_typed_word_is_its_own_first_match() {
        // The word being typed is itself a buffer identifier, so it always
        // heads the list as an exact match; real completions follow it.
        let buffer = TextBuffer::from("zzzqqq");
        let mut engine = CompletionEngine::default();

        let session = engine.trigger(&buffer, CharOff::from(6)).unwrap();
        assert_eq!(session.list().selected_text(), "zzzqqq");
        assert_eq!(session.list().len(), 1);
    }

    #[test]
    fn test_retrigger_rebuilds_and_resets_focus() {
        let buffer = TextBuffer::from("fo");
        let mut engine = CompletionEngine::default();

        engine.trigger(&buffer, CharOff::from(2)).unwrap();
        engine.navigate(MoveDir1D::Next);
        let moved = engine.session().unwrap().list().selected_index();
        assert_eq!(moved, 1);

        // Rebuilding from the same buffer resets focus to the first match.
        engine.trigger(&buffer, CharOff::from(2)).unwrap();
        assert_eq!(engine.session().unwrap().list().selected_index(), 0);
    }

    #[test]
    fn test_accept_replaces_and_deactivates() {
        let mut buffer = TextBuffer::from("const fo");
        let mut engine = CompletionEngine::default();

        engine.trigger(&buffer, CharOff::from(8)).unwrap();

        // The exact word heads the list; the reserved word "for" is next.
        assert_eq!(engine.session().unwrap().list().selected_text(), "fo");
        engine.navigate(MoveDir1D::Next);
        assert_eq!(engine.session().unwrap().list().selected_text(), "for");

        let caret = engine.accept(&mut buffer).unwrap();
        assert_eq!(buffer.to_string(), "const for");
        assert_eq!(caret, CharOff::from(9));
        assert!(!engine.is_active());
    }

    #[test]
    fn test_accept_refuses_stale_session() {
        let mut buffer = TextBuffer::from("const fo");
        let mut engine = CompletionEngine::default();

        engine.trigger(&buffer, CharOff::from(8)).unwrap();

        // The buffer mutates while the list is open.
        buffer.insert(CharOff::from(8), "o");

        assert!(engine.accept(&mut buffer).is_none());
        assert!(!engine.is_active());
        assert_eq!(buffer.to_string(), "const foo");
    }

    #[test]
    fn test_cancel_discards_session() {
        let buffer = TextBuffer::from("fo");
        let mut engine = CompletionEngine::default();

        engine.trigger(&buffer, CharOff::from(2)).unwrap();
        engine.cancel();

        assert!(!engine.is_active());
        assert!(engine.session().is_none());
    }
}
