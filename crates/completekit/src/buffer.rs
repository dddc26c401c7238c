//! # Logical text buffer
//!
//! ## Overview
//!
//! This module wraps a rope so that the rest of the crate can treat the
//! document as one logical string addressed by [CharOff], while the
//! presentation layer shows it as an ordered sequence of line nodes addressed
//! by [Position]. The two addressings convert through
//! [TextBuffer::offset_to_position] and [TextBuffer::position_to_offset],
//! which are exact inverses over `[0, len]`.
//!
//! Every mutation bumps the buffer's revision counter, which lets a
//! completion session detect that the caret offset it captured has gone
//! stale (see [engine](crate::engine)).
use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::ops::Range;

use ropey::Rope;

use crate::lexer::is_symbol;

/// Character offset into a [TextBuffer].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    derive_more::Add,
    derive_more::Sub,
    derive_more::From,
    derive_more::Into,
)]
pub struct CharOff(usize);

impl PartialOrd for CharOff {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CharOff {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// A position within the structural projection of the buffer: a line node and
/// a character column inside that node.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Position {
    /// Index of the line node.
    pub line: usize,

    /// Character offset within the line node. Columns never address the
    /// newline separating two nodes; the separator belongs to neither.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

/// Whether a character terminates the word being typed.
fn is_boundary(c: char) -> bool {
    return is_symbol(c) || c.is_whitespace();
}

/// The logical source text, and the single source of truth for an editor.
///
/// The presentation layer's line nodes are a projection of this buffer:
/// joining [TextBuffer::node_texts] with a single newline reconstructs the
/// logical string exactly.
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    rope: Rope,
    revision: u64,
}

impl TextBuffer {
    /// Length of the buffer in characters.
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    /// Whether the buffer contains no characters.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Number of line nodes in the structural projection.
    pub fn node_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Monotonic counter bumped on every mutation. Captured offsets are only
    /// valid while the revision they were captured at is still current.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Return the character at the given offset, if it is in range.
    pub fn char_at(&self, off: CharOff) -> Option<char> {
        self.rope.get_char(off.0)
    }

    /// Clamp an offset into the valid range `[0, len]`.
    pub fn clamp(&self, off: CharOff) -> CharOff {
        off.min(CharOff(self.len()))
    }

    /// Number of addressable columns in a line node (the newline separator is
    /// not a column).
    pub fn line_columns(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        let len = slice.len_chars();

        if len > 0 && slice.char(len - 1) == '\n' {
            return len - 1;
        } else {
            return len;
        }
    }

    /// The texts of the structural line nodes, in order.
    ///
    /// Joining these with a single `'\n'` reproduces the logical buffer: no
    /// trailing content is lost, and no extra separators appear.
    pub fn node_texts(&self) -> Vec<String> {
        self.rope
            .lines()
            .map(|line| {
                let mut text = line.to_string();

                if text.ends_with('\n') {
                    text.pop();
                }

                text
            })
            .collect()
    }

    /// Convert a character offset to a [Position].
    ///
    /// Offsets past the end of the buffer are clamped to the buffer end. An
    /// offset sitting exactly on a newline maps to the end-of-line column of
    /// the node before it.
    pub fn offset_to_position(&self, off: CharOff) -> Position {
        let off = self.clamp(off).0;

        let line = self.rope.char_to_line(off);
        let column = off - self.rope.line_to_char(line);

        Position::new(line, column)
    }

    /// Convert a [Position] to a character offset.
    ///
    /// Out-of-range lines and columns are clamped, so this is total; over
    /// valid positions it is the exact inverse of
    /// [offset_to_position](TextBuffer::offset_to_position).
    pub fn position_to_offset(&self, pos: &Position) -> CharOff {
        let line = pos.line.min(self.node_count().saturating_sub(1));
        let start = self.rope.line_to_char(line);
        let column = pos.column.min(self.line_columns(line));

        CharOff(start + column)
    }

    /// Locate the word containing the given offset as a half-open interval.
    ///
    /// A word is a maximal run of characters that are neither symbols nor
    /// whitespace; the delimiting characters are never part of the interval.
    /// An offset sitting on a newline (or at the very end of the buffer)
    /// therefore yields the word just typed before it. When no word character
    /// is adjacent on either side, the interval is empty.
    pub fn word_at(&self, off: CharOff) -> Range<CharOff> {
        let n = self.len();
        let p = off.0.min(n);

        let mut start = p;

        while start > 0 {
            match self.rope.get_char(start - 1) {
                Some(c) if !is_boundary(c) => start -= 1,
                _ => break,
            }
        }

        let mut end = p;

        while end < n {
            match self.rope.get_char(end) {
                Some(c) if !is_boundary(c) => end += 1,
                _ => break,
            }
        }

        CharOff(start)..CharOff(end)
    }

    /// Copy out the text within a range of offsets.
    pub fn slice(&self, range: Range<CharOff>) -> String {
        let start = self.clamp(range.start).0;
        let end = self.clamp(range.end).0.max(start);

        self.rope.slice(start..end).to_string()
    }

    /// Insert text at an offset, clamped into range.
    pub fn insert(&mut self, off: CharOff, text: &str) {
        let off = self.clamp(off).0;

        self.rope.insert(off, text);
        self.revision += 1;
    }

    /// Remove the characters within a range of offsets.
    pub fn remove(&mut self, range: Range<CharOff>) {
        let start = self.clamp(range.start).0;
        let end = self.clamp(range.end).0.max(start);

        if start == end {
            return;
        }

        self.rope.remove(start..end);
        self.revision += 1;
    }

    /// Splice `replacement` over the word containing `caret`, leaving all
    /// text outside the word interval untouched, and return the offset just
    /// after the inserted text.
    ///
    /// When the word interval is empty, the replacement is inserted at the
    /// (clamped) caret.
    pub fn replace_word(&mut self, replacement: &str, caret: CharOff) -> CharOff {
        let range = self.word_at(caret);
        let start = range.start.0;

        self.rope.remove(start..range.end.0);
        self.rope.insert(start, replacement);
        self.revision += 1;

        CharOff(start + replacement.chars().count())
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        TextBuffer { rope: Rope::from_str(text), revision: 0 }
    }
}

impl From<&String> for TextBuffer {
    fn from(text: &String) -> Self {
        TextBuffer::from(text.as_str())
    }
}

impl Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_position_roundtrip() {
        let buf = TextBuffer::from("let x = 1;\nlet y = 2;\n\nfoo(x, y);");

        // Every valid offset survives a roundtrip through Position.
        for off in 0..=buf.len() {
            let off = CharOff::from(off);
            let pos = buf.offset_to_position(off);

            assert_eq!(buf.position_to_offset(&pos), off, "offset {off:?} via {pos:?}");
        }

        // Every valid position survives a roundtrip through CharOff.
        for line in 0..buf.node_count() {
            for column in 0..=buf.line_columns(line) {
                let pos = Position::new(line, column);
                let off = buf.position_to_offset(&pos);

                assert_eq!(buf.offset_to_position(off), pos);
            }
        }
    }

    #[test]
    fn test_offset_position_edges() {
        let buf = TextBuffer::from("ab\ncd");

        // End of a line maps to the last column before the newline.
        assert_eq!(buf.offset_to_position(2.into()), Position::new(0, 2));

        // Start of the following line.
        assert_eq!(buf.offset_to_position(3.into()), Position::new(1, 0));

        // Offsets past the end clamp to the buffer end.
        assert_eq!(buf.offset_to_position(100.into()), Position::new(1, 2));
        assert_eq!(buf.position_to_offset(&Position::new(9, 9)), 5.into());
    }

    #[test]
    fn test_node_texts_reconstruct() {
        let buf = TextBuffer::from("a\nb\nc");
        assert_eq!(buf.node_texts(), strs!["a", "b", "c"]);
        assert_eq!(buf.node_texts().join("\n"), "a\nb\nc");

        // A trailing newline produces a final empty node, not lost content.
        let buf = TextBuffer::from("a\nb\n");
        assert_eq!(buf.node_texts(), strs!["a", "b", ""]);
        assert_eq!(buf.node_texts().join("\n"), "a\nb\n");

        let buf = TextBuffer::from("");
        assert_eq!(buf.node_texts(), strs![""]);
    }

    #[test]
    fn test_word_at_boundaries() {
        let buf = TextBuffer::from("let xyz=1");

        // Caret between "xy" and "z" finds the whole word, excluding "=".
        let range = buf.word_at(6.into());
        assert_eq!(range, CharOff::from(4)..CharOff::from(7));
        assert_eq!(buf.slice(range), "xyz");

        // Caret inside whitespace with no adjacent word yields an empty interval.
        let buf = TextBuffer::from("a  b");
        let range = buf.word_at(2.into());
        assert_eq!(range, CharOff::from(2)..CharOff::from(2));
    }

    #[test]
    fn test_word_at_newline() {
        let buf = TextBuffer::from("foo\nbar");

        // A caret sitting on the newline refers to the word just typed.
        let range = buf.word_at(3.into());
        assert_eq!(buf.slice(range), "foo");

        // A caret at the very end of the buffer behaves the same way.
        let range = buf.word_at(7.into());
        assert_eq!(buf.slice(range), "bar");
    }

    #[test]
    fn test_replace_word() {
        let mut buf = TextBuffer::from("const fo");

        let caret = buf.replace_word("for", 8.into());
        assert_eq!(buf.to_string(), "const for");
        assert_eq!(caret, CharOff::from(9));

        // Replacement in the middle of a line leaves the rest untouched.
        let mut buf = TextBuffer::from("let fo = 1;");
        let caret = buf.replace_word("forEach", 6.into());
        assert_eq!(buf.to_string(), "let forEach = 1;");
        assert_eq!(caret, CharOff::from(11));
    }

    #[test]
    fn test_revision_tracks_mutation() {
        let mut buf = TextBuffer::from("abc");
        assert_eq!(buf.revision(), 0);

        buf.insert(3.into(), "d");
        assert_eq!(buf.revision(), 1);

        buf.remove(CharOff::from(0)..CharOff::from(1));
        assert_eq!(buf.revision(), 2);

        // Empty removals are not mutations.
        buf.remove(CharOff::from(1)..CharOff::from(1));
        assert_eq!(buf.revision(), 2);

        buf.replace_word("xyz", 2.into());
        assert_eq!(buf.revision(), 3);
    }
}
