//! # Suggestion list
//!
//! ## Overview
//!
//! This module tracks focus within the ranked matches a completion pass
//! produced. Navigation is cyclic: stepping backward from the first match
//! lands on the last, and stepping forward from the last returns to the
//! first.
//!
//! Some hosts render a non-selectable sentinel row before and after the real
//! matches so that focus events at either edge re-enter the list;
//! [SuggestionList::display_rows] and [SuggestionList::focus_row] produce
//! that padded form. The sentinels are purely a presentation artifact: focus
//! as tracked here only ever rests on a real match.
use crate::fuzzy::ScoredMatch;
use crate::util::idx_offset;

/// Direction for moving focus through the suggestion list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveDir1D {
    /// Move towards the start of the list.
    Previous,

    /// Move towards the end of the list.
    Next,
}

/// A row in the rendered form of the suggestion list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SuggestionRow {
    /// A non-selectable boundary row enabling wraparound focus handling.
    Sentinel,

    /// A real, selectable match.
    Match(String),
}

/// Ranked matches with a focus index over them.
///
/// A list always contains at least one match; an empty match set means the
/// completion engine stays inactive and no list exists at all.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SuggestionList {
    matches: Vec<ScoredMatch>,
    selected: usize,
}

impl SuggestionList {
    /// Build a list over ranked matches, with focus on the first entry.
    ///
    /// Returns [None] when there are no matches.
    pub fn new(matches: Vec<ScoredMatch>) -> Option<Self> {
        if matches.is_empty() {
            return None;
        }

        Some(SuggestionList { matches, selected: 0 })
    }

    /// Number of real matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Index of the focused match.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Text of the focused match.
    pub fn selected_text(&self) -> &str {
        &self.matches[self.selected].text
    }

    /// The ranked matches in display order.
    pub fn matches(&self) -> &[ScoredMatch] {
        &self.matches
    }

    /// Move focus one step, wrapping around at either end.
    pub fn navigate(&mut self, dir: MoveDir1D) {
        if let Some(idx) = idx_offset(self.selected, 1, &dir, self.matches.len()) {
            self.selected = idx;
        }
    }

    /// The sentinel-padded rows a host renders: one sentinel, the matches in
    /// order, one sentinel.
    pub fn display_rows(&self) -> Vec<SuggestionRow> {
        let mut rows = Vec::with_capacity(self.matches.len() + 2);

        rows.push(SuggestionRow::Sentinel);
        rows.extend(self.matches.iter().map(|m| SuggestionRow::Match(m.text.clone())));
        rows.push(SuggestionRow::Sentinel);

        return rows;
    }

    /// Index of the focused match within [display_rows](Self::display_rows).
    ///
    /// The first real row sits at index 1 and the last at `len()`; the
    /// sentinel rows at either end are never the focus.
    pub fn focus_row(&self) -> usize {
        self.selected + 1
    }
}
