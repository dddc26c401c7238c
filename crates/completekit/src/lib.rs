//! # completekit
//!
//! ## Overview
//!
//! This crate implements the core of an in-editor code-completion engine. As a
//! user types into a plain-text code buffer, the [editor::EditorSession]
//! identifies the word currently being typed, tokenizes the buffer with
//! [lexer::tokenize], ranks the completable words against it with
//! [fuzzy::fuzzy_search], and drives a navigable [list::SuggestionList].
//! Accepting a suggestion splices it over the typed word and repositions the
//! caret just after the inserted text.
//!
//! The logical buffer ([buffer::TextBuffer]) is the single source of truth;
//! the presentation layer's one-node-per-line projection is derived from it
//! and rebuilt wholesale after every replacement. Hosts connect rendering,
//! persistence, and input devices through the traits in [surface].

// Require docs for public APIs, and disable the more annoying clippy lints.
#![deny(missing_docs)]
#![allow(clippy::bool_to_int_with_if)]
#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::match_like_matches_macro)]
#![allow(clippy::needless_return)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]

#[macro_use]
mod util;

pub mod buffer;
pub mod debounce;
pub mod editor;
pub mod engine;
pub mod errors;
pub mod fuzzy;
pub mod lexer;
pub mod list;
pub mod surface;
