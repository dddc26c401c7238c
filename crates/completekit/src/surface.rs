//! # Host boundaries
//!
//! ## Overview
//!
//! The core never renders, binds input devices, or decides where a popup
//! goes. Hosts implement the traits in this module to connect those concerns:
//! a [PresentationSurface] showing the buffer as line nodes, a
//! [SuggestionSurface] showing the ranked matches, and a [Persistence] store
//! for buffer contents.
//!
//! [PlainNodes] and [FileStore] are the crate's own minimal implementations,
//! suitable for tests and headless hosts.
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::errors::SessionResult;
use crate::list::SuggestionRow;

/// A point in host screen coordinates, used only to anchor the suggestion
/// popup near the caret.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScreenPoint {
    /// Horizontal coordinate.
    pub x: i32,

    /// Vertical coordinate.
    pub y: i32,
}

/// The structural presentation of the buffer: one node per line.
pub trait PresentationSurface {
    /// Rebuild the line nodes from the logical buffer text, discarding any
    /// existing nodes. Implementations whose nodes carry markup must escape
    /// characters the markup would misinterpret.
    fn render(&mut self, text: &str);

    /// The current node texts, in order. Joining them with a single newline
    /// must reconstruct the logical buffer exactly.
    fn node_texts(&self) -> Vec<String>;

    /// Screen origin of the caret, if the host can produce one.
    fn caret_screen_origin(&self) -> Option<ScreenPoint> {
        None
    }
}

/// An in-memory [PresentationSurface] holding plain-text nodes.
#[derive(Clone, Debug, Default)]
pub struct PlainNodes {
    nodes: Vec<String>,
}

impl PresentationSurface for PlainNodes {
    fn render(&mut self, text: &str) {
        // Plain text carries no markup, so nothing needs escaping.
        self.nodes = text.split('\n').map(String::from).collect();
    }

    fn node_texts(&self) -> Vec<String> {
        self.nodes.clone()
    }
}

/// Renders the suggestion list and its focus.
///
/// The surface reports accept and cancel interactions back into the session's
/// event feed; it never mutates the buffer itself.
pub trait SuggestionSurface {
    /// Show the given rows with focus on `focus_row`, optionally anchored at
    /// `anchor`. Replaces any previously shown list.
    fn show(&mut self, rows: &[SuggestionRow], focus_row: usize, anchor: Option<ScreenPoint>);

    /// Remove any shown list.
    fn clear(&mut self);
}

/// Fire-and-forget storage for buffer contents.
pub trait Persistence {
    /// Persist the buffer text.
    fn save(&mut self, text: &str) -> SessionResult<()>;

    /// Fetch the previously persisted text, if any exists.
    fn load(&mut self) -> SessionResult<Option<String>>;
}

/// [Persistence] backed by a single file on disk.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store buffer contents at the given path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileStore { path: path.into() }
    }
}

impl Persistence for FileStore {
    fn save(&mut self, text: &str) -> SessionResult<()> {
        std::fs::write(&self.path, text)?;

        Ok(())
    }

    fn load(&mut self) -> SessionResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
