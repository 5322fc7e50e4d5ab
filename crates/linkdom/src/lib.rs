//! # Linkdom
//!
//! Transcript document model for clickable links in an interactive fiction
//! transcript.
//!
//! Linkdom stores the link elements that a game has printed (object names,
//! compass exits and generic command links) as typed values rather than as
//! untyped DOM nodes. It provides:
//!
//! - **Fragments**: renderer output, a sequence of text runs and link elements
//! - **Stable handles**: every printed link gets an [`ElementId`]
//! - **Identifier index**: object name / direction to the set of live handles
//! - **Panel visibility**: the open/closed state of object verb panels
//! - **Markup**: HTML emission with a reversible enabled/disabled class contract
//!
//! ## Quick Start
//!
//! ```
//! use linkdom::{Document, Element, Fragment, ObjectLink, VerbEntry};
//!
//! let mut doc = Document::new();
//!
//! let mut fragment = Fragment::text("You can see ");
//! fragment.push_link(Element::Object(ObjectLink::new(
//!     "lamp",
//!     "lamp",
//!     vec![VerbEntry::new("Take", "lamp")],
//! )));
//! fragment.push_text(".");
//!
//! let ids = doc.print(fragment);
//! assert_eq!(ids.len(), 1);
//! assert_eq!(doc.object_elements("lamp").count(), 1);
//! assert!(doc.to_html().contains(r#"class="droplink""#));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod element;
pub mod fragment;
pub mod markup;

// Re-exports for convenience
pub use document::{Block, Document, DocumentError, Segment};
pub use element::{
    CommandLink, Element, ExitLabel, ExitLink, LinkKind, LinkState, ObjectLink, VerbEntry,
    VerbPanel,
};
pub use fragment::{Fragment, Part};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle of a printed link element.
///
/// Handles are assigned monotonically by the [`Document`] and are never
/// reused, so a handle held after its element scrolled away simply stops
/// resolving.
///
/// # Example
///
/// ```
/// use linkdom::ElementId;
///
/// let a = ElementId::new(1);
/// let b = ElementId::new(2);
/// assert!(a < b);
/// assert_eq!(a.as_u64(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(u64);

impl ElementId {
    /// Creates a handle from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value of this handle.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_id_ordering() {
        assert!(ElementId::new(3) < ElementId::new(10));
        assert_eq!(ElementId::new(7).as_u64(), 7);
    }

    #[test]
    fn element_id_display() {
        assert_eq!(ElementId::new(42).to_string(), "#42");
        assert_eq!(format!("{:?}", ElementId::new(42)), "ElementId(42)");
    }
}
