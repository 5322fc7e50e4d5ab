//! Markup fragments produced by renderers.
//!
//! A [`Fragment`] is what a renderer returns: text runs interleaved with
//! link elements in their initial state. Rendering is side-effect free;
//! elements only get handles once the fragment is printed into a
//! [`Document`](crate::Document).

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::markup;

/// One piece of a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Part {
    /// Literal text (escaped on output).
    Text(String),
    /// Raw markup emitted verbatim (already escaped by its producer).
    Raw(String),
    /// A link element in its initial state.
    Link(Element),
}

/// A sequence of text and link parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    parts: Vec<Part>,
}

impl Fragment {
    /// Creates an empty fragment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fragment holding one text run.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        let mut fragment = Self::new();
        fragment.push_text(text);
        fragment
    }

    /// Creates a fragment holding a single link.
    #[must_use]
    pub fn link(element: Element) -> Self {
        Self {
            parts: vec![Part::Link(element)],
        }
    }

    /// Appends text, merging with a trailing text run.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        if let Some(Part::Text(last)) = self.parts.last_mut() {
            last.push_str(&text);
        } else {
            self.parts.push(Part::Text(text));
        }
    }

    /// Appends pre-rendered markup.
    pub fn push_raw(&mut self, markup: impl Into<String>) {
        self.parts.push(Part::Raw(markup.into()));
    }

    /// Appends a link element.
    pub fn push_link(&mut self, element: Element) {
        self.parts.push(Part::Link(element));
    }

    /// Appends every part of `other`.
    pub fn append(&mut self, other: Fragment) {
        for part in other.parts {
            match part {
                Part::Text(t) => self.push_text(t),
                other => self.parts.push(other),
            }
        }
    }

    /// Builder form of [`Fragment::push_text`].
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    /// Builder form of [`Fragment::append`].
    #[must_use]
    pub fn with(mut self, other: Fragment) -> Self {
        self.append(other);
        self
    }

    /// Returns the parts in order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Consumes the fragment, returning its parts.
    #[must_use]
    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }

    /// Returns true if there is nothing to print.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns true if any part is a link.
    #[must_use]
    pub fn has_links(&self) -> bool {
        self.parts.iter().any(|p| matches!(p, Part::Link(_)))
    }

    /// Iterates over the link elements.
    pub fn links(&self) -> impl Iterator<Item = &Element> + '_ {
        self.parts.iter().filter_map(|p| match p {
            Part::Link(el) => Some(el),
            _ => None,
        })
    }

    /// Text as read without markup; links contribute their labels.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Text(t) => out.push_str(t),
                Part::Raw(m) => out.push_str(&markup::strip_tags(m)),
                Part::Link(el) => out.push_str(el.plain_label()),
            }
        }
        out
    }

    /// HTML rendering of the fragment.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Text(t) => out.push_str(&markup::escape(t)),
                Part::Raw(m) => out.push_str(m),
                Part::Link(el) => markup::write_element(&mut out, el),
            }
        }
        out
    }
}

impl From<&str> for Fragment {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<String> for Fragment {
    fn from(s: String) -> Self {
        Self::text(s)
    }
}
