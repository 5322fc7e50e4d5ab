//! The transcript document.
//!
//! [`Document`] owns every printed link element and the transcript blocks
//! they appear in. It keeps an explicit index from stable identifier
//! (object name, exit direction) to the set of live element handles, so a
//! per-turn pass can visit each referenced object once instead of scanning
//! the whole transcript for matching attributes.
//!
//! # Element Lifetime
//!
//! Elements are created by [`Document::print`] and removed only when the
//! block that printed them is dropped ([`Document::retain_blocks`],
//! [`Document::clear`]). Handles are never reused.
//!
//! # Example
//!
//! ```
//! use linkdom::{Document, Element, ExitLink, Fragment};
//!
//! let mut doc = Document::new();
//! doc.print(Fragment::text("Exits: ").with(Fragment::link(Element::Exit(
//!     ExitLink::new("north", "north"),
//! ))));
//! doc.print(Fragment::text("It is dark."));
//!
//! assert_eq!(doc.block_count(), 2);
//! assert_eq!(doc.exit_elements("north").count(), 1);
//!
//! doc.retain_blocks(1);
//! assert_eq!(doc.exit_elements("north").count(), 0);
//! assert!(doc.is_empty());
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::element::{Element, ExitLink, LinkKind, ObjectLink};
use crate::fragment::{Fragment, Part};
use crate::markup;
use crate::ElementId;

// =============================================================================
// Errors
// =============================================================================

/// Errors from element lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The handle does not resolve (never issued, or scrolled away).
    #[error("no element {0}")]
    UnknownElement(ElementId),
    /// The handle resolves to an element of another kind.
    #[error("element {id} is an {actual}, expected an {expected}")]
    WrongKind {
        /// The handle.
        id: ElementId,
        /// Kind the caller asked for.
        expected: LinkKind,
        /// Kind actually stored.
        actual: LinkKind,
    },
}

// =============================================================================
// Blocks
// =============================================================================

/// A segment of a printed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Literal text.
    Text(String),
    /// Pre-rendered markup.
    Raw(String),
    /// A live link element.
    Link(ElementId),
}

/// One printed message (a paragraph of the transcript).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    segments: Vec<Segment>,
}

impl Block {
    /// Segments in print order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn link_ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Link(id) => Some(*id),
            _ => None,
        })
    }
}

// =============================================================================
// Document
// =============================================================================

/// Index entry an element is filed under.
type IndexKey = (LinkKind, String);

/// Object and exit links with a usable identifier are indexed; command
/// links and malformed elements are not.
fn index_key(element: &Element) -> Option<IndexKey> {
    if element.is_malformed() {
        return None;
    }
    match element.kind() {
        LinkKind::Command => None,
        kind => Some((kind, element.ref_id().to_string())),
    }
}

/// Transcript of printed blocks and the link elements they contain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Monotonic handle counter.
    next_id: u64,
    /// Live elements in print order.
    elements: BTreeMap<ElementId, Element>,
    /// Object name to live object-link handles.
    objects: HashMap<String, BTreeSet<ElementId>>,
    /// Direction to live exit-link handles.
    exits: HashMap<String, BTreeSet<ElementId>>,
    /// Printed blocks, oldest first.
    blocks: VecDeque<Block>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints a fragment as a new block, returning the handles of the link
    /// elements it created in print order.
    pub fn print(&mut self, fragment: Fragment) -> Vec<ElementId> {
        let mut block = Block::default();
        let mut ids = Vec::new();
        for part in fragment.into_parts() {
            match part {
                Part::Text(t) => block.segments.push(Segment::Text(t)),
                Part::Raw(m) => block.segments.push(Segment::Raw(m)),
                Part::Link(element) => {
                    let id = self.insert(element);
                    block.segments.push(Segment::Link(id));
                    ids.push(id);
                }
            }
        }
        self.blocks.push_back(block);
        ids
    }

    fn insert(&mut self, element: Element) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;

        match index_key(&element) {
            Some((kind, key)) => self.link_index(kind, key, id),
            None if element.is_malformed() => {
                trace!(%id, kind = %element.kind(), "printed link without identifier");
            }
            None => {}
        }

        self.elements.insert(id, element);
        id
    }

    fn remove(&mut self, id: ElementId) -> Option<Element> {
        let element = self.elements.remove(&id)?;
        if let Some((kind, key)) = index_key(&element) {
            self.unlink_index(kind, &key, id);
        }
        Some(element)
    }

    fn index_for(&mut self, kind: LinkKind) -> Option<&mut HashMap<String, BTreeSet<ElementId>>> {
        match kind {
            LinkKind::Object => Some(&mut self.objects),
            LinkKind::Exit => Some(&mut self.exits),
            LinkKind::Command => None,
        }
    }

    fn link_index(&mut self, kind: LinkKind, key: String, id: ElementId) {
        if let Some(index) = self.index_for(kind) {
            index.entry(key).or_default().insert(id);
        }
    }

    fn unlink_index(&mut self, kind: LinkKind, key: &str, id: ElementId) {
        let Some(index) = self.index_for(kind) else {
            return;
        };
        if let Some(set) = index.get_mut(key) {
            set.remove(&id);
            if set.is_empty() {
                index.remove(key);
            }
        }
    }

    /// Moves `id` between index entries after a mutation changed its key.
    fn reindex(&mut self, id: ElementId, before: Option<IndexKey>, after: Option<IndexKey>) {
        if before == after {
            return;
        }
        trace!(%id, ?before, ?after, "element identifier changed");
        if let Some((kind, key)) = before {
            self.unlink_index(kind, &key, id);
        }
        if let Some((kind, key)) = after {
            self.link_index(kind, key, id);
        }
    }

    /// Runs `f` on every element whose handle is in `ids`, keeping the
    /// index in step with whatever `f` changes. Returns how many elements
    /// `f` was applied to.
    fn update_many(&mut self, ids: Vec<ElementId>, mut f: impl FnMut(ElementId, &mut Element) -> bool) -> usize {
        let mut visited = 0;
        let mut moved = Vec::new();
        for id in ids {
            let Some(element) = self.elements.get_mut(&id) else {
                continue;
            };
            let before = index_key(element);
            if f(id, element) {
                visited += 1;
            }
            let after = index_key(element);
            if before != after {
                moved.push((id, before, after));
            }
        }
        for (id, before, after) in moved {
            self.reindex(id, before, after);
        }
        visited
    }

    /// Returns an element by handle.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Applies `f` to one element. Returns `None` if the handle does not
    /// resolve.
    ///
    /// The identifier index is updated if `f` changes the element's kind or
    /// identifier.
    pub fn update<R>(&mut self, id: ElementId, f: impl FnOnce(&mut Element) -> R) -> Option<R> {
        let element = self.elements.get_mut(&id)?;
        let before = index_key(element);
        let result = f(element);
        let after = index_key(element);
        self.reindex(id, before, after);
        Some(result)
    }

    /// Returns the object link behind a handle.
    ///
    /// # Errors
    ///
    /// [`DocumentError::UnknownElement`] if the handle does not resolve,
    /// [`DocumentError::WrongKind`] if it is not an object link.
    pub fn object(&self, id: ElementId) -> Result<&ObjectLink, DocumentError> {
        let element = self.get(id).ok_or(DocumentError::UnknownElement(id))?;
        element.as_object().ok_or(DocumentError::WrongKind {
            id,
            expected: LinkKind::Object,
            actual: element.kind(),
        })
    }

    /// Panel helpers only touch `panel.visible`, which is not indexed.
    fn object_mut(&mut self, id: ElementId) -> Result<&mut ObjectLink, DocumentError> {
        let element = self
            .elements
            .get_mut(&id)
            .ok_or(DocumentError::UnknownElement(id))?;
        let actual = element.kind();
        element.as_object_mut().ok_or(DocumentError::WrongKind {
            id,
            expected: LinkKind::Object,
            actual,
        })
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if no link elements are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of retained blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Retained blocks, oldest first.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter()
    }

    /// Live elements in print order.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> + '_ {
        self.elements.iter().map(|(id, el)| (*id, el))
    }

    /// Applies `f` to every live element in print order. The identifier
    /// index is kept in step with any change `f` makes.
    pub fn update_all(&mut self, mut f: impl FnMut(ElementId, &mut Element)) {
        let ids = self.elements.keys().copied().collect();
        self.update_many(ids, |id, el| {
            f(id, el);
            true
        });
    }

    /// Number of live elements of `kind` without a usable identifier.
    #[must_use]
    pub fn malformed_count(&self, kind: LinkKind) -> usize {
        self.elements
            .values()
            .filter(|el| el.kind() == kind && el.is_malformed())
            .count()
    }

    /// Names of objects that have at least one live link, sorted.
    #[must_use]
    pub fn object_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.objects.keys().cloned().collect();
        names.sort();
        names
    }

    /// Directions that have at least one live exit link, sorted.
    #[must_use]
    pub fn exit_directions(&self) -> Vec<String> {
        let mut dirs: Vec<String> = self.exits.keys().cloned().collect();
        dirs.sort();
        dirs
    }

    /// Handles of the live links to one object.
    pub fn object_elements(&self, name: &str) -> impl Iterator<Item = ElementId> + '_ {
        self.objects.get(name).into_iter().flatten().copied()
    }

    /// Handles of the live links to one exit direction.
    pub fn exit_elements(&self, direction: &str) -> impl Iterator<Item = ElementId> + '_ {
        self.exits.get(direction).into_iter().flatten().copied()
    }

    /// Applies `f` to every live link of one object. Returns how many were
    /// visited.
    pub fn update_objects(&mut self, name: &str, mut f: impl FnMut(&mut ObjectLink)) -> usize {
        let ids = self.object_elements(name).collect();
        self.update_many(ids, |_, el| el.as_object_mut().map(&mut f).is_some())
    }

    /// Applies `f` to every live link of one exit direction. Returns how
    /// many were visited.
    pub fn update_exits(&mut self, direction: &str, mut f: impl FnMut(&mut ExitLink)) -> usize {
        let ids = self.exit_elements(direction).collect();
        self.update_many(ids, |_, el| el.as_exit_mut().map(&mut f).is_some())
    }

    // -------------------------------------------------------------------------
    // Panels
    // -------------------------------------------------------------------------

    /// Returns true if the object link's panel is shown. Unknown handles
    /// and non-object elements have no visible panel.
    #[must_use]
    pub fn panel_visible(&self, id: ElementId) -> bool {
        self.object(id).is_ok_and(|o| o.panel.visible)
    }

    /// Shows an object link's panel.
    ///
    /// # Errors
    ///
    /// Same as [`Document::object`].
    pub fn show_panel(&mut self, id: ElementId) -> Result<(), DocumentError> {
        self.object_mut(id)?.panel.visible = true;
        Ok(())
    }

    /// Hides an object link's panel.
    ///
    /// # Errors
    ///
    /// Same as [`Document::object`].
    pub fn hide_panel(&mut self, id: ElementId) -> Result<(), DocumentError> {
        self.object_mut(id)?.panel.visible = false;
        Ok(())
    }

    /// Hides every panel. Returns how many were open.
    pub fn hide_all_panels(&mut self) -> usize {
        let mut closed = 0;
        for link in self.elements.values_mut().filter_map(Element::as_object_mut) {
            if link.panel.visible {
                link.panel.visible = false;
                closed += 1;
            }
        }
        closed
    }

    /// Handles of object links whose panel is shown.
    #[must_use]
    pub fn visible_panels(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, el)| el.as_object().is_some_and(|o| o.panel.visible))
            .map(|(id, _)| *id)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Scrollback
    // -------------------------------------------------------------------------

    /// Drops the oldest blocks until at most `keep` remain, removing their
    /// link elements. Returns the number of elements removed.
    pub fn retain_blocks(&mut self, keep: usize) -> usize {
        let mut removed = 0;
        while self.blocks.len() > keep {
            let Some(block) = self.blocks.pop_front() else {
                break;
            };
            for id in block.link_ids() {
                if self.remove(id).is_some() {
                    removed += 1;
                }
            }
        }
        if removed > 0 {
            trace!(removed, "scrolled link elements out of the transcript");
        }
        removed
    }

    /// Clears the transcript and every element.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.elements.clear();
        self.objects.clear();
        self.exits.clear();
    }

    /// Text of the transcript as a reader sees it, one line per block.
    /// Hidden verb panels are left out.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            for segment in &block.segments {
                match segment {
                    Segment::Text(t) => out.push_str(t),
                    Segment::Raw(m) => out.push_str(&markup::strip_tags(m)),
                    Segment::Link(id) => {
                        if let Some(el) = self.elements.get(id) {
                            out.push_str(el.plain_label());
                        }
                    }
                }
            }
            out.push('\n');
        }
        out
    }

    /// HTML rendering of the transcript, one `<p>` per block.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            out.push_str("<p>");
            for segment in &block.segments {
                match segment {
                    Segment::Text(t) => out.push_str(&markup::escape(t)),
                    Segment::Raw(m) => out.push_str(m),
                    Segment::Link(id) => {
                        if let Some(el) = self.elements.get(id) {
                            markup::write_element_with_id(&mut out, el, Some(*id));
                        }
                    }
                }
            }
            out.push_str("</p>\n");
        }
        out
    }
}

// =============================================================================
// Tests
// =============================================================================
