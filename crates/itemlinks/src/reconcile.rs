//! Per-turn link reconciliation.
//!
//! Printed links go stale as the world changes: objects leave scope, gain
//! or lose verbs, and exits open or close. The passes in this module
//! re-derive each link's state from the world after every turn.
//!
//! # Passes
//!
//! - [`reconcile_object_links`]: object links follow their object's scope;
//!   enabled links get a freshly rendered verb panel
//! - [`reconcile_exit_links`]: exit links follow membership of their
//!   direction in the current [`ExitSet`]
//! - [`disable_all_links`]: end-of-game teardown of every link
//!
//! # Invariants
//!
//! - Passes are idempotent: a second run with no world change leaves every
//!   element unchanged
//! - Passes are total: links to objects the world no longer knows, and
//!   links without an identifier, are skipped and counted, never an error
//! - Disabling keeps enough state to re-enable (the verb list and the
//!   direction survive)

use linkdom::{Document, ExitLink, LinkKind, ObjectLink};
use tracing::{debug, trace};

use crate::format::Formatter;
use crate::render::LinkRenderer;
use crate::world::{ExitSet, World};

/// Element counts from one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Elements left enabled.
    pub enabled: usize,
    /// Elements left disabled.
    pub disabled: usize,
    /// Elements skipped (dangling or malformed).
    pub skipped: usize,
}

impl ReconcileReport {
    /// Total number of elements the pass looked at.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.enabled + self.disabled + self.skipped
    }
}

/// Re-derives every object link's state from the world.
///
/// Uses the document's identifier index, so the world is queried once per
/// object rather than once per printed link.
///
/// # Arguments
///
/// * `doc` - The transcript whose object links are updated
/// * `world` - Authoritative scope and verb state
/// * `renderer` - Renders the replacement verb panels
pub fn reconcile_object_links<W, F>(doc: &mut Document, world: &W, renderer: &LinkRenderer<F>) -> ReconcileReport
where
    W: World + ?Sized,
    F: Formatter,
{
    let mut report = ReconcileReport::default();

    for name in doc.object_names() {
        match world.object(&name) {
            None => {
                let dangling = doc.object_elements(&name).count();
                trace!(object = %name, dangling, "skipping links to unknown object");
                report.skipped += dangling;
            }
            Some(object) if !object.in_scope => {
                report.disabled += doc.update_objects(&name, ObjectLink::disable);
            }
            Some(object) => {
                let verbs = renderer.verb_entries(object);
                report.enabled += doc.update_objects(&name, |link| link.enable_with(verbs.clone()));
            }
        }
    }

    let malformed = doc.malformed_count(LinkKind::Object);
    if malformed > 0 {
        trace!(malformed, "skipping object links without identifier");
    }
    report.skipped += malformed;

    debug!(
        enabled = report.enabled,
        disabled = report.disabled,
        skipped = report.skipped,
        "reconciled object links"
    );
    report
}

/// Re-derives every exit link's state from the current exit set.
///
/// Traversable directions get a command snippet label from the formatter;
/// the rest revert to a plain direction token.
pub fn reconcile_exit_links<F: Formatter>(
    doc: &mut Document,
    exits: &ExitSet,
    renderer: &LinkRenderer<F>,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for direction in doc.exit_directions() {
        if exits.contains(&direction) {
            let snippet = renderer.formatter().command_snippet(&direction);
            report.enabled += doc.update_exits(&direction, |exit| exit.enable_with(snippet.clone()));
        } else {
            report.disabled += doc.update_exits(&direction, ExitLink::disable);
        }
    }

    let malformed = doc.malformed_count(LinkKind::Exit);
    if malformed > 0 {
        trace!(malformed, "skipping exit links without direction");
    }
    report.skipped += malformed;

    debug!(
        enabled = report.enabled,
        disabled = report.disabled,
        skipped = report.skipped,
        "reconciled exit links"
    );
    report
}

/// Disables every live link of every kind and closes all panels.
///
/// Returns how many links were enabled before the call.
pub fn disable_all_links(doc: &mut Document) -> usize {
    let mut disabled = 0;
    doc.update_all(|_, element| {
        if element.is_enabled() {
            disabled += 1;
        }
        element.disable();
    });
    debug!(disabled, "disabled all links");
    disabled
}
