//! Link settings.
//!
//! [`LinkSettings`] carries the global link-enabled flag and the knobs the
//! rest of the crate reads. Every field has a default, so a partial JSON
//! document (or `{}`) is a valid configuration.
//!
//! # Example
//!
//! ```
//! use itemlinks::config::LinkSettings;
//!
//! let settings = LinkSettings::from_json(r#"{ "links_enabled": false }"#).unwrap();
//! assert!(!settings.links_enabled);
//! assert_eq!(settings.click_history, 8);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Smallest usable click history: the current click plus the one before it.
pub const MIN_CLICK_HISTORY: usize = 2;

/// Configuration for a link session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Global link-enabled flag. When false every renderer degrades to
    /// plain text and per-turn reconciliation is skipped.
    pub links_enabled: bool,
    /// Whether the inventory command consumes a turn.
    pub look_counts_as_turn: bool,
    /// Capacity of the dropdown controller's click history.
    pub click_history: usize,
    /// Number of printed blocks the transcript retains, if bounded.
    pub scrollback: Option<usize>,
    /// Phrase table for the default English formatter.
    pub lexicon: Lexicon,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            links_enabled: true,
            look_counts_as_turn: false,
            click_history: 8,
            scrollback: None,
            lexicon: Lexicon::default(),
        }
    }
}

impl LinkSettings {
    /// Parses settings from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Json`](crate::LinkError::Json) on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.click_history = settings.click_history.max(MIN_CLICK_HISTORY);
        Ok(settings)
    }

    /// Builder-style toggle of the link-enabled flag.
    #[must_use]
    pub fn with_links_enabled(mut self, enabled: bool) -> Self {
        self.links_enabled = enabled;
        self
    }
}

/// Words and phrases used when assembling sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Last joiner of "and" lists.
    pub list_and: String,
    /// Last joiner of "or" lists.
    pub list_or: String,
    /// Empty-case token of item lists.
    pub list_nothing: String,
    /// Empty-case token of exit lists.
    pub list_nowhere: String,
    /// Opening of the inventory sentence.
    pub inventory_preamble: String,
    /// Location phrase for surface contents.
    pub on_top: String,
    /// Location phrase for container contents.
    pub inside: String,
    /// Verb phrase for NPC contents.
    pub carrying: String,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            list_and: "and".into(),
            list_or: "or".into(),
            list_nothing: "nothing".into(),
            list_nowhere: "nowhere".into(),
            inventory_preamble: "You are carrying".into(),
            on_top: "on top".into(),
            inside: "inside".into(),
            carrying: "carrying".into(),
        }
    }
}
