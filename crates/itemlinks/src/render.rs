//! Link Renderer.
//!
//! [`LinkRenderer`] turns objects, exits and commands into [`Fragment`]s.
//! It has two modes selected by the link-enabled flag:
//!
//! - [`RenderMode::Linked`]: object names become triggers with a verb
//!   panel, exits and commands become clickable tokens
//! - [`RenderMode::Plain`]: the same text with no interactive affordances
//!
//! Hosts route every name and exit mention through the renderer instead of
//! their own name routine, so the mode switch is the only place the two
//! behaviours diverge.
//!
//! Rendering is a pure function of the object (or direction) and the
//! renderer's mode; nothing is registered until the fragment is printed.
//!
//! # Example
//!
//! ```
//! use itemlinks::config::LinkSettings;
//! use itemlinks::render::LinkRenderer;
//! use itemlinks::world::GameObject;
//!
//! let lamp = GameObject::new("lamp").with_verbs(["take", "light"]).in_scope(true);
//!
//! let linked = LinkRenderer::english(&LinkSettings::default());
//! let fragment = linked.object_link(&lamp, None, false);
//! let link = fragment.links().next().unwrap().as_object().unwrap();
//! assert_eq!(link.label, "lamp");
//! assert_eq!(link.panel.verb_names().collect::<Vec<_>>(), vec!["Take", "Light"]);
//!
//! let plain = LinkRenderer::english(&LinkSettings::default().with_links_enabled(false));
//! let fragment = plain.object_link(&lamp, None, false);
//! assert!(!fragment.has_links());
//! assert_eq!(fragment.plain_text(), "the lamp");
//! ```

use linkdom::markup;
use linkdom::{CommandLink, Element, ExitLink, Fragment, ObjectLink, VerbEntry};

use crate::config::LinkSettings;
use crate::format::{Article, EnglishFormatter, Formatter, NameOptions};
use crate::world::{ExitSet, GameObject};

/// Which name renderer is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Plain text, no links.
    Plain,
    /// Clickable links.
    Linked,
}

impl RenderMode {
    /// Mode implied by the link-enabled flag.
    #[must_use]
    pub const fn from_settings(settings: &LinkSettings) -> Self {
        if settings.links_enabled {
            Self::Linked
        } else {
            Self::Plain
        }
    }
}

/// Renders object names, exits and commands in the active mode.
#[derive(Debug, Clone)]
pub struct LinkRenderer<F = EnglishFormatter> {
    mode: RenderMode,
    formatter: F,
}

impl LinkRenderer<EnglishFormatter> {
    /// English renderer configured from settings.
    #[must_use]
    pub fn english(settings: &LinkSettings) -> Self {
        Self::new(
            RenderMode::from_settings(settings),
            EnglishFormatter::new(settings.lexicon.clone()),
        )
    }
}

impl<F: Formatter> LinkRenderer<F> {
    /// Creates a renderer.
    #[must_use]
    pub fn new(mode: RenderMode, formatter: F) -> Self {
        Self { mode, formatter }
    }

    /// Active mode.
    #[must_use]
    pub const fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Switches mode.
    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }

    /// Returns true in [`RenderMode::Linked`].
    #[must_use]
    pub const fn is_linked(&self) -> bool {
        matches!(self.mode, RenderMode::Linked)
    }

    /// The formatting collaborator.
    #[must_use]
    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    /// The object's current verbs as panel entries.
    #[must_use]
    pub fn verb_entries(&self, object: &GameObject) -> Vec<VerbEntry> {
        let alias = object.display_alias();
        object
            .verbs
            .iter()
            .map(|verb| VerbEntry::new(self.formatter.sentence_case(verb), alias))
            .collect()
    }

    /// Renders an object reference.
    ///
    /// Linked mode produces a trigger labelled `label` (or the alias) with a
    /// hidden panel of the object's current verbs; the link starts disabled
    /// when the object is out of scope. Plain mode produces `label`, or the
    /// engine's definite name when no label is given.
    #[must_use]
    pub fn object_link(&self, object: &GameObject, label: Option<&str>, capitalise: bool) -> Fragment {
        if !self.is_linked() {
            return match label {
                Some(label) if capitalise => Fragment::text(self.formatter.sentence_case(label)),
                Some(label) => Fragment::text(label),
                None => Fragment::text(
                    self.formatter
                        .plain_name(object, &NameOptions::definite().capitalised(capitalise)),
                ),
            };
        }

        let label = label.unwrap_or_else(|| object.display_alias());
        let label = if capitalise {
            self.formatter.sentence_case(label)
        } else {
            label.to_string()
        };
        let mut link = ObjectLink::new(&object.name, label, self.verb_entries(object));
        if !object.in_scope {
            link.disable();
        }
        Fragment::link(Element::Object(link))
    }

    /// Renders a compass exit.
    #[must_use]
    pub fn exit_link(&self, direction: &str) -> Fragment {
        if self.is_linked() {
            Fragment::link(Element::Exit(ExitLink::new(
                direction,
                self.formatter.command_snippet(direction),
            )))
        } else {
            let mut fragment = Fragment::new();
            fragment.push_raw(markup::plain_exit(direction));
            fragment
        }
    }

    /// Renders a generic command link.
    #[must_use]
    pub fn command_link(&self, command: &str, label: &str) -> Fragment {
        if self.is_linked() {
            Fragment::link(Element::Command(CommandLink::new(command, label)))
        } else {
            Fragment::text(label)
        }
    }

    /// Renders the list of available exits: "north, east or up".
    #[must_use]
    pub fn exits_list(&self, exits: &ExitSet) -> Fragment {
        let lexicon = self.formatter.lexicon();
        let items = exits.iter().map(|dir| self.exit_link(dir)).collect();
        self.formatter
            .join_list(items, &lexicon.list_or, &lexicon.list_nowhere)
    }

    /// Renders an object's name the way the engine would, with the name
    /// itself linked.
    ///
    /// Personal pronouns (the player) and rooms are never linked.
    #[must_use]
    pub fn name(&self, item: &GameObject, options: &NameOptions) -> Fragment {
        let f = &self.formatter;
        if !self.is_linked() || item.pronouns.is_personal() {
            return Fragment::text(f.plain_name(item, options));
        }

        let mut article = f.article_for(item, options);
        let label = f.bare_name(item, options);
        let capitalise_label = options.capitalise && article.is_empty();
        if options.capitalise && !article.is_empty() {
            article = f.sentence_case(&article);
        }

        let mut fragment = Fragment::text(article);
        if item.is_room() {
            let label = if capitalise_label {
                f.sentence_case(&label)
            } else {
                label
            };
            fragment.push_text(label);
        } else {
            fragment.append(self.object_link(item, Some(&label), capitalise_label));
        }
        fragment.push_text(f.name_modifiers(item, options));
        fragment
    }

    /// Article followed by the object's alias link.
    #[must_use]
    pub fn display_alias_link(&self, item: &GameObject, article: Option<Article>) -> Fragment {
        let article = article
            .map(|a| self.formatter.article(item, a))
            .unwrap_or_default();
        Fragment::text(article).with(self.object_link(item, None, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{ObjectFlags, Pronouns};
    use linkdom::{ExitLabel, LinkState, Part};

    fn linked() -> LinkRenderer {
        LinkRenderer::english(&LinkSettings::default())
    }

    fn plain() -> LinkRenderer {
        LinkRenderer::english(&LinkSettings::default().with_links_enabled(false))
    }

    fn lamp() -> GameObject {
        GameObject::new("lamp")
            .with_verbs(["take", "light"])
            .in_scope(true)
    }

    #[test]
    fn object_link_carries_identity_and_verbs() {
        let fragment = linked().object_link(&lamp().with_alias("brass lamp"), None, true);
        let link = fragment.links().next().unwrap().as_object().unwrap();

        assert_eq!(link.object(), "lamp");
        assert_eq!(link.label, "Brass lamp");
        assert_eq!(link.state, LinkState::Enabled);
        assert!(!link.panel.visible);
        assert_eq!(link.panel.verbs[0], VerbEntry::new("Take", "brass lamp"));
        assert_eq!(link.panel.verbs[1].command(), "Light brass lamp");
    }

    #[test]
    fn out_of_scope_object_renders_disabled_with_verbs() {
        let fragment = linked().object_link(&lamp().in_scope(false), None, false);
        let link = fragment.links().next().unwrap().as_object().unwrap();
        assert_eq!(link.state, LinkState::Disabled);
        assert_eq!(link.panel.verb_names().collect::<Vec<_>>(), vec!["Take", "Light"]);
    }

    #[test]
    fn plain_object_link_uses_override_label() {
        let fragment = plain().object_link(&lamp(), Some("old lamp"), true);
        assert_eq!(fragment.parts(), &[Part::Text("Old lamp".into())]);
    }

    #[test]
    fn exit_link_modes() {
        let fragment = linked().exit_link("north");
        let exit = fragment.links().next().unwrap().as_exit().unwrap();
        assert_eq!(exit.direction(), "north");
        assert!(matches!(&exit.label, ExitLabel::Command(s) if s.contains(r#"cmd="north""#)));

        let fragment = plain().exit_link("north");
        assert!(!fragment.has_links());
        assert_eq!(fragment.to_html(), r#"<span class="exit" exit="north">north</span>"#);
    }

    #[test]
    fn exits_list_joins_with_or() {
        let exits: ExitSet = ["north", "east", "up"].into_iter().collect();
        let fragment = linked().exits_list(&exits);
        assert_eq!(fragment.plain_text(), "north, east or up");
        assert_eq!(fragment.links().count(), 3);

        assert_eq!(linked().exits_list(&ExitSet::new()).plain_text(), "nowhere");
    }

    #[test]
    fn name_links_only_the_noun_phrase() {
        let item = lamp().with_adjective("brass");
        let fragment = linked().name(&item, &NameOptions::indefinite().capitalised(true));

        assert_eq!(fragment.plain_text(), "A brass lamp");
        assert_eq!(fragment.parts()[0], Part::Text("A ".into()));
        let link = fragment.links().next().unwrap().as_object().unwrap();
        assert_eq!(link.label, "brass lamp");
    }

    #[test]
    fn name_without_article_capitalises_label() {
        let bob = GameObject::new("bob")
            .with_alias("bob")
            .with_flags(ObjectFlags::PROPER_NAME | ObjectFlags::NPC)
            .in_scope(true);
        let fragment = linked().name(&bob, &NameOptions::definite().capitalised(true));
        let link = fragment.links().next().unwrap().as_object().unwrap();
        assert_eq!(link.label, "Bob");
    }

    #[test]
    fn name_counts_countables() {
        let mut coin = GameObject::new("coin").with_flags(ObjectFlags::COUNTABLE).in_scope(true);
        coin.counts.insert("lounge".into(), 3);
        let fragment = linked().name(&coin, &NameOptions::indefinite().at("lounge"));
        assert_eq!(fragment.plain_text(), "three coins");
    }

    #[test]
    fn player_and_rooms_are_not_linked() {
        let me = GameObject::new("me").with_pronouns(Pronouns::SecondPerson);
        let fragment = linked().name(&me, &NameOptions::default());
        assert!(!fragment.has_links());
        assert_eq!(fragment.plain_text(), "you");

        let hall = GameObject::new("hall").with_flags(ObjectFlags::ROOM);
        let fragment = linked().name(&hall, &NameOptions::definite());
        assert!(!fragment.has_links());
        assert_eq!(fragment.plain_text(), "the hall");
    }

    #[test]
    fn plain_mode_name_is_engine_name() {
        let fragment = plain().name(&lamp(), &NameOptions::definite());
        assert_eq!(fragment.plain_text(), "the lamp");
        assert!(!fragment.has_links());
    }

    #[test]
    fn command_link_modes() {
        assert_eq!(linked().command_link("look", "Look around").links().count(), 1);
        assert_eq!(plain().command_link("look", "Look around").plain_text(), "Look around");
    }

    #[test]
    fn display_alias_link_prefixes_article() {
        let fragment = linked().display_alias_link(&lamp(), Some(Article::Indefinite));
        assert_eq!(fragment.plain_text(), "a lamp");
        assert_eq!(fragment.links().count(), 1);
    }
}
