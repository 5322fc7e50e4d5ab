//! HTML emission and the link class contract.
//!
//! # Class Contract
//!
//! Object triggers carry `obj="<name>"` and the class `droplink`; their
//! wrappers carry `dropdown`. Disabling swaps a class `c` for the pair
//! `disabled disabled-c`, so the enabled class is always recoverable from
//! the disabled one (see [`recover_enabled_class`]). Exit and command links
//! keep their base class and gain a plain `disabled` token.
//!
//! ```text
//! <span class="object-link dropdown">
//!   <span obj="lamp" class="droplink" name="lamp-link">lamp</span>
//!   <span obj="lamp" class="dropdown-content" style="display:none">
//!     <span obj="lamp-verbs-list-holder">
//!       <span class="list-link-verb" link-verb="Take" obj-alias="lamp" obj="lamp">Take</span>
//!     </span>
//!   </span>
//! </span>
//! ```
//!
//! (Emitted without the whitespace shown above.)

use std::fmt::Write as _;

use crate::element::{CommandLink, Element, ExitLabel, ExitLink, LinkState, ObjectLink};
use crate::ElementId;

/// Class of an enabled object trigger.
pub const DROPLINK: &str = "droplink";
/// Class of an enabled object wrapper.
pub const DROPDOWN: &str = "dropdown";
/// Class of a verb panel.
pub const DROPDOWN_CONTENT: &str = "dropdown-content";
/// Class of a verb inside a panel.
pub const VERB: &str = "list-link-verb";
/// Class of an exit link.
pub const EXIT_LINK: &str = "exit-link";
/// Class of a plain (unlinked) exit.
pub const EXIT_PLAIN: &str = "exit";
/// Class of a generic command link.
pub const CMD_LINK: &str = "cmd-link";
/// Marker token of any disabled element.
pub const DISABLED: &str = "disabled";
/// `name` attribute of a disabled object trigger.
pub const DEAD_DROPLINK: &str = "dead-droplink";

/// Returns the class attribute for a reversible class in the given state.
///
/// ```
/// use linkdom::markup::state_class;
/// use linkdom::LinkState;
///
/// assert_eq!(state_class("droplink", LinkState::Enabled), "droplink");
/// assert_eq!(state_class("droplink", LinkState::Disabled), "disabled disabled-droplink");
/// ```
#[must_use]
pub fn state_class(base: &str, state: LinkState) -> String {
    match state {
        LinkState::Enabled => base.to_string(),
        LinkState::Disabled => format!("{DISABLED} {DISABLED}-{base}"),
    }
}

/// Recovers the enabled class from a disabled class attribute.
///
/// Returns `None` when the attribute carries no `disabled-<class>` token.
///
/// ```
/// use linkdom::markup::recover_enabled_class;
///
/// assert_eq!(recover_enabled_class("disabled disabled-droplink"), Some("droplink"));
/// assert_eq!(recover_enabled_class("droplink"), None);
/// ```
#[must_use]
pub fn recover_enabled_class(class_attr: &str) -> Option<&str> {
    class_attr
        .split_whitespace()
        .find_map(|token| token.strip_prefix("disabled-"))
        .filter(|base| !base.is_empty())
}

/// Escapes text for use in element content or a quoted attribute.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Removes tags and decodes the entities produced by [`escape`].
#[must_use]
pub fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Writes an unattached element (fragment preview).
pub fn write_element(out: &mut String, element: &Element) {
    write_element_with_id(out, element, None);
}

/// Writes an element, tagging it with its handle when it has one.
pub fn write_element_with_id(out: &mut String, element: &Element, id: Option<ElementId>) {
    match element {
        Element::Object(o) => write_object(out, o, id),
        Element::Exit(e) => write_exit(out, e, id),
        Element::Command(c) => write_command(out, c, id),
    }
}

fn link_id_attr(id: Option<ElementId>) -> String {
    id.map(|id| format!(r#" link-id="{}""#, id.as_u64()))
        .unwrap_or_default()
}

fn write_object(out: &mut String, link: &ObjectLink, id: Option<ElementId>) {
    let obj = escape(link.object());
    let name = match link.state {
        LinkState::Enabled => format!("{obj}-link"),
        LinkState::Disabled => DEAD_DROPLINK.to_string(),
    };
    let panel_class = match link.state {
        LinkState::Enabled => DROPDOWN_CONTENT.to_string(),
        LinkState::Disabled => format!("{DROPDOWN_CONTENT} {DISABLED}"),
    };
    let display = if link.panel.visible { "block" } else { "none" };

    let _ = write!(
        out,
        r#"<span class="object-link {}"{}>"#,
        state_class(DROPDOWN, link.state),
        link_id_attr(id)
    );
    let _ = write!(
        out,
        r#"<span obj="{obj}" class="{}" name="{}">{}</span>"#,
        state_class(DROPLINK, link.state),
        name,
        escape(&link.label)
    );
    let _ = write!(
        out,
        r#"<span obj="{obj}" class="{panel_class}" style="display:{display}">"#
    );
    let _ = write!(out, r#"<span obj="{obj}-verbs-list-holder">"#);
    for verb in &link.panel.verbs {
        let v = escape(&verb.verb);
        let _ = write!(
            out,
            r#"<span class="{VERB}" link-verb="{v}" obj-alias="{}" obj="{obj}">{v}</span>"#,
            escape(&verb.alias)
        );
    }
    out.push_str("</span></span></span>");
}

fn write_exit(out: &mut String, link: &ExitLink, id: Option<ElementId>) {
    let class = match link.state {
        LinkState::Enabled => EXIT_LINK.to_string(),
        LinkState::Disabled => format!("{EXIT_LINK} {DISABLED}"),
    };
    let label = match &link.label {
        ExitLabel::Plain(dir) => escape(dir),
        ExitLabel::Command(snippet) => snippet.clone(),
    };
    let _ = write!(
        out,
        r#"<span class="{class}" exit="{}"{}>{label}</span>"#,
        escape(link.direction()),
        link_id_attr(id)
    );
}

fn write_command(out: &mut String, link: &CommandLink, id: Option<ElementId>) {
    let class = match link.state {
        LinkState::Enabled => CMD_LINK.to_string(),
        LinkState::Disabled => format!("{CMD_LINK} {DISABLED}"),
    };
    let _ = write!(
        out,
        r#"<span class="{class}" cmd="{}"{}>{}</span>"#,
        escape(&link.command),
        link_id_attr(id),
        escape(&link.label)
    );
}

/// Markup of a plain exit token (links disabled by configuration).
#[must_use]
pub fn plain_exit(direction: &str) -> String {
    let dir = escape(direction);
    format!(r#"<span class="{EXIT_PLAIN}" exit="{dir}">{dir}</span>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::VerbEntry;

    #[test]
    fn disabled_class_is_reversible() {
        for base in [DROPLINK, DROPDOWN] {
            let disabled = state_class(base, LinkState::Disabled);
            assert_eq!(recover_enabled_class(&disabled), Some(base));
        }
        assert_eq!(recover_enabled_class("disabled disabled-"), None);
    }

    #[test]
    fn escape_covers_attribute_quotes() {
        assert_eq!(escape(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(strip_tags(&escape(r#"a<b>&"c'"#)), r#"a<b>&"c'"#);
    }

    #[test]
    fn enabled_object_markup() {
        let link = ObjectLink::new("lamp", "lamp", vec![VerbEntry::new("Take", "lamp")]);
        let mut out = String::new();
        write_element(&mut out, &Element::Object(link));

        assert_eq!(
            out,
            concat!(
                r#"<span class="object-link dropdown">"#,
                r#"<span obj="lamp" class="droplink" name="lamp-link">lamp</span>"#,
                r#"<span obj="lamp" class="dropdown-content" style="display:none">"#,
                r#"<span obj="lamp-verbs-list-holder">"#,
                r#"<span class="list-link-verb" link-verb="Take" obj-alias="lamp" obj="lamp">Take</span>"#,
                "</span></span></span>"
            )
        );
    }

    #[test]
    fn disabled_object_markup() {
        let mut link = ObjectLink::new("lamp", "lamp", vec![]);
        link.disable();
        let mut out = String::new();
        write_element_with_id(&mut out, &Element::Object(link), Some(ElementId::new(4)));

        assert!(out.contains(r#"class="object-link disabled disabled-dropdown" link-id="4""#));
        assert!(out.contains(r#"class="disabled disabled-droplink" name="dead-droplink""#));
        assert!(out.contains(r#"class="dropdown-content disabled""#));
    }

    #[test]
    fn exit_markup_by_state() {
        let mut exit = ExitLink::new("north", r#"<span class="cmd-link" cmd="north">north</span>"#);
        let mut out = String::new();
        write_element(&mut out, &Element::Exit(exit.clone()));
        assert_eq!(
            out,
            r#"<span class="exit-link" exit="north"><span class="cmd-link" cmd="north">north</span></span>"#
        );

        exit.disable();
        out.clear();
        write_element(&mut out, &Element::Exit(exit));
        assert_eq!(out, r#"<span class="exit-link disabled" exit="north">north</span>"#);
    }

    #[test]
    fn plain_exit_markup() {
        assert_eq!(plain_exit("up"), r#"<span class="exit" exit="up">up</span>"#);
    }

    proptest::proptest! {
        #[test]
        fn any_class_survives_disable(base in "[a-z][a-z-]{0,15}") {
            let disabled = state_class(&base, LinkState::Disabled);
            proptest::prop_assert_eq!(recover_enabled_class(&disabled), Some(base.as_str()));
        }

        #[test]
        fn escaped_text_strips_back(text in "\\PC{0,40}") {
            proptest::prop_assert_eq!(strip_tags(&escape(&text)), text);
        }
    }
}
