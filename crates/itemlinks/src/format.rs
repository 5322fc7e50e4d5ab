//! Formatting seam.
//!
//! Article selection, pronouns, sentence casing, list joining and command
//! snippet expansion are owned by the host engine's text layer. The link
//! layer calls them through [`Formatter`]; every method except
//! [`Formatter::lexicon`] has an English default, and [`EnglishFormatter`]
//! is the stock implementation.

use linkdom::markup::{self, CMD_LINK};
use linkdom::Fragment;

use crate::config::Lexicon;
use crate::world::{GameObject, ObjectFlags, Pronouns};

// =============================================================================
// Name Options
// =============================================================================

/// Article placed before a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Article {
    /// "the"
    Definite,
    /// "a" / "an" / "some"
    Indefinite,
}

/// Options for rendering an object's name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameOptions {
    /// Article, if any.
    pub article: Option<Article>,
    /// Capitalise the first word.
    pub capitalise: bool,
    /// Possessive form ("the lamp's").
    pub possessive: bool,
    /// Explicit count.
    pub count: Option<u32>,
    /// Location used to look up the count of countable objects.
    pub location: Option<String>,
}

impl NameOptions {
    /// Options with the definite article.
    #[must_use]
    pub fn definite() -> Self {
        Self {
            article: Some(Article::Definite),
            ..Self::default()
        }
    }

    /// Options with the indefinite article.
    #[must_use]
    pub fn indefinite() -> Self {
        Self {
            article: Some(Article::Indefinite),
            ..Self::default()
        }
    }

    /// Sets capitalisation.
    #[must_use]
    pub fn capitalised(mut self, capitalise: bool) -> Self {
        self.capitalise = capitalise;
        self
    }

    /// Sets the possessive form.
    #[must_use]
    pub fn possessive(mut self) -> Self {
        self.possessive = true;
        self
    }

    /// Sets an explicit count.
    #[must_use]
    pub fn counted(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the location used for count lookups.
    #[must_use]
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Resolves the effective count for `item`.
    #[must_use]
    pub fn count_for(&self, item: &GameObject) -> Option<u32> {
        self.count.or_else(|| {
            self.location
                .as_deref()
                .and_then(|loc| item.count_at(loc))
        })
    }
}

// =============================================================================
// Formatter
// =============================================================================

/// Text services consumed from the host engine.
pub trait Formatter {
    /// Phrase table.
    fn lexicon(&self) -> &Lexicon;

    /// Upper-cases the first character.
    fn sentence_case(&self, text: &str) -> String {
        let mut chars = text.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Article for `item`, including its trailing space, or empty.
    fn article(&self, item: &GameObject, article: Article) -> String {
        if item.has(ObjectFlags::PROPER_NAME) {
            return String::new();
        }
        match article {
            Article::Definite => "the ".to_string(),
            Article::Indefinite if item.has(ObjectFlags::PLURAL) => "some ".to_string(),
            Article::Indefinite => {
                let word = item.adjective.as_deref().unwrap_or(item.display_alias());
                let vowel = word
                    .chars()
                    .next()
                    .is_some_and(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'));
                let article = if vowel { "an " } else { "a " };
                article.to_string()
            }
        }
    }

    /// Spells out small numbers.
    fn number_words(&self, n: u32) -> String {
        const WORDS: [&str; 21] = [
            "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
            "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen",
            "seventeen", "eighteen", "nineteen", "twenty",
        ];
        usize::try_from(n)
            .ok()
            .and_then(|i| WORDS.get(i))
            .map_or_else(|| n.to_string(), |w| (*w).to_string())
    }

    /// Subjective pronoun or possessive adjective.
    fn pronoun(&self, pronouns: Pronouns, possessive: bool) -> &'static str {
        match (pronouns, possessive) {
            (Pronouns::FirstPerson, false) => "I",
            (Pronouns::FirstPerson, true) => "my",
            (Pronouns::SecondPerson, false) => "you",
            (Pronouns::SecondPerson, true) => "your",
            (Pronouns::ThirdPerson, false) => "it",
            (Pronouns::ThirdPerson, true) => "its",
            (Pronouns::Plural, false) => "they",
            (Pronouns::Plural, true) => "their",
        }
    }

    /// Suffix appended after a name ("(worn)", "(providing light)").
    fn name_modifiers(&self, _item: &GameObject, _options: &NameOptions) -> String {
        String::new()
    }

    /// Subject and conjugated verb: "you see", "Bob is".
    fn subject_verb(&self, subject: &GameObject, verb: &str, capitalise: bool) -> String {
        let (noun, third) = if subject.pronouns.is_personal() {
            (self.pronoun(subject.pronouns, false).to_string(), false)
        } else {
            let article = self.article(subject, Article::Definite);
            (
                format!("{article}{}", subject.display_alias()),
                subject.pronouns != Pronouns::Plural,
            )
        };
        let conjugated = match (verb, subject.pronouns, third) {
            ("be", Pronouns::FirstPerson, _) => "am".to_string(),
            ("be", _, false) => "are".to_string(),
            ("be", _, true) => "is".to_string(),
            ("have", _, true) => "has".to_string(),
            (v, _, true) if v.ends_with('s') || v.ends_with("sh") || v.ends_with("ch") || v.ends_with('x') => {
                format!("{v}es")
            }
            (v, _, true) => match v.strip_suffix('y') {
                Some(stem) if stem.ends_with(|c: char| c.is_ascii_alphabetic() && !"aeiou".contains(c)) => {
                    format!("{stem}ies")
                }
                _ => format!("{v}s"),
            },
            (v, _, false) => v.to_string(),
        };
        let phrase = format!("{noun} {conjugated}");
        if capitalise {
            self.sentence_case(&phrase)
        } else {
            phrase
        }
    }

    /// Expands a command into a dispatchable snippet.
    fn command_snippet(&self, command: &str) -> String {
        let cmd = markup::escape(command);
        format!(r#"<span class="{CMD_LINK}" cmd="{cmd}">{cmd}</span>"#)
    }

    /// Name without article or link: count, adjective, alias, possessive.
    fn bare_name(&self, item: &GameObject, options: &NameOptions) -> String {
        let count = options.count_for(item).filter(|&c| c > 1);
        let mut s = String::new();
        if let Some(count) = count {
            s.push_str(&self.number_words(count));
            s.push(' ');
        }
        if let Some(adjective) = &item.adjective {
            s.push_str(adjective);
            s.push(' ');
        }
        match (count, &item.plural_alias) {
            (None, _) => s.push_str(item.display_alias()),
            (Some(_), Some(plural)) => s.push_str(plural),
            (Some(_), None) => {
                s.push_str(item.display_alias());
                s.push('s');
            }
        }
        if options.possessive {
            s.push_str(if s.ends_with('s') { "'" } else { "'s" });
        }
        s
    }

    /// Article to use with `options`, taking counts into account.
    fn article_for(&self, item: &GameObject, options: &NameOptions) -> String {
        let counted = options.count_for(item).is_some_and(|c| c > 1);
        match options.article {
            Some(Article::Indefinite) if counted => String::new(),
            Some(article) => self.article(item, article),
            None => String::new(),
        }
    }

    /// The engine's unlinked name rendering.
    fn plain_name(&self, item: &GameObject, options: &NameOptions) -> String {
        if item.pronouns.is_personal() {
            let pronoun = self.pronoun(item.pronouns, options.possessive);
            let s = format!("{pronoun}{}", self.name_modifiers(item, options));
            return if options.capitalise { self.sentence_case(&s) } else { s };
        }
        let s = format!(
            "{}{}{}",
            self.article_for(item, options),
            self.bare_name(item, options),
            self.name_modifiers(item, options)
        );
        if options.capitalise {
            self.sentence_case(&s)
        } else {
            s
        }
    }

    /// Joins fragments: "a, b and c"; `nothing` when empty.
    fn join_list(&self, items: Vec<Fragment>, last_joiner: &str, nothing: &str) -> Fragment {
        let count = items.len();
        if count == 0 {
            return Fragment::text(nothing);
        }
        let mut out = Fragment::new();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                if i == count - 1 {
                    out.push_text(format!(" {last_joiner} "));
                } else {
                    out.push_text(", ");
                }
            }
            out.append(item);
        }
        out
    }
}

/// Stock English formatter backed by a [`Lexicon`].
#[derive(Debug, Clone, Default)]
pub struct EnglishFormatter {
    lexicon: Lexicon,
}

impl EnglishFormatter {
    /// Creates a formatter with the given phrase table.
    #[must_use]
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }
}

impl Formatter for EnglishFormatter {
    fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}
