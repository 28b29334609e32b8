use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

/// Tags accepted by Telegraph for page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    A,
    Aside,
    B,
    Blockquote,
    Br,
    Code,
    Em,
    Figcaption,
    Figure,
    H3,
    H4,
    Hr,
    I,
    Iframe,
    Img,
    Li,
    Ol,
    P,
    Pre,
    S,
    Strong,
    U,
    Ul,
    Video,
}

impl Tag {
    pub const ALL: &'static [Tag] = &[
        Tag::A, Tag::Aside, Tag::B, Tag::Blockquote, Tag::Br, Tag::Code,
        Tag::Em, Tag::Figcaption, Tag::Figure, Tag::H3, Tag::H4, Tag::Hr,
        Tag::I, Tag::Iframe, Tag::Img, Tag::Li, Tag::Ol, Tag::P, Tag::Pre,
        Tag::S, Tag::Strong, Tag::U, Tag::Ul, Tag::Video,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::A => "a",
            Tag::Aside => "aside",
            Tag::B => "b",
            Tag::Blockquote => "blockquote",
            Tag::Br => "br",
            Tag::Code => "code",
            Tag::Em => "em",
            Tag::Figcaption => "figcaption",
            Tag::Figure => "figure",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::Hr => "hr",
            Tag::I => "i",
            Tag::Iframe => "iframe",
            Tag::Img => "img",
            Tag::Li => "li",
            Tag::Ol => "ol",
            Tag::P => "p",
            Tag::Pre => "pre",
            Tag::S => "s",
            Tag::Strong => "strong",
            Tag::U => "u",
            Tag::Ul => "ul",
            Tag::Video => "video",
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown tag `{0}`")]
pub struct UnknownTag(pub String);

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL.iter()
            .find(|tag| tag.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

pub const DEFAULT_ATTRS: &[&'static str] = &["href", "src"];

/// Allow-list of tag names and attribute names used by validation.
///
/// Attribute permissions are flat: an allowed attribute is allowed on every
/// tag, the same way the Telegraph documentation lists them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    tags: BTreeSet<String>,
    attrs: BTreeSet<String>,
}

impl Vocabulary {
    pub fn new<T, A>(tags: T, attrs: A) -> Vocabulary
    where
        T: IntoIterator,
        T::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Vocabulary {
            tags: tags.into_iter().map(Into::into).collect(),
            attrs: attrs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Vocabulary {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_attr(mut self, attr: impl Into<String>) -> Vocabulary {
        self.attrs.insert(attr.into());
        self
    }

    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// `tag` is accepted for signature symmetry; the permission model is flat.
    pub fn allows_attr(&self, _tag: &str, attr: &str) -> bool {
        self.attrs.contains(attr)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn attrs(&self) -> impl Iterator<Item = &str> {
        self.attrs.iter().map(String::as_str)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary::new(
            Tag::ALL.iter().map(|tag| tag.as_str()),
            DEFAULT_ATTRS.iter().copied(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parse() {
        for tag in Tag::ALL {
            assert_eq!(tag.as_str().parse::<Tag>(), Ok(*tag));
        }
        assert_eq!("script".parse::<Tag>(), Err(UnknownTag("script".to_string())));
        assert_eq!(UnknownTag("script".to_string()).to_string(), "unknown tag `script`");
        assert!("P".parse::<Tag>().is_err());
        assert_eq!(Tag::ALL.len(), 24);
    }

    #[test]
    fn test_default_vocabulary() {
        let vocab = Vocabulary::default();
        assert!(vocab.allows_tag("p"));
        assert!(vocab.allows_tag("iframe"));
        assert!(!vocab.allows_tag("h1"));
        assert!(!vocab.allows_tag("script"));

        assert!(vocab.allows_attr("a", "href"));
        // Flat permission model
        assert!(vocab.allows_attr("a", "src"));
        assert!(!vocab.allows_attr("a", "style"));
        assert_eq!(vocab.attrs().collect::<Vec<_>>(), vec!["href", "src"]);
    }

    #[test]
    fn test_extend_vocabulary() {
        let vocab = Vocabulary::default()
            .with_tag("h1")
            .with_attr("title");
        assert!(vocab.allows_tag("h1"));
        assert!(vocab.allows_attr("p", "title"));

        let custom = Vocabulary::new(["p"], Vec::<String>::new());
        assert!(custom.allows_tag("p"));
        assert!(!custom.allows_tag("a"));
        assert!(!custom.allows_attr("p", "href"));
    }
}
