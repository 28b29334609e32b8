use crate::telegraph::node::{Node, NodeElement};
use crate::types::{FileName, MediaKind};

/// Accumulates a page body in document order.
#[derive(Debug, Clone, Default)]
pub struct ContentBuilder {
    content: Vec<Node>,
}

impl ContentBuilder {
    pub fn new() -> ContentBuilder {
        ContentBuilder::default()
    }

    pub fn push(mut self, node: impl Into<Node>) -> ContentBuilder {
        self.content.push(node.into());
        self
    }

    pub fn heading(self, text: &str) -> ContentBuilder {
        self.push(NodeElement::h3(text))
    }

    pub fn subheading(self, text: &str) -> ContentBuilder {
        self.push(NodeElement::h4(text))
    }

    pub fn paragraph(self, text: &str) -> ContentBuilder {
        self.push(NodeElement::paragraph_text(text))
    }

    pub fn paragraph_nodes(self, children: Vec<Node>) -> ContentBuilder {
        self.push(NodeElement::paragraph(children))
    }

    /// Link on its own line.
    pub fn link(self, text: &str, href: &str) -> ContentBuilder {
        self.paragraph_nodes(vec![NodeElement::link(text, Some(href)).into()])
    }

    /// `img` or `video` picked by the extension of `src`; anything else
    /// becomes a link named after the file.
    pub fn media(self, src: &str) -> ContentBuilder {
        let file_name = FileName::from_url(src);
        match file_name.media_kind() {
            MediaKind::Image => self.push(NodeElement::image(src)),
            MediaKind::Video => self.push(NodeElement::video(src)),
            MediaKind::Other => self.link(&file_name.to_string(), src),
        }
    }

    pub fn figure(self, src: &str, caption: &str) -> ContentBuilder {
        let media = match FileName::from_url(src).media_kind() {
            MediaKind::Video => NodeElement::video(src),
            _ => NodeElement::image(src),
        };
        self.push(NodeElement::figure(media, Some(caption)))
    }

    pub fn quote(self, text: &str) -> ContentBuilder {
        self.push(NodeElement::blockquote(text))
    }

    pub fn code_block(self, code: &str) -> ContentBuilder {
        self.push(NodeElement::pre(code))
    }

    pub fn list<I, S>(self, ordered: bool, items: I) -> ContentBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = items.into_iter().map(|item| Node::Text(item.into())).collect();
        self.push(NodeElement::list(ordered, items))
    }

    pub fn rule(self) -> ContentBuilder {
        self.push(NodeElement::horizontal_rule())
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn build(self) -> Vec<Node> {
        self.content
    }
}
