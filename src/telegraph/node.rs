use std::collections::BTreeMap;

use maplit::btreemap;
use serde::de::{Deserializer, Error as _};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::telegraph::error::{DecodeError, NodePath, ValidationError};
use crate::telegraph::vocabulary::{Tag, Vocabulary};

/// A unit of page content: either literal text or a DOM element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(NodeElement),
}

/// A DOM element node.
///
/// `tag` is kept as a string so tags introduced by the server survive a
/// decode/encode cycle. Empty `attrs` and `children` are omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeElement {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<Node>,
}

impl NodeElement {
    pub fn new(tag: impl Into<String>) -> NodeElement {
        NodeElement {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: vec![],
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> NodeElement {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> NodeElement {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> NodeElement {
        self.children.extend(children);
        self
    }

    /// The tag as a member of the Telegraph vocabulary, if it is one.
    pub fn known_tag(&self) -> Option<Tag> {
        self.tag.parse().ok()
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn paragraph_text(text: &str) -> NodeElement {
        NodeElement::new(Tag::P.as_str()).with_child(text)
    }

    pub fn paragraph(children: Vec<Node>) -> NodeElement {
        NodeElement::new(Tag::P.as_str()).with_children(children)
    }

    pub fn h3(text: &str) -> NodeElement {
        NodeElement::new(Tag::H3.as_str()).with_child(text)
    }

    pub fn h4(text: &str) -> NodeElement {
        NodeElement::new(Tag::H4.as_str()).with_child(text)
    }

    pub fn link(text: &str, href: Option<&str>) -> NodeElement {
        NodeElement {
            tag: Tag::A.as_str().to_string(),
            attrs: href.map(|href| btreemap! { "href".to_string() => href.to_string() })
                .unwrap_or_default(),
            children: vec![Node::from(text)],
        }
    }

    pub fn image(src: &str) -> NodeElement {
        NodeElement::new(Tag::Img.as_str()).with_attr("src", src)
    }

    pub fn video(src: &str) -> NodeElement {
        NodeElement::new(Tag::Video.as_str()).with_attr("src", src)
    }

    pub fn iframe(src: &str) -> NodeElement {
        NodeElement::new(Tag::Iframe.as_str()).with_attr("src", src)
    }

    /// `<figure>` wrapping a media element with an optional caption.
    pub fn figure(media: NodeElement, caption: Option<&str>) -> NodeElement {
        let figure = NodeElement::new(Tag::Figure.as_str()).with_child(media);
        match caption {
            Some(caption) => figure.with_child(NodeElement::new(Tag::Figcaption.as_str()).with_child(caption)),
            None => figure,
        }
    }

    pub fn blockquote(text: &str) -> NodeElement {
        NodeElement::new(Tag::Blockquote.as_str()).with_child(text)
    }

    pub fn pre(text: &str) -> NodeElement {
        NodeElement::new(Tag::Pre.as_str()).with_child(text)
    }

    pub fn list(ordered: bool, items: Vec<Node>) -> NodeElement {
        let tag = if ordered { Tag::Ol } else { Tag::Ul };
        let items = items.into_iter()
            .map(|item| Node::Element(NodeElement::new(Tag::Li.as_str()).with_child(item)))
            .collect();
        NodeElement::new(tag.as_str()).with_children(items)
    }

    pub fn line_break() -> NodeElement {
        NodeElement::new(Tag::Br.as_str())
    }

    pub fn horizontal_rule() -> NodeElement {
        NodeElement::new(Tag::Hr.as_str())
    }
}

impl From<NodeElement> for Node {
    fn from(element: NodeElement) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

/* Decode */

impl Node {
    /// Rebuild a node from a JSON value.
    ///
    /// Tags are not checked against any vocabulary here, see [`Node::validate`].
    pub fn decode(value: &Value) -> Result<Node, DecodeError> {
        let mut path = NodePath::root();
        decode_at(value, &mut path)
    }

    pub fn encode(&self) -> Value {
        match self {
            Node::Text(text) => Value::String(text.clone()),
            Node::Element(element) => {
                let mut object = Map::new();
                object.insert("tag".to_string(), Value::String(element.tag.clone()));
                if !element.attrs.is_empty() {
                    let attrs = element.attrs.iter()
                        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                        .collect();
                    object.insert("attrs".to_string(), Value::Object(attrs));
                }
                if !element.children.is_empty() {
                    let children = element.children.iter().map(Node::encode).collect();
                    object.insert("children".to_string(), Value::Array(children));
                }
                Value::Object(object)
            }
        }
    }

    /// Check every tag and attribute key against `vocabulary`, stopping at the
    /// first violation in document order.
    pub fn validate(&self, vocabulary: &Vocabulary) -> Result<(), ValidationError> {
        let mut path = NodePath::root();
        validate_at(self, vocabulary, &mut path)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&NodeElement> {
        match self {
            Node::Text(_) => None,
            Node::Element(element) => Some(element),
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

/// Decode a page body, the top-level JSON array of nodes.
pub fn decode_content(value: &Value) -> Result<Vec<Node>, DecodeError> {
    let mut path = NodePath::root();
    let Value::Array(items) = value else {
        return Err(DecodeError::UnsupportedShape { path, kind: json_kind(value) });
    };
    decode_children(items, &mut path)
}

pub fn encode_content(content: &[Node]) -> Value {
    Value::Array(content.iter().map(Node::encode).collect())
}

pub fn validate_content(content: &[Node], vocabulary: &Vocabulary) -> Result<(), ValidationError> {
    let mut path = NodePath::root();
    for (idx, node) in content.iter().enumerate() {
        path.push(idx);
        validate_at(node, vocabulary, &mut path)?;
        path.pop();
    }
    Ok(())
}

fn decode_at(value: &Value, path: &mut NodePath) -> Result<Node, DecodeError> {
    let object = match value {
        Value::String(text) => return Ok(Node::Text(text.clone())),
        Value::Object(object) => object,
        other => return Err(DecodeError::UnsupportedShape {
            path: path.clone(),
            kind: json_kind(other),
        }),
    };

    let Some(Value::String(tag)) = object.get("tag") else {
        return Err(DecodeError::MissingTag { path: path.clone() });
    };

    let mut attrs = BTreeMap::new();
    match object.get("attrs") {
        None => {}
        Some(Value::Object(raw_attrs)) => {
            for (key, value) in raw_attrs {
                let Value::String(value) = value else {
                    return Err(DecodeError::InvalidAttrs {
                        path: path.clone(),
                        key: Some(key.clone()),
                    });
                };
                attrs.insert(key.clone(), value.clone());
            }
        }
        Some(_) => return Err(DecodeError::InvalidAttrs { path: path.clone(), key: None }),
    }

    let children = match object.get("children") {
        None => vec![],
        Some(Value::Array(items)) => decode_children(items, path)?,
        Some(_) => return Err(DecodeError::InvalidChildren { path: path.clone() }),
    };

    Ok(Node::Element(NodeElement {
        tag: tag.clone(),
        attrs,
        children,
    }))
}

fn decode_children(items: &[Value], path: &mut NodePath) -> Result<Vec<Node>, DecodeError> {
    let mut children = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        path.push(idx);
        children.push(decode_at(item, path)?);
        path.pop();
    }
    Ok(children)
}

fn validate_at(node: &Node, vocabulary: &Vocabulary, path: &mut NodePath) -> Result<(), ValidationError> {
    let Node::Element(element) = node else {
        return Ok(());
    };
    if !vocabulary.allows_tag(&element.tag) {
        return Err(ValidationError::UnknownTag {
            path: path.clone(),
            tag: element.tag.clone(),
        });
    }
    if let Some(attr) = element.attrs.keys().find(|attr| !vocabulary.allows_attr(&element.tag, attr)) {
        return Err(ValidationError::UnknownAttr {
            path: path.clone(),
            tag: element.tag.clone(),
            attr: attr.clone(),
        });
    }
    for (idx, child) in element.children.iter().enumerate() {
        path.push(idx);
        validate_at(child, vocabulary, path)?;
        path.pop();
    }
    Ok(())
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => {
            for child in &element.children {
                collect_text(child, out);
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/* Serde */

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        match self {
            Node::Text(text) => serializer.serialize_str(text),
            Node::Element(element) => element.serialize(serializer),
        }
    }
}

impl Serialize for NodeElement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let len = 1 + usize::from(!self.attrs.is_empty()) + usize::from(!self.children.is_empty());
        let mut state = serializer.serialize_struct("NodeElement", len)?;
        state.serialize_field("tag", &self.tag)?;
        if self.attrs.is_empty() {
            state.skip_field("attrs")?;
        } else {
            state.serialize_field("attrs", &self.attrs)?;
        }
        if self.children.is_empty() {
            state.skip_field("children")?;
        } else {
            state.serialize_field("children", &self.children)?;
        }
        state.end()
    }
}

/// Error paths are relative to this node; page bodies go through
/// [`decode_content`] so the index in the body is kept.
impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(d: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        let value = Value::deserialize(d)?;
        Node::decode(&value).map_err(D::Error::custom)
    }
}

/// `deserialize_with` helper for page bodies, keeps the index path of a
/// failing node relative to the content array.
pub(crate) fn content<'de, D>(d: D) -> Result<Vec<Node>, D::Error> where D: Deserializer<'de> {
    let value = Value::deserialize(d)?;
    decode_content(&value).map_err(D::Error::custom)
}

pub(crate) fn optional_content<'de, D>(d: D) -> Result<Option<Vec<Node>>, D::Error> where D: Deserializer<'de> {
    match Option::<Value>::deserialize(d)? {
        None => Ok(None),
        Some(value) => decode_content(&value).map(Some).map_err(D::Error::custom),
    }
}
