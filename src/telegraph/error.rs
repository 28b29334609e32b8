use std::fmt::Display;

use thiserror::Error;

/// Chain of child indices leading from the decoded root to a node.
///
/// For a page body the first index is the node's position in the content
/// array. The root itself has an empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> NodePath {
        NodePath(vec![])
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        NodePath(indices)
    }
}

impl Display for NodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

/* Decode Error */

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("missing tag at {path}")]
    MissingTag { path: NodePath },

    /// `attrs` is not an object, or `key` maps to a non-string value.
    #[error("invalid attrs at {path}{}", key_suffix(.key))]
    InvalidAttrs { path: NodePath, key: Option<String> },

    #[error("invalid children at {path}: expected an array")]
    InvalidChildren { path: NodePath },

    #[error("unsupported node shape at {path}: {kind}")]
    UnsupportedShape { path: NodePath, kind: &'static str },
}

impl DecodeError {
    pub fn path(&self) -> &NodePath {
        match self {
            DecodeError::MissingTag { path } => path,
            DecodeError::InvalidAttrs { path, .. } => path,
            DecodeError::InvalidChildren { path } => path,
            DecodeError::UnsupportedShape { path, .. } => path,
        }
    }
}

fn key_suffix(key: &Option<String>) -> String {
    match key {
        Some(key) => format!(" (key `{}`)", key),
        None => String::new(),
    }
}

/* Validation Error */

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("tag `{tag}` is not allowed (at {path})")]
    UnknownTag { path: NodePath, tag: String },

    #[error("attribute `{attr}` on tag `{tag}` is not allowed (at {path})")]
    UnknownAttr { path: NodePath, tag: String, attr: String },
}

impl ValidationError {
    pub fn path(&self) -> &NodePath {
        match self {
            ValidationError::UnknownTag { path, .. } => path,
            ValidationError::UnknownAttr { path, .. } => path,
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            ValidationError::UnknownTag { tag, .. } => tag,
            ValidationError::UnknownAttr { tag, .. } => tag,
        }
    }

    pub fn attr(&self) -> Option<&str> {
        match self {
            ValidationError::UnknownTag { .. } => None,
            ValidationError::UnknownAttr { attr, .. } => Some(attr),
        }
    }
}

/* Transport Error */

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with `ok: false`.
    #[error("Telegraph API error: {0}")]
    Api(String),

    #[error("Telegraph API returned no result")]
    EmptyResult,
}

/* Client Error */

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to encode request: {0}")]
    Encode(serde_json::Error),

    #[error("Failed to decode response: {0}")]
    Decode(serde_json::Error),

    #[error("Content rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
