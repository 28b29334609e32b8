use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::telegraph::node::{optional_content, Node};

/// A Telegraph account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Account {
    /// Shown to the user above the "Edit/Publish" button, other users don't see it.
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_url: String,
    /// Only returned by `createAccount` and `revokeAccessToken`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Authorizes a browser on telegra.ph. Single use, expires after 5 minutes;
    /// nothing here tracks that, callers must use it promptly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Page {
    pub path: String,
    pub url: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Only present when the page was requested with `return_content`.
    #[serde(default, deserialize_with = "optional_content", skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Node>>,
    pub views: u64,
    /// Only present when an access token was passed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_edit: Option<bool>,
}

/// Pages of an account, most recently created first.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageList {
    pub total_count: u64,
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageViews {
    pub views: u64,
}

/// A file uploaded to telegra.ph, `src` is usable as an `img`/`video` source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Upload {
    pub src: String,
}

/// Envelope wrapping every API response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegraphResponse {
    pub ok: bool,
    pub error: Option<Value>,
    pub result: Option<Value>,
}
