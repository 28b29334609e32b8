use serde::de::DeserializeOwned;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::telegraph::node::{self, Node};
use crate::telegraph::types::{Account, Page, PageList, PageViews};

/// Binds a parameter record to its API method name and response type.
pub trait TelegraphMethod: Serialize {
    const NAME: &'static str;
    type Response: DeserializeOwned;

    /// Page body carried by this request, checked before publishing.
    fn content(&self) -> Option<&[Node]> {
        None
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/* Account */

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateAccountRequest {
    pub short_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
}

impl CreateAccountRequest {
    pub fn new(short_name: impl Into<String>) -> CreateAccountRequest {
        CreateAccountRequest {
            short_name: short_name.into(),
            author_name: None,
            author_url: None,
        }
    }
}

impl TelegraphMethod for CreateAccountRequest {
    const NAME: &'static str = "createAccount";
    type Response = Account;
}

/// Only fields that are set are updated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EditAccountInfoRequest {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
}

impl TelegraphMethod for EditAccountInfoRequest {
    const NAME: &'static str = "editAccountInfo";
    type Response = Account;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountField {
    ShortName,
    AuthorName,
    AuthorUrl,
    AuthUrl,
    PageCount,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GetAccountInfoRequest {
    pub access_token: String,
    /// Empty means the server default (`short_name`, `author_name`, `author_url`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AccountField>,
}

impl TelegraphMethod for GetAccountInfoRequest {
    const NAME: &'static str = "getAccountInfo";
    type Response = Account;
}

/// Invalidates the current token; the response carries the new `access_token`
/// and `auth_url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RevokeAccessTokenRequest {
    pub access_token: String,
}

impl TelegraphMethod for RevokeAccessTokenRequest {
    const NAME: &'static str = "revokeAccessToken";
    type Response = Account;
}

/* Page */

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreatePageRequest {
    pub access_token: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(deserialize_with = "node::content")]
    pub content: Vec<Node>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub return_content: bool,
}

impl TelegraphMethod for CreatePageRequest {
    const NAME: &'static str = "createPage";
    type Response = Page;

    fn content(&self) -> Option<&[Node]> {
        Some(&self.content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EditPageRequest {
    pub access_token: String,
    pub path: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(deserialize_with = "node::content")]
    pub content: Vec<Node>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub return_content: bool,
}

impl TelegraphMethod for EditPageRequest {
    const NAME: &'static str = "editPage";
    type Response = Page;

    fn content(&self) -> Option<&[Node]> {
        Some(&self.content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GetPageRequest {
    pub path: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub return_content: bool,
}

impl TelegraphMethod for GetPageRequest {
    const NAME: &'static str = "getPage";
    type Response = Page;
}

pub const PAGE_LIST_MAX_LIMIT: u32 = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GetPageListRequest {
    pub access_token: String,
    /// Server default is 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Server default is 50.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl GetPageListRequest {
    pub fn new(access_token: impl Into<String>) -> GetPageListRequest {
        GetPageListRequest {
            access_token: access_token.into(),
            ..Default::default()
        }
    }

    pub fn offset(mut self, offset: u32) -> GetPageListRequest {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u32) -> GetPageListRequest {
        self.limit = Some(u32::min(limit, PAGE_LIST_MAX_LIMIT));
        self
    }
}

impl TelegraphMethod for GetPageListRequest {
    const NAME: &'static str = "getPageList";
    type Response = PageList;
}

/* Views */

/// Granularity of a view count query.
///
/// Each finer level carries all coarser ones, so a month can't be asked for
/// without its year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewsScope {
    #[default]
    Total,
    Year(u16),
    Month(u16, u8),
    Day(u16, u8, u8),
    Hour(u16, u8, u8, u8),
}

impl ViewsScope {
    fn fields(&self) -> [(&'static str, Option<u16>); 4] {
        let (year, month, day, hour) = match *self {
            ViewsScope::Total => (None, None, None, None),
            ViewsScope::Year(y) => (Some(y), None, None, None),
            ViewsScope::Month(y, m) => (Some(y), Some(m), None, None),
            ViewsScope::Day(y, m, d) => (Some(y), Some(m), Some(d), None),
            ViewsScope::Hour(y, m, d, h) => (Some(y), Some(m), Some(d), Some(h)),
        };
        [
            ("year", year),
            ("month", month.map(u16::from)),
            ("day", day.map(u16::from)),
            ("hour", hour.map(u16::from)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetViewsRequest {
    pub path: String,
    pub scope: ViewsScope,
}

impl GetViewsRequest {
    pub fn new(path: impl Into<String>, scope: ViewsScope) -> GetViewsRequest {
        GetViewsRequest { path: path.into(), scope }
    }
}

impl Serialize for GetViewsRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let fields = self.scope.fields();
        let count = fields.iter().filter(|(_, v)| v.is_some()).count();
        let mut map = serializer.serialize_map(Some(1 + count))?;
        map.serialize_entry("path", &self.path)?;
        for (name, value) in fields {
            if let Some(value) = value {
                map.serialize_entry(name, &value)?;
            }
        }
        map.end()
    }
}

impl TelegraphMethod for GetViewsRequest {
    const NAME: &'static str = "getViews";
    type Response = PageViews;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::telegraph::node::NodeElement;

    #[test]
    fn test_create_page_encoding() {
        let req = CreatePageRequest {
            access_token: "token".to_string(),
            title: "Title".to_string(),
            author_name: Some("Mint".to_string()),
            author_url: None,
            content: vec![NodeElement::h4("Preview").into(), Node::from("plain")],
            return_content: false,
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({
            "access_token": "token",
            "title": "Title",
            "author_name": "Mint",
            "content": [{"tag": "h4", "children": ["Preview"]}, "plain"]
        }));
        assert_eq!(req.content().map(|c| c.len()), Some(2));
        assert_eq!(CreatePageRequest::NAME, "createPage");
    }

    #[test]
    fn test_account_field_names() {
        let req = GetAccountInfoRequest {
            access_token: "t".to_string(),
            fields: vec![AccountField::AuthUrl, AccountField::PageCount],
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({
            "access_token": "t",
            "fields": ["auth_url", "page_count"]
        }));
        let bare = GetAccountInfoRequest { access_token: "t".to_string(), fields: vec![] };
        assert_eq!(serde_json::to_value(&bare).unwrap(), json!({"access_token": "t"}));
    }

    #[test]
    fn test_page_list_limit_clamped() {
        let req = GetPageListRequest::new("t").offset(10).limit(500);
        assert_eq!(req.limit, Some(PAGE_LIST_MAX_LIMIT));
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({
            "access_token": "t", "offset": 10, "limit": 200
        }));
        assert_eq!(serde_json::to_value(GetPageListRequest::new("t")).unwrap(), json!({"access_token": "t"}));
    }

    #[test]
    fn test_views_scope_encoding() {
        let total = GetViewsRequest::new("Sample", ViewsScope::Total);
        assert_eq!(serde_json::to_value(&total).unwrap(), json!({"path": "Sample"}));

        let month = GetViewsRequest::new("Sample", ViewsScope::Month(2024, 3));
        assert_eq!(serde_json::to_value(&month).unwrap(), json!({"path": "Sample", "year": 2024, "month": 3}));

        let hour = GetViewsRequest::new("Sample", ViewsScope::Hour(2024, 3, 9, 23));
        assert_eq!(serde_json::to_string(&hour).unwrap(),
            r#"{"path":"Sample","year":2024,"month":3,"day":9,"hour":23}"#);
    }

    #[test]
    fn test_content_error_path_is_relative_to_body() {
        let err = serde_json::from_value::<CreatePageRequest>(json!({
            "access_token": "t",
            "title": "T",
            "content": ["a", {"tag": "p", "children": [1]}]
        })).unwrap_err();
        assert!(err.to_string().contains("unsupported node shape at 1.0: number"), "{}", err);

        let err = serde_json::from_value::<EditPageRequest>(json!({
            "access_token": "t",
            "path": "P",
            "title": "T",
            "content": ["ok", {"tag": "p"}, {"children": []}]
        })).unwrap_err();
        assert!(err.to_string().contains("missing tag at 2"), "{}", err);
    }

    #[test]
    fn test_request_content_round_trip() {
        let req = CreatePageRequest {
            access_token: "t".to_string(),
            title: "T".to_string(),
            author_name: None,
            author_url: None,
            content: vec![NodeElement::link("x", Some("https://x")).into(), Node::from("y")],
            return_content: true,
        };
        let parsed: CreatePageRequest = serde_json::from_value(serde_json::to_value(&req).unwrap()).unwrap();
        assert_eq!(parsed, req);
    }

    #[test]
    fn test_return_content_omitted_when_false() {
        let req = GetPageRequest { path: "Sample".to_string(), return_content: false };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({"path": "Sample"}));
        let req = GetPageRequest { path: "Sample".to_string(), return_content: true };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({"path": "Sample", "return_content": true}));
    }
}
