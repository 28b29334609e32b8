use serde_json::Value;

use crate::helper::log::{LogCall, LogContent};
use crate::telegraph::error::ClientError;
use crate::telegraph::node::validate_content;
use crate::telegraph::request::{
    CreatePageRequest, EditPageRequest, GetAccountInfoRequest, GetPageListRequest,
    GetPageRequest, GetViewsRequest, TelegraphMethod, ViewsScope,
};
use crate::telegraph::transport::{HttpTransport, Transport};
use crate::telegraph::types::{Account, Page, PageList, PageViews};
use crate::telegraph::vocabulary::Vocabulary;

/// Typed front of a [`Transport`].
///
/// Holds no mutable state; share it behind an `Arc` when several tasks publish.
#[derive(Debug, Clone)]
pub struct Telegraph<T = HttpTransport> {
    transport: T,
    vocabulary: Option<Vocabulary>,
}

impl<T: Transport> Telegraph<T> {
    pub fn new(transport: T) -> Telegraph<T> {
        Telegraph { transport, vocabulary: None }
    }

    /// Reject page bodies outside `vocabulary` before they are sent.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Telegraph<T> {
        self.vocabulary = Some(vocabulary);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn call<M: TelegraphMethod>(&self, request: &M) -> Result<M::Response, ClientError> {
        if let (Some(vocabulary), Some(content)) = (self.vocabulary.as_ref(), request.content()) {
            if let Err(e) = validate_content(content, vocabulary) {
                log::warn!(
                    target: "telegraph_client",
                    "{} Content rejected: {}",
                    LogCall(M::NAME), e
                );
                return Err(e.into());
            }
        }

        let params = serde_json::to_value(request).map_err(ClientError::Encode)?;

        log::debug!(
            target: "telegraph_client",
            "{} Invoking{}",
            LogCall(M::NAME), request.content().map(|c| LogContent(c).to_string()).unwrap_or_default()
        );

        let result: Value = match self.transport.invoke(M::NAME, params).await {
            Ok(result) => result,
            Err(e) => {
                log::warn!(
                    target: "telegraph_client",
                    "{} Request failed: {}",
                    LogCall(M::NAME), e
                );
                return Err(e.into());
            }
        };

        serde_json::from_value(result).map_err(ClientError::Decode)
    }

    pub async fn create_page(&self, request: &CreatePageRequest) -> Result<Page, ClientError> {
        let page = self.call(request).await?;
        log::info!(
            target: "telegraph_client",
            "{} Created page {}",
            LogCall(CreatePageRequest::NAME), page.url
        );
        Ok(page)
    }

    pub async fn edit_page(&self, request: &EditPageRequest) -> Result<Page, ClientError> {
        self.call(request).await
    }

    pub async fn get_page(&self, path: &str, return_content: bool) -> Result<Page, ClientError> {
        self.call(&GetPageRequest { path: path.to_string(), return_content }).await
    }

    pub async fn get_page_list(&self, request: &GetPageListRequest) -> Result<PageList, ClientError> {
        self.call(request).await
    }

    pub async fn get_views(&self, path: &str, scope: ViewsScope) -> Result<PageViews, ClientError> {
        self.call(&GetViewsRequest::new(path, scope)).await
    }

    pub async fn get_account_info(&self, request: &GetAccountInfoRequest) -> Result<Account, ClientError> {
        self.call(request).await
    }
}

impl Default for Telegraph<HttpTransport> {
    fn default() -> Self {
        Telegraph::new(HttpTransport::default())
    }
}
