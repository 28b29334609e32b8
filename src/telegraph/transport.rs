use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::telegraph::error::TransportError;
use crate::telegraph::types::TelegraphResponse;

pub const DEFAULT_API_SERVER: &'static str = "https://api.telegra.ph";

/// Performs a single API call and hands back the unwrapped `result` value.
pub trait Transport {
    fn invoke(&self, method: &str, params: Value) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    api_server: String,
}

impl HttpTransport {
    pub fn new(api_server: impl Into<String>, timeout: Duration) -> Result<HttpTransport, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(HttpTransport::with_client(client, api_server))
    }

    pub fn with_client(client: Client, api_server: impl Into<String>) -> HttpTransport {
        let api_server: String = api_server.into();
        HttpTransport {
            client,
            api_server: api_server.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_server(&self) -> &str {
        &self.api_server
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        HttpTransport::with_client(Client::new(), DEFAULT_API_SERVER)
    }
}

impl Transport for HttpTransport {
    async fn invoke(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        let url = format!("{}/{}", self.api_server, method);

        log::debug!(
            target: "telegraph_transport",
            "POST {}",
            url
        );

        let response: TelegraphResponse = self.client.post(&url)
            .json(&params)
            .send()
            .await?
            .json()
            .await?;

        unwrap_envelope(response)
    }
}

/// `{ok, error, result}` to the bare result.
pub fn unwrap_envelope(response: TelegraphResponse) -> Result<Value, TransportError> {
    if !response.ok {
        let error = match response.error {
            Some(Value::String(msg)) => msg,
            Some(other) => other.to_string(),
            None => "<no error message>".to_string(),
        };
        return Err(TransportError::Api(error));
    }
    response.result.ok_or(TransportError::EmptyResult)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn envelope(value: Value) -> TelegraphResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_unwrap_ok() {
        let result = unwrap_envelope(envelope(json!({"ok": true, "result": {"views": 3}}))).unwrap();
        assert_eq!(result, json!({"views": 3}));
    }

    #[test]
    fn test_unwrap_api_error() {
        let err = unwrap_envelope(envelope(json!({"ok": false, "error": "PAGE_NOT_FOUND"}))).unwrap_err();
        assert!(matches!(err, TransportError::Api(ref msg) if msg == "PAGE_NOT_FOUND"));

        let err = unwrap_envelope(envelope(json!({"ok": false}))).unwrap_err();
        assert!(matches!(err, TransportError::Api(ref msg) if msg == "<no error message>"));
    }

    #[test]
    fn test_unwrap_missing_result() {
        let err = unwrap_envelope(envelope(json!({"ok": true}))).unwrap_err();
        assert!(matches!(err, TransportError::EmptyResult));
    }

    #[test]
    fn test_api_server_trailing_slash() {
        let transport = HttpTransport::with_client(Client::new(), "http://localhost:8080/");
        assert_eq!(transport.api_server(), "http://localhost:8080");
        assert_eq!(HttpTransport::default().api_server(), DEFAULT_API_SERVER);
    }
}
