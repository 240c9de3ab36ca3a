//! A model provider for the Gemini `generateContent` REST API.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use chat_widget_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};
use mime::Mime;
use reqwest::{Client, Response, Url, header};
use serde::de::DeserializeOwned;

pub use config::{
    DEFAULT_INSTRUCTION_TEMPLATE, GeminiConfig, GeminiConfigBuilder,
};
pub use proto::ModelInfo;
use proto::{GenerateContentResponse, ListModelsResponse};

/// Error type for [`GeminiProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Gemini model provider.
#[derive(Clone, Debug)]
pub struct GeminiProvider {
    client: Client,
    config: Arc<GeminiConfig>,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider` with the given configuration.
    #[inline]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Lists the models that `credential` has access to.
    pub fn list_models(
        &self,
        credential: &str,
    ) -> impl Future<Output = Result<Vec<ModelInfo>, Error>> + Send + 'static
    {
        let url = endpoint_url(
            &format!("{}/models", self.config.base_url),
            credential,
        );
        let client = self.client.clone();

        async move {
            let resp = client
                .get(url?)
                .send()
                .await
                .map_err(transport_error)?;
            let list: ListModelsResponse = read_json(resp).await?;
            debug!("listed {} models", list.models.len());
            Ok(list.models)
        }
    }
}

impl ModelProvider for GeminiProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        let url = endpoint_url(
            &format!(
                "{}/models/{}:generateContent",
                self.config.base_url, self.config.model
            ),
            &req.credential,
        );
        let body = proto::create_request(&req.message, &self.config);
        let client = self.client.clone();

        async move {
            let resp = client
                .post(url?)
                .header(header::CONTENT_TYPE, "application/json")
                .json(&body)
                .send()
                .await
                .map_err(transport_error)?;

            let resp: GenerateContentResponse = read_json(resp).await?;
            proto::extract_reply(resp)
        }
    }
}

/// The URL carries the credential, so it is left out of the message.
fn transport_error(err: reqwest::Error) -> Error {
    Error::new(format!("{}", err.without_url()), ErrorKind::Transport)
}

/// The credential travels as the `key` query parameter.
fn endpoint_url(base: &str, credential: &str) -> Result<Url, Error> {
    Url::parse_with_params(base, &[("key", credential)]).map_err(|err| {
        Error::new(
            format!("invalid endpoint {base}: {err}"),
            ErrorKind::Transport,
        )
    })
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        // The body usually explains what went wrong, e.g. an invalid key.
        let body = resp.text().await.unwrap_or_default();
        warn!("request failed with {status}: {body}");
        return Err(Error::new(format!("HTTP {status}"), ErrorKind::Status));
    }

    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    if let Some(content_type) = &content_type {
        let is_json = content_type
            .parse::<Mime>()
            .map(|m| {
                m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON)
            })
            .unwrap_or(false);
        if !is_json {
            return Err(Error::new(
                format!("Unexpected content type: {content_type}"),
                ErrorKind::Decode,
            ));
        }
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(transport_error)?;
    trace!("got response body: {} bytes", bytes.len());
    serde_json::from_slice(&bytes)
        .map_err(|err| Error::new(format!("{err}"), ErrorKind::Decode))
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;

    const GENERATE_PATH: &str =
        "/models/gemini-3-flash-preview:generateContent";

    fn provider_for(server: &Server) -> GeminiProvider {
        let config = GeminiConfigBuilder::new()
            .with_base_url(server.url())
            .build();
        GeminiProvider::new(config)
    }

    #[tokio::test]
    async fn test_successful_reply() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", GENERATE_PATH)
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_body(Matcher::PartialJson(json!({
                "contents": [{
                    "parts": [{
                        "text": GeminiConfig::default().render_prompt("Hello")
                    }]
                }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json; charset=UTF-8")
            .with_body(
                json!({
                    "candidates": [{
                        "content": {
                            "role": "model",
                            "parts": [{ "text": "X" }]
                        }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let provider = provider_for(&server);
        let reply = provider
            .send_request(&ModelRequest::new("Hello", "test-key"))
            .await
            .unwrap();
        assert_eq!(reply.text, "X");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unsuccessful_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", GENERATE_PATH)
            .match_query(Matcher::Any)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"error":{"code":400,"message":"API key not valid."}}"#,
            )
            .create_async()
            .await;

        let provider = provider_for(&server);
        let err = provider
            .send_request(&ModelRequest::new("Hello", "bad-key"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Status);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_candidates() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", GENERATE_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .create_async()
            .await;

        let provider = provider_for(&server);
        let err = provider
            .send_request(&ModelRequest::new("Hello", "test-key"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCandidate);
    }

    #[tokio::test]
    async fn test_null_candidate() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", GENERATE_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[null]}"#)
            .create_async()
            .await;

        let provider = provider_for(&server);
        let err = provider
            .send_request(&ModelRequest::new("Hello", "test-key"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCandidate);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", GENERATE_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{ not json")
            .create_async()
            .await;

        let provider = provider_for(&server);
        let err = provider
            .send_request(&ModelRequest::new("Hello", "test-key"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_unexpected_content_type() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", GENERATE_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html></html>")
            .create_async()
            .await;

        let provider = provider_for(&server);
        let err = provider
            .send_request(&ModelRequest::new("Hello", "test-key"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let config = GeminiConfigBuilder::new()
            .with_base_url("http://127.0.0.1:1")
            .build();
        let provider = GeminiProvider::new(config);
        let err = provider
            .send_request(&ModelRequest::new("Hello", "test-key"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(!err.to_string().contains("test-key"));
    }

    #[tokio::test]
    async fn test_list_models() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/models")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "models": [{
                        "name": "models/gemini-3-flash-preview",
                        "displayName": "Gemini 3 Flash Preview",
                        "supportedGenerationMethods": ["generateContent"]
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let provider = provider_for(&server);
        let models = provider.list_models("test-key").await.unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "models/gemini-3-flash-preview");
        assert_eq!(models[0].supported_generation_methods, ["generateContent"]);
        mock.assert_async().await;
    }
}
