//! Authenticated request client.

use std::sync::Arc;

use authgate_types::ApiError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::headers::format_bearer;
use crate::navigation::{LOGIN_PATH, Navigator};
use crate::token_store::TokenStore;

/// Configuration for the request client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base address; request paths are appended to it
    pub base_url: Url,
}

/// HTTP client that carries the stored bearer credential.
///
/// Each call is a single attempt: no retries and no timeout beyond what the
/// underlying `reqwest::Client` was built with.
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
    tokens: TokenStore,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: ApiConfig,
        http: Client,
        tokens: TokenStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            http,
            tokens,
            navigator,
        }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    pub async fn get<T>(&self, endpoint: &str) -> ClientResult<T>
    where
        T: DeserializeOwned + Default,
    {
        self.request(Method::GET, endpoint, None, HeaderMap::new())
            .await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: Option<&B>) -> ClientResult<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let body = encode(body)?;
        self.request(Method::POST, endpoint, body, HeaderMap::new())
            .await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: Option<&B>) -> ClientResult<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let body = encode(body)?;
        self.request(Method::PUT, endpoint, body, HeaderMap::new())
            .await
    }

    pub async fn patch<T, B>(&self, endpoint: &str, body: Option<&B>) -> ClientResult<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let body = encode(body)?;
        self.request(Method::PATCH, endpoint, body, HeaderMap::new())
            .await
    }

    pub async fn delete<T>(&self, endpoint: &str) -> ClientResult<T>
    where
        T: DeserializeOwned + Default,
    {
        self.request(Method::DELETE, endpoint, None, HeaderMap::new())
            .await
    }

    /// Send one request.
    ///
    /// `headers` are merged over the default `Content-Type: application/json`;
    /// the stored credential, if any, is always sent as the bearer token.
    ///
    /// # Returns
    /// The decoded body for a 2xx JSON response, `T::default()` for any other
    /// 2xx response, or the classified failure.
    #[instrument(skip(self, body, headers), fields(url = tracing::field::Empty))]
    pub async fn request<T>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        headers: HeaderMap,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let url = self.resolve_url(endpoint);
        tracing::Span::current().record("url", url.as_str());

        let mut builder = self
            .http
            .request(method, &url)
            .headers(self.build_headers(headers));

        if let Some(body) = body {
            let bytes = serde_json::to_vec(&body).map_err(|e| ClientError::Encode(e.to_string()))?;
            builder = builder.body(bytes);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "request did not reach the backend");
            ClientError::Transport(e.to_string())
        })?;

        self.handle_response(response).await
    }

    fn resolve_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }

        let base = self.config.base_url.as_str().trim_end_matches('/');
        if endpoint.starts_with('/') {
            format!("{base}{endpoint}")
        } else {
            format!("{base}/{endpoint}")
        }
    }

    fn build_headers(&self, caller: HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(caller);

        if let Some(credential) = self.tokens.get_credential() {
            match HeaderValue::from_str(&format_bearer(&credential)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("stored credential is not a valid header value, sending without it"),
            }
        }

        headers
    }

    async fn handle_response<T>(&self, response: Response) -> ClientResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("backend rejected the credential, ending session");
            self.tokens.clear_session();
            self.navigator.assign(LOGIN_PATH);
            return Err(ClientError::AuthRequired);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_body(status.as_u16(), &body);
            warn!(status = %status, message = ?error.message, "backend returned an error");
            return Err(ClientError::Application(error));
        }

        if !is_json(response.headers()) {
            debug!(status = %status, "non-JSON response, returning empty result");
            return Ok(T::default());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(error = %e, "failed to decode response body");
            ClientError::Decode(e.to_string())
        })
    }
}

fn encode<B: Serialize + ?Sized>(body: Option<&B>) -> ClientResult<Option<Value>> {
    body.map(serde_json::to_value)
        .transpose()
        .map_err(|e| ClientError::Encode(e.to_string()))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"))
}
