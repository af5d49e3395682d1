//! Authenticated REST client
//!
//! Thin wrapper over the host's [`HttpClient`] that joins paths onto the API
//! root, attaches the bearer token from the session, applies the configured
//! timeout, and folds HTTP statuses into [`CatalogError`]. A 401 is reported
//! to the session provider before the error is returned, so the session is
//! already torn down by the time the caller sees `Unauthorized`.

use crate::error::{CatalogError, Result};
use crate::payload::EncodedBody;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use bridge_traits::session::SessionProvider;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// REST client shared by every resource controller.
#[derive(Clone)]
pub struct ApiClient {
    http: Arc<dyn HttpClient>,
    session: Arc<dyn SessionProvider>,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (no trailing slash).
    pub fn new(
        http: Arc<dyn HttpClient>,
        session: Arc<dyn SessionProvider>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            session,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// GET `path` with query parameters.
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        self.send(HttpMethod::Get, path, query, None).await
    }

    /// POST `path` with an encoded body.
    pub async fn post(&self, path: &str, body: EncodedBody) -> Result<Value> {
        self.send(HttpMethod::Post, path, &[], Some(body)).await
    }

    /// PUT `path` with an encoded body.
    pub async fn put(&self, path: &str, body: EncodedBody) -> Result<Value> {
        self.send(HttpMethod::Put, path, &[], Some(body)).await
    }

    /// PATCH `path` with no body (status toggles).
    pub async fn patch(&self, path: &str) -> Result<Value> {
        self.send(HttpMethod::Patch, path, &[], None).await
    }

    /// DELETE `path`.
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.send(HttpMethod::Delete, path, &[], None).await
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(String, String)],
        body: Option<EncodedBody>,
    ) -> Result<Value> {
        let url = self.build_url(path, query)?;
        debug!(%url, ?method, "API request");

        let mut request = HttpRequest::new(method, url).timeout(self.timeout);

        if let Some(token) = self.session.access_token().await {
            request = request.bearer_token(token);
        }

        request = match body {
            Some(EncodedBody::Json(value)) => request.json(&value)?,
            Some(EncodedBody::Multipart(form)) => request.multipart(form),
            None => request,
        };

        let response = self.http.execute(request).await?;

        if response.status == 401 {
            warn!("API request rejected with 401");
            self.session.handle_unauthorized().await;
            return Err(CatalogError::Unauthorized);
        }

        if !response.is_success() {
            let message = extract_error_message(&response.body)
                .unwrap_or_else(|| format!("Request failed (HTTP {})", response.status));
            return Err(CatalogError::Api {
                status: response.status,
                message,
            });
        }

        // Some endpoints (DELETE in particular) return an empty body.
        Ok(serde_json::from_slice(&response.body).unwrap_or(Value::Null))
    }

    fn build_url(&self, path: &str, query: &[(String, String)]) -> Result<String> {
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            let encoded = serde_urlencoded::to_string(query)
                .map_err(|e| CatalogError::Network(format!("Invalid query: {}", e)))?;
            url.push('?');
            url.push_str(&encoded);
        }
        Ok(url)
    }
}

/// Best-effort extraction of a server error message, preferring `message`
/// over `error`, matching what the backend actually sends.
fn extract_error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::http::HttpResponse;
    use bytes::Bytes;
    use mockall::mock;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    mock! {
        Http {}

        #[async_trait]
        impl HttpClient for Http {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
        }
    }

    #[derive(Default)]
    struct FakeSession {
        expired: AtomicBool,
    }

    #[async_trait]
    impl SessionProvider for FakeSession {
        async fn access_token(&self) -> Option<String> {
            Some("tok-1".to_string())
        }

        async fn handle_unauthorized(&self) {
            self.expired.store(true, Ordering::SeqCst);
        }
    }

    fn response(status: u16, body: serde_json::Value) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(serde_json::to_vec(&body).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_get_builds_url_and_attaches_token() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .withf(|req| {
                req.url == "https://api.example.com/musics/getAll?page=2&limit=10"
                    && req.headers.get("Authorization")
                        == Some(&"Bearer tok-1".to_string())
            })
            .returning(|_| Ok(response(200, serde_json::json!({"data": []}))));

        let client = ApiClient::new(
            Arc::new(http),
            Arc::new(FakeSession::default()),
            "https://api.example.com/",
            Duration::from_secs(10),
        );

        let body = client
            .get(
                "/musics/getAll",
                &[
                    ("page".to_string(), "2".to_string()),
                    ("limit".to_string(), "10".to_string()),
                ],
            )
            .await
            .unwrap();
        assert_eq!(body, serde_json::json!({"data": []}));
    }

    #[tokio::test]
    async fn test_401_notifies_session() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .returning(|_| Ok(response(401, serde_json::json!({"message": "expired"}))));

        let session = Arc::new(FakeSession::default());
        let client = ApiClient::new(
            Arc::new(http),
            session.clone(),
            "https://api.example.com",
            Duration::from_secs(10),
        );

        let err = client.get("/users/get", &[]).await.unwrap_err();
        assert!(matches!(err, CatalogError::Unauthorized));
        assert!(session.expired.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_server_message_preferred() {
        let mut http = MockHttp::new();
        http.expect_execute().returning(|_| {
            Ok(response(
                422,
                serde_json::json!({"message": "name already taken"}),
            ))
        });

        let client = ApiClient::new(
            Arc::new(http),
            Arc::new(FakeSession::default()),
            "https://api.example.com",
            Duration::from_secs(10),
        );

        let err = client.get("/categories/getAll", &[]).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Api { status: 422, message } if message == "name already taken"
        ));
    }

    #[tokio::test]
    async fn test_empty_body_becomes_null() {
        let mut http = MockHttp::new();
        http.expect_execute().returning(|_| {
            Ok(HttpResponse {
                status: 204,
                headers: HashMap::new(),
                body: Bytes::new(),
            })
        });

        let client = ApiClient::new(
            Arc::new(http),
            Arc::new(FakeSession::default()),
            "https://api.example.com",
            Duration::from_secs(10),
        );

        let body = client.delete("/musics/m-1").await.unwrap();
        assert_eq!(body, Value::Null);
    }
}
