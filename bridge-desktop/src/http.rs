//! HTTP Client Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    http::{HttpBody, HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartPart},
};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Reqwest-based HTTP client implementation
///
/// Provides HTTP operations with:
/// - Connection pooling via reqwest
/// - TLS support by default
/// - Multipart form encoding for file uploads
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(10))
    }

    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .user_agent("sama-console-core/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// Create a new HTTP client wrapping an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Convert bridge HttpMethod to reqwest Method
    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// Build reqwest request from bridge request
    fn build_request(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let method = Self::convert_method(request.method);
        let mut req = self.client.request(method, &request.url);

        for (key, value) in request.headers {
            req = req.header(key, value);
        }

        match request.body {
            HttpBody::Empty => {}
            HttpBody::Bytes { data, content_type } => {
                req = req.header(reqwest::header::CONTENT_TYPE, content_type);
                req = req.body(data);
            }
            HttpBody::Multipart(form) => {
                let mut multipart = reqwest::multipart::Form::new();
                for part in form.parts {
                    match part {
                        MultipartPart::Text { name, value } => {
                            multipart = multipart.text(name, value);
                        }
                        MultipartPart::File {
                            name,
                            file_name,
                            content_type,
                            data,
                        } => {
                            let file_part = reqwest::multipart::Part::bytes(data.to_vec())
                                .file_name(file_name)
                                .mime_str(&content_type)
                                .unwrap_or_else(|_| {
                                    reqwest::multipart::Part::bytes(Vec::new())
                                });
                            multipart = multipart.part(name, file_part);
                        }
                    }
                }
                req = req.multipart(multipart);
            }
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        req
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(url = %request.url, method = ?request.method, "Executing HTTP request");

        let req_builder = self.build_request(request);

        match req_builder.send().await {
            Ok(response) => {
                let status = response.status().as_u16();

                let headers: HashMap<String, String> = response
                    .headers()
                    .iter()
                    .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
                    .collect();

                let body = response
                    .bytes()
                    .await
                    .map_err(|e| BridgeError::OperationFailed(e.to_string()))?;

                Ok(HttpResponse {
                    status,
                    headers,
                    body,
                })
            }
            Err(e) => {
                warn!(error = %e, "HTTP request failed");

                if e.is_timeout() {
                    Err(BridgeError::Timeout("Request timed out".to_string()))
                } else if e.is_connect() {
                    Err(BridgeError::OperationFailed(format!(
                        "Connection failed: {}",
                        e
                    )))
                } else {
                    Err(BridgeError::OperationFailed(e.to_string()))
                }
            }
        }
    }
}
