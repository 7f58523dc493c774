//! # API Client
//!
//! The reqwest-backed [`Transport`] used in production.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::core::error::{ApiError, Result};
use crate::core::transport::{ApiRequest, FileUpload, Method, RequestBody, Transport};

/// HTTP client for the chat backend.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from validated configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.parsed_base_url()?,
        })
    }

    /// Client for `base_url` with every other setting at its default.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::new(&ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve the request's segments and query against the base URL.
    pub(crate) fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::Config(format!("{} cannot be a base URL", self.base_url)))?;
            path.pop_if_empty();
            path.extend(&request.segments);
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

fn multipart_form(field: String, files: Vec<FileUpload>) -> Result<Form> {
    files.into_iter().try_fold(Form::new(), |form, file| {
        let mime = file
            .content_type
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&mime)
            .map_err(|e| ApiError::InvalidInput(format!("Invalid content type {}: {}", mime, e)))?;
        Ok(form.part(field.clone(), part))
    })
}

/// Keep the server's error body as-is; fall back to the raw text.
fn rejection_payload(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[async_trait]
impl Transport for ApiClient {
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        let url = self.url_for(&request)?;
        let method = request.method;
        let path = request.path();

        let mut builder = self.client.request(method.into(), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart { field, files } => builder.multipart(multipart_form(field, files)?),
        };

        let start = Instant::now();
        let response = builder.send().await.map_err(|e| {
            tracing::error!(method = method.as_str(), path = %path, error = %e, "Network error");
            ApiError::TransportFailure(e.to_string())
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(method = method.as_str(), path = %path, error = %e, "Failed to read body");
            ApiError::TransportFailure(e.to_string())
        })?;
        let duration = start.elapsed();

        if status.is_success() {
            tracing::debug!(
                method = method.as_str(),
                path = %path,
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                "Request completed"
            );
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Value::Null);
            }
            serde_json::from_slice(&bytes)
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let payload = rejection_payload(&bytes);
            tracing::warn!(
                method = method.as_str(),
                path = %path,
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                "Request rejected"
            );
            Err(ApiError::RequestRejected {
                status: status.as_u16(),
                payload,
            })
        }
    }
}
