use std::sync::Arc;

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::Result;

/// A fully prepared request, already carrying its `Authorization` header.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Status and body text of a completed request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    body: String,
}

impl HttpResponse {
    pub fn new<T: Into<String>>(status: StatusCode, body: T) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn into_text(self) -> String {
        self.body
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// The HTTP capability the client is built on.
///
/// Implementations only need to send the request as given and report the
/// status code and body text; no retries or timeouts are expected.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[async_trait]
impl Transport for ReqwestClient {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;
        let mut builder = ReqwestClient::request(self, method, url.as_str()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!(%status, "received response");
        let body = response.text().await?;
        Ok(HttpResponse::new(status, body))
    }
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).request(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Settings {
        screen_name: String,
        protected: bool,
    }

    #[test]
    fn response_accessors() {
        let response = HttpResponse::new(
            StatusCode::OK,
            r#"{"screen_name":"bob","protected":false}"#,
        );
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.json::<Settings>().unwrap(),
            Settings {
                screen_name: "bob".to_string(),
                protected: false,
            }
        );
        assert!(response.into_text().starts_with('{'));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let response = HttpResponse::new(StatusCode::OK, "oauth_token=abc");
        assert!(matches!(
            response.json::<Settings>(),
            Err(crate::Error::Json(_))
        ));
    }
}
