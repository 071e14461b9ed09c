//! Request decorators applied to every outbound chat request.

use reqwest::RequestBuilder;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

/// Adds something to an outgoing request before it is sent.
pub trait RequestDecorator: Send + Sync {
    fn decorate(&self, request: RequestBuilder) -> RequestBuilder;
}

/// `Authorization: Bearer <token>`.
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl RequestDecorator for BearerAuth {
    fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }
}

/// `Content-Type: application/json`, replacing any value already set.
pub struct JsonContentType;

impl RequestDecorator for JsonContentType {
    fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        request.headers(headers)
    }
}

/// Apply decorators in order.
pub fn apply_all(decorators: &[Box<dyn RequestDecorator>], request: RequestBuilder) -> RequestBuilder {
    decorators
        .iter()
        .fold(request, |request, decorator| decorator.decorate(request))
}
