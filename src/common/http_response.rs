use crate::header::HeaderTable;
use bytes::Bytes;
use http::StatusCode;

/// Outgoing response produced by a service.
///
/// The connection adds `Content-Length` and `Server` when the service did not.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderTable,
    pub body: Bytes,
}

impl HttpResponse {
    #[inline]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status).with_body(body.into(), mime::TEXT_PLAIN_UTF_8.as_ref())
    }

    #[inline]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>, content_type: &str) -> Self {
        self.body = body.into();
        self.headers.set("Content-Type", content_type);
        self
    }
}
