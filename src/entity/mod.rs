//! MIME-style container of header fields and a body.
//!
//! An [`Entity`] owns its [`HeaderTable`] and its [`Body`]. Payload decoding
//! lives here; a [`Request`](crate::request::Request) only dispatches to it.

mod body;
pub mod media;
mod payload;

pub use body::*;
pub use payload::*;

use crate::{errors::RequestError, header::HeaderTable};
use bytes::Bytes;
use std::{io::Cursor, mem};
use tokio::io::AsyncReadExt;
use tracing::{trace, warn};

const CONTENT_TYPE: &str = "Content-Type";

#[derive(Debug, Default)]
pub struct Entity {
    headers: HeaderTable,
    body: Body,
}

impl Entity {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_parts(headers: HeaderTable, body: Body) -> Self {
        Self { headers, body }
    }

    /// Builds a sub-entity carrying `payload` with its content type.
    pub fn from_payload(payload: Payload, content_type: Option<&str>) -> Self {
        let mut e = Self::new();
        e.set_payload(payload, content_type);
        e
    }

    #[inline]
    pub fn headers(&self) -> &HeaderTable {
        &self.headers
    }

    #[inline]
    pub fn headers_mut(&mut self) -> &mut HeaderTable {
        &mut self.headers
    }

    #[inline]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    pub fn header(&self, name: &str) -> Result<&str, RequestError> {
        self.headers
            .get(name)
            .ok_or_else(|| RequestError::HeaderNotFound(name.to_owned()))
    }

    pub fn header_values(&self, name: &str) -> Result<Vec<&str>, RequestError> {
        let values = self.headers.get_all(name);
        if values.is_empty() {
            return Err(RequestError::HeaderNotFound(name.to_owned()));
        }
        Ok(values)
    }

    #[inline]
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.set(name, value);
    }

    #[inline]
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.append(name, value);
    }

    #[inline]
    pub fn remove_header(&mut self, name: &str) {
        self.headers.remove(name);
    }

    #[inline]
    pub fn remove_all_headers(&mut self) {
        self.headers.clear();
    }

    #[inline]
    pub fn header_names(&self) -> Vec<&str> {
        self.headers.names()
    }

    #[inline]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE)
    }

    #[inline]
    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.headers.set(CONTENT_TYPE, content_type);
    }

    #[inline]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Replaces the body and the `Content-Type` header. Nothing of the
    /// previous body is kept.
    pub fn set_body(&mut self, body: Body, content_type: &str) {
        trace!(body = ?body, content_type, "replacing entity body");
        self.body = body;
        self.set_content_type(content_type);
    }

    pub fn set_payload(&mut self, payload: Payload, content_type: Option<&str>) {
        let ct = content_type.unwrap_or_else(|| payload.default_content_type());
        let body = match payload {
            Payload::Text(t) => Body::Bytes(t.into()),
            Payload::Xml(x) => Body::Bytes(x.into_string().into()),
            Payload::Json(j) => Body::Bytes(j.to_string().into()),
            Payload::Bytes(b) => Body::Bytes(b),
            Payload::Stream(s) => Body::Stream(s),
            Payload::Parts(p) => Body::Parts(p),
        };
        self.set_body(body, ct);
    }

    /// Materializes the body.
    ///
    /// A stream body is drained and left [`Body::Consumed`], even when the
    /// read fails part way.
    pub async fn body_bytes(&mut self) -> Result<Bytes, RequestError> {
        match &self.body {
            Body::Empty => return Ok(Bytes::new()),
            Body::Bytes(b) => return Ok(b.clone()),
            Body::Parts(_) => {
                return Err(RequestError::PayloadDecoding(
                    "multipart body cannot be read as a single payload".into(),
                ))
            }
            Body::Consumed => return Err(RequestError::EntityConsumed),
            Body::Stream(_) => (),
        }

        let mut stream = match mem::replace(&mut self.body, Body::Consumed) {
            Body::Stream(s) => s,
            _ => return Err(RequestError::EntityConsumed),
        };
        let mut buf = Vec::new();
        match stream.read_to_end(&mut buf).await {
            Ok(n) => {
                trace!(len = n, "drained body stream");
                Ok(buf.into())
            }
            Err(e) => {
                warn!(err = %e, "failed to read body stream");
                Err(RequestError::EntityConstruction(e))
            }
        }
    }

    pub async fn text_body(&mut self) -> Result<String, RequestError> {
        if let Some(cs) = self.content_type().and_then(media::charset) {
            if !cs.eq_ignore_ascii_case("utf-8") && !cs.eq_ignore_ascii_case("us-ascii") {
                return Err(RequestError::PayloadDecoding(format!(
                    "unsupported charset: {}",
                    cs
                )));
            }
        }
        let bytes = self.body_bytes().await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| RequestError::PayloadDecoding(format!("invalid utf-8: {}", e)))
    }

    pub async fn json_body(&mut self) -> Result<serde_json::Value, RequestError> {
        let bytes = self.body_bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| RequestError::PayloadDecoding(format!("invalid json: {}", e)))
    }

    pub async fn xml_body(&mut self) -> Result<XmlDocument, RequestError> {
        XmlDocument::parse(self.text_body().await?)
    }

    #[inline]
    pub async fn binary_body(&mut self) -> Result<Bytes, RequestError> {
        self.body_bytes().await
    }

    /// Decodes the body as `kind`.
    pub async fn decode(&mut self, kind: PayloadKind) -> Result<Payload, RequestError> {
        Ok(match kind {
            PayloadKind::Text => Payload::Text(self.text_body().await?),
            PayloadKind::Xml => Payload::Xml(self.xml_body().await?),
            PayloadKind::Json => Payload::Json(self.json_body().await?),
            PayloadKind::Binary => Payload::Bytes(self.binary_body().await?),
        })
    }

    /// Hands out the body as a stream.
    ///
    /// A streaming body moves to the caller and the entity is left consumed.
    /// An in-memory body is wrapped in a fresh reader and stays readable.
    pub fn byte_stream(&mut self) -> Result<ByteStream, RequestError> {
        match mem::replace(&mut self.body, Body::Consumed) {
            Body::Stream(s) => Ok(s),
            Body::Consumed => Err(RequestError::EntityConsumed),
            Body::Empty => {
                self.body = Body::Empty;
                Ok(Box::pin(Cursor::new(Bytes::new())))
            }
            Body::Bytes(b) => {
                self.body = Body::Bytes(b.clone());
                Ok(Box::pin(Cursor::new(b)))
            }
            Body::Parts(p) => {
                self.body = Body::Parts(p);
                Err(RequestError::PayloadDecoding(
                    "multipart body cannot be streamed".into(),
                ))
            }
        }
    }

    /// Sub-entities of a multipart body.
    pub fn body_parts(&mut self) -> Result<&mut [Entity], RequestError> {
        match self.content_type() {
            Some(ct) if media::is_multipart(ct) => (),
            Some(ct) => {
                return Err(RequestError::PayloadDecoding(format!(
                    "content type is not multipart: {}",
                    ct
                )))
            }
            None => {
                return Err(RequestError::PayloadDecoding(
                    "no content type declared for multipart body".into(),
                ))
            }
        }
        match &mut self.body {
            Body::Parts(p) => Ok(p.as_mut_slice()),
            Body::Consumed => Err(RequestError::EntityConsumed),
            other => Err(RequestError::PayloadDecoding(format!(
                "body is not split into parts: {:?}",
                other
            ))),
        }
    }
}
