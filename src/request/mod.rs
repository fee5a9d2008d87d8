//! Inbound request message.
//!
//! A [`Request`] is built once per request by the transport, handed to the
//! service by value and dropped when handling ends. It exclusively owns one
//! [`Entity`]; payload decoding is delegated to it.
//!
//! A `Request` is meant for a single task and does no internal locking.

mod params;

use crate::{
    cache_control::CacheControl,
    common::{Id, MutualTls, RequestHead, REQ_ID},
    entity::{Body, ByteStream, Entity, Payload, PayloadKind, XmlDocument},
    errors::RequestError,
};
use bytes::Bytes;
use http::{Method, Uri, Version};
use serde::de::DeserializeOwned;
use tracing::trace;

const CACHE_CONTROL: &str = "Cache-Control";
const EXPECT: &str = "Expect";
const USER_AGENT: &str = "User-Agent";

#[derive(Debug)]
pub struct Request {
    id: Id,
    raw_path: String,
    uri: Uri,
    method: Method,
    version: Version,
    user_agent: String,
    extra_path_info: String,
    mutual_tls: MutualTls,
    cache_control: Option<CacheControl>,
    entity: Entity,
    has_body: bool,
}

impl Request {
    pub fn new(head: RequestHead, body: Body) -> Self {
        let user_agent = head.headers.get(USER_AGENT).unwrap_or_default().to_owned();
        let has_body = !body.is_empty();
        let id = REQ_ID.next();
        trace!(id = %id, method = %head.method, target = %head.target, "new request");
        Self {
            id,
            raw_path: head.target,
            uri: head.uri,
            method: head.method,
            version: head.version,
            user_agent,
            extra_path_info: String::new(),
            mutual_tls: MutualTls::default(),
            cache_control: None,
            entity: Entity::with_parts(head.headers, body),
            has_body,
        }
    }

    #[inline]
    pub fn with_mutual_tls(mut self, mutual_tls: MutualTls) -> Self {
        self.mutual_tls = mutual_tls;
        self
    }

    #[inline]
    pub fn with_extra_path_info(mut self, info: impl Into<String>) -> Self {
        self.extra_path_info = info.into();
        self
    }

    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Request-target as received, query included.
    #[inline]
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    #[inline]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    #[inline]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Protocol version number, e.g. `"1.1"`.
    pub fn http_version(&self) -> &'static str {
        match self.version {
            Version::HTTP_09 => "0.9",
            Version::HTTP_10 => "1.0",
            Version::HTTP_2 => "2",
            Version::HTTP_3 => "3",
            _ => "1.1",
        }
    }

    #[inline]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[inline]
    pub fn extra_path_info(&self) -> &str {
        &self.extra_path_info
    }

    #[inline]
    pub fn mutual_tls(&self) -> &MutualTls {
        &self.mutual_tls
    }

    /// Whether a body was ever attached, read or not.
    #[inline]
    pub fn has_body(&self) -> bool {
        self.has_body
    }

    // --- entity --------------------------------------------------------------

    #[inline]
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    #[inline]
    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    /// Replaces the owned entity; the previous one is dropped.
    pub fn set_entity(&mut self, entity: Entity) {
        self.has_body = self.has_body || !entity.body().is_empty();
        self.entity = entity;
    }

    #[inline]
    pub fn into_entity(self) -> Entity {
        self.entity
    }

    // --- headers -------------------------------------------------------------

    #[inline]
    pub fn has_header(&self, name: &str) -> bool {
        self.entity.has_header(name)
    }

    /// First value of `name`.
    #[inline]
    pub fn header(&self, name: &str) -> Result<&str, RequestError> {
        self.entity.header(name)
    }

    #[inline]
    pub fn header_values(&self, name: &str) -> Result<Vec<&str>, RequestError> {
        self.entity.header_values(name)
    }

    #[inline]
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entity.set_header(name, value);
    }

    #[inline]
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entity.add_header(name, value);
    }

    #[inline]
    pub fn remove_header(&mut self, name: &str) {
        self.entity.remove_header(name);
    }

    #[inline]
    pub fn remove_all_headers(&mut self) {
        self.entity.remove_all_headers();
    }

    #[inline]
    pub fn header_names(&self) -> Vec<&str> {
        self.entity.header_names()
    }

    #[inline]
    pub fn content_type(&self) -> Option<&str> {
        self.entity.content_type()
    }

    #[inline]
    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.entity.set_content_type(content_type);
    }

    /// True iff an `Expect` header carries exactly `100-continue`.
    pub fn expects_100_continue(&self) -> bool {
        self.entity.headers().get(EXPECT) == Some("100-continue")
    }

    /// Directives of the first `Cache-Control` header, parsed on first call.
    ///
    /// The result is kept for the life of the request: changing the header
    /// afterwards does not change what this returns. `None` when the request
    /// carried no `Cache-Control` header at the time of the first call.
    pub fn cache_control(&mut self) -> Option<&CacheControl> {
        if self.cache_control.is_none() {
            if let Some(value) = self.entity.headers().get(CACHE_CONTROL) {
                self.cache_control = Some(CacheControl::parse(value));
            }
        }
        self.cache_control.as_ref()
    }

    // --- payload getters -----------------------------------------------------

    #[inline]
    pub async fn payload(&mut self, kind: PayloadKind) -> Result<Payload, RequestError> {
        self.entity.decode(kind).await
    }

    #[inline]
    pub async fn json_payload(&mut self) -> Result<serde_json::Value, RequestError> {
        self.entity.json_body().await
    }

    pub async fn json_payload_as<T: DeserializeOwned>(&mut self) -> Result<T, RequestError> {
        let value = self.entity.json_body().await?;
        serde_json::from_value(value)
            .map_err(|e| RequestError::PayloadDecoding(format!("invalid json: {}", e)))
    }

    #[inline]
    pub async fn xml_payload(&mut self) -> Result<XmlDocument, RequestError> {
        self.entity.xml_body().await
    }

    #[inline]
    pub async fn text_payload(&mut self) -> Result<String, RequestError> {
        self.entity.text_body().await
    }

    #[inline]
    pub async fn binary_payload(&mut self) -> Result<Bytes, RequestError> {
        self.entity.binary_body().await
    }

    #[inline]
    pub fn byte_stream(&mut self) -> Result<ByteStream, RequestError> {
        self.entity.byte_stream()
    }

    #[inline]
    pub fn body_parts(&mut self) -> Result<&mut [Entity], RequestError> {
        self.entity.body_parts()
    }

    // --- payload setters -----------------------------------------------------

    pub fn set_json_payload(&mut self, value: serde_json::Value, content_type: Option<&str>) {
        self.set_payload_inner(Payload::Json(value), content_type);
    }

    pub fn set_xml_payload(&mut self, doc: XmlDocument, content_type: Option<&str>) {
        self.set_payload_inner(Payload::Xml(doc), content_type);
    }

    pub fn set_text_payload(&mut self, text: impl Into<String>, content_type: Option<&str>) {
        self.set_payload_inner(Payload::Text(text.into()), content_type);
    }

    pub fn set_binary_payload(&mut self, bytes: impl Into<Bytes>, content_type: Option<&str>) {
        self.set_payload_inner(Payload::Bytes(bytes.into()), content_type);
    }

    pub fn set_byte_stream_payload(&mut self, stream: ByteStream, content_type: Option<&str>) {
        self.set_payload_inner(Payload::Stream(stream), content_type);
    }

    pub fn set_body_parts(&mut self, parts: Vec<Entity>, content_type: Option<&str>) {
        self.set_payload_inner(Payload::Parts(parts), content_type);
    }

    /// Sets the body from any [`Payload`] shape.
    pub fn set_payload(&mut self, payload: impl Into<Payload>, content_type: Option<&str>) {
        match payload.into() {
            Payload::Text(t) => self.set_text_payload(t, content_type),
            Payload::Xml(x) => self.set_xml_payload(x, content_type),
            Payload::Json(j) => self.set_json_payload(j, content_type),
            Payload::Bytes(b) => self.set_binary_payload(b, content_type),
            Payload::Stream(s) => self.set_byte_stream_payload(s, content_type),
            Payload::Parts(p) => self.set_body_parts(p, content_type),
        }
    }

    fn set_payload_inner(&mut self, payload: Payload, content_type: Option<&str>) {
        self.entity.set_payload(payload, content_type);
        self.has_body = true;
    }
}
