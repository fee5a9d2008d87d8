use crate::{
    entity::{media, ByteStream, Entity},
    errors::RequestError,
};
use bytes::Bytes;
use quick_xml::{events::Event, Reader};
use std::{fmt, str::FromStr};

/// Well-formed XML document text.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct XmlDocument(String);

impl XmlDocument {
    /// Checks that `text` is a well-formed document with exactly one root
    /// element.
    pub fn parse(text: impl Into<String>) -> Result<Self, RequestError> {
        let text = text.into();
        let mut reader = Reader::from_str(&text);
        let mut depth = 0usize;
        let mut roots = 0usize;

        loop {
            match reader.read_event() {
                Ok(Event::Start(_)) => {
                    if depth == 0 {
                        roots += 1;
                    }
                    depth += 1;
                }
                Ok(Event::End(_)) => depth = depth.saturating_sub(1),
                Ok(Event::Empty(_)) if depth == 0 => roots += 1,
                Ok(Event::Text(t)) if depth == 0 => {
                    if !t.iter().all(u8::is_ascii_whitespace) {
                        return Err(xml_error("text outside of the root element"));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => (),
                Err(e) => {
                    return Err(xml_error(format!(
                        "at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
            }
        }

        if depth != 0 {
            return Err(xml_error("unclosed element"));
        }
        if roots != 1 {
            return Err(xml_error(format!("expected one root element, found {}", roots)));
        }
        Ok(Self(text))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

fn xml_error(reason: impl fmt::Display) -> RequestError {
    RequestError::PayloadDecoding(format!("invalid xml: {}", reason))
}

impl FromStr for XmlDocument {
    type Err = RequestError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for XmlDocument {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of payload a materializing read should produce.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PayloadKind {
    Text,
    Xml,
    Json,
    Binary,
}

/// Closed set of payload shapes accepted by `set_payload`.
#[non_exhaustive]
pub enum Payload {
    Text(String),
    Xml(XmlDocument),
    Json(serde_json::Value),
    Bytes(Bytes),
    Stream(ByteStream),
    Parts(Vec<Entity>),
}

impl Payload {
    /// Content type used when the caller does not override it.
    pub fn default_content_type(&self) -> &'static str {
        match self {
            Self::Text(_) => media::TEXT_PLAIN,
            Self::Xml(_) => media::APPLICATION_XML,
            Self::Json(_) => media::APPLICATION_JSON,
            Self::Bytes(_) | Self::Stream(_) => media::APPLICATION_OCTET_STREAM,
            Self::Parts(_) => media::MULTIPART_FORM_DATA,
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(t) => f.debug_tuple("Text").field(t).finish(),
            Self::Xml(x) => f.debug_tuple("Xml").field(x).finish(),
            Self::Json(j) => f.debug_tuple("Json").field(j).finish(),
            Self::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
            Self::Stream(_) => f.write_str("Stream"),
            Self::Parts(p) => f.debug_tuple("Parts").field(p).finish(),
        }
    }
}

impl From<String> for Payload {
    #[inline]
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Payload {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<XmlDocument> for Payload {
    #[inline]
    fn from(x: XmlDocument) -> Self {
        Self::Xml(x)
    }
}

impl From<serde_json::Value> for Payload {
    #[inline]
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl From<Bytes> for Payload {
    #[inline]
    fn from(b: Bytes) -> Self {
        Self::Bytes(b)
    }
}

impl From<Vec<u8>> for Payload {
    #[inline]
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v.into())
    }
}

impl From<ByteStream> for Payload {
    #[inline]
    fn from(s: ByteStream) -> Self {
        Self::Stream(s)
    }
}

impl From<Vec<Entity>> for Payload {
    #[inline]
    fn from(parts: Vec<Entity>) -> Self {
        Self::Parts(parts)
    }
}
