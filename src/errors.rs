use std::{fmt, io};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone)]
#[error("bad mutual TLS status")]
#[non_exhaustive]
pub struct BadMutualTlsStatusError;

/// Failures surfaced by [`Request`](crate::request::Request) and
/// [`Entity`](crate::entity::Entity) operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RequestError {
    #[error("failed to construct entity body: {0}")]
    EntityConstruction(#[source] io::Error),
    #[error("entity body already consumed")]
    EntityConsumed,
    #[error("header not found: {0}")]
    HeaderNotFound(String),
    #[error("'Content-Type' header not found")]
    MissingContentType,
    #[error("invalid content type: {0}")]
    InvalidContentType(String),
    #[error("failed to decode payload: {0}")]
    PayloadDecoding(String),
}

impl RequestError {
    #[inline]
    pub fn is_entity_consumed(&self) -> bool {
        matches!(self, Self::EntityConsumed)
    }

    #[inline]
    pub fn is_header_not_found(&self) -> bool {
        matches!(self, Self::HeaderNotFound(_))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecoderError {
    #[error("bad format: {0}")]
    BadFormat(String),
    #[error("bad method: {0}")]
    BadMethod(String),
    #[error("bad uri: {0}")]
    BadUri(String),
    #[error("bad version: {0}")]
    BadVersion(String),
    #[error("bad header value for '{0}'")]
    BadHeaderValue(String),
    #[error("bad 'Content-Length' header")]
    BadContentLength,
    #[error("unsupported 'Transfer-Encoding': {0}")]
    UnsupportedTransferEncoding(String),
}

/// A request head that breaks a listener limit. Answered by the transport;
/// never surfaced from a [`Request`](crate::request::Request).
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LimitViolation {
    #[error("request-target of {len} bytes exceeds limit of {limit}")]
    UriTooLong { len: usize, limit: usize },
    #[error("header block of {len} bytes exceeds limit of {limit}")]
    HeaderTooLarge { len: usize, limit: usize },
}

#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("limit '{0}' must be greater than zero")]
    ZeroLimit(&'static str),
}

#[derive(Debug, Error)]
pub(crate) enum ConnectionError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("fmt error: {0}")]
    Fmt(#[from] fmt::Error),
    #[error(transparent)]
    Decoder(#[from] DecoderError),
    #[error(transparent)]
    Limit(#[from] LimitViolation),
}
