use crate::entity::Entity;
use bytes::Bytes;
use std::{fmt, pin::Pin};
use tokio::io::AsyncRead;

/// Readable body handed over by the transport.
///
/// Reads suspend until the transport has bytes; a client disconnect or
/// timeout surfaces as an error on the next read.
pub type ByteStream = Pin<Box<dyn AsyncRead + Send + 'static>>;

/// Body source owned by an [`Entity`].
#[derive(Default)]
pub enum Body {
    #[default]
    Empty,
    /// Fully materialized bytes, readable any number of times.
    Bytes(Bytes),
    /// Streaming body, readable once.
    Stream(ByteStream),
    /// Sub-entities of a multipart body.
    Parts(Vec<Entity>),
    /// A stream that has been handed out or drained.
    Consumed,
}

impl Body {
    #[inline]
    pub fn stream<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        Self::Stream(Box::pin(reader))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[inline]
    pub fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }

    #[inline]
    pub fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Self::Stream(_) => f.write_str("Stream"),
            Self::Parts(p) => f.debug_tuple("Parts").field(p).finish(),
            Self::Consumed => f.write_str("Consumed"),
        }
    }
}

impl From<Bytes> for Body {
    #[inline]
    fn from(b: Bytes) -> Self {
        Self::Bytes(b)
    }
}

impl From<Vec<u8>> for Body {
    #[inline]
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v.into())
    }
}

impl From<Vec<Entity>> for Body {
    #[inline]
    fn from(parts: Vec<Entity>) -> Self {
        Self::Parts(parts)
    }
}
