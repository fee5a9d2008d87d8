use crate::{errors::DecoderError, header::HeaderTable};
use http::{Method, Uri, Version};
use std::str::FromStr;

/// Decoded request line and header fields, as handed over by the transport.
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub method: Method,
    /// Request-target exactly as received.
    pub target: String,
    pub uri: Uri,
    pub version: Version,
    pub headers: HeaderTable,
}

impl RequestHead {
    pub fn new(method: Method, target: &str) -> Result<Self, DecoderError> {
        let uri = Uri::from_str(target).map_err(|e| DecoderError::BadUri(e.to_string()))?;
        Ok(Self {
            method,
            target: target.to_owned(),
            uri,
            version: Version::HTTP_11,
            headers: HeaderTable::new(),
        })
    }

    #[inline]
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    #[inline]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let h = RequestHead::new(Method::GET, "/a/b?x=1")
            .unwrap()
            .with_header("Host", "example.com");
        assert_eq!(h.uri.path(), "/a/b");
        assert_eq!(h.uri.query(), Some("x=1"));
        assert_eq!(h.target, "/a/b?x=1");
        assert_eq!(h.version, Version::HTTP_11);
        assert_eq!(h.headers.get("host"), Some("example.com"));

        assert!(matches!(
            RequestHead::new(Method::GET, "/a b"),
            Err(DecoderError::BadUri(_))
        ));
    }
}
