//! Per-listener limits on the request head.
//!
//! The connection runs [`scan_head`] over the raw bytes received so far,
//! before the head is decoded. A violation is answered with its
//! [`status`](LimitViolation::status) and no [`Request`](crate::request::Request)
//! is ever built for it. Requests at or below the limits are unaffected.

use crate::errors::LimitViolation;
use http::StatusCode;
use tracing::{debug, trace};

pub const DEFAULT_MAX_URI_LENGTH: usize = 4096;
pub const DEFAULT_MAX_HEADER_SIZE: usize = 8192;

/// Bytes a request line may carry besides its request-target: method,
/// version and separators.
const REQUEST_LINE_OVERHEAD: usize = 64;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Limits {
    /// Bytes allowed in the request-target (path and query).
    pub max_uri_length: usize,
    /// Bytes allowed in the header block, counting each header line without
    /// its line terminator.
    pub max_header_size: usize,
}

impl Default for Limits {
    #[inline]
    fn default() -> Self {
        Self {
            max_uri_length: DEFAULT_MAX_URI_LENGTH,
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
        }
    }
}

impl LimitViolation {
    #[inline]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UriTooLong { .. } => StatusCode::URI_TOO_LONG,
            Self::HeaderTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum HeadStatus {
    Partial,
    /// Length of the head including the empty line that ends it.
    Complete(usize),
}

#[inline]
fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[inline]
fn find_lf(buf: &[u8], from: usize) -> Option<usize> {
    buf[from..].iter().position(|b| *b == b'\n').map(|i| from + i)
}

fn target_len(line: &[u8]) -> Option<usize> {
    let start = line.iter().position(|b| *b == b' ')? + 1;
    let rest = &line[start..];
    Some(rest.iter().position(|b| *b == b' ').unwrap_or(rest.len()))
}

/// Checks the head bytes received so far against `limits`.
///
/// Returns as soon as a limit is exceeded, even if the head is incomplete.
/// Empty lines ahead of the request line count toward `max_header_size`.
pub fn scan_head(buf: &[u8], limits: &Limits) -> Result<HeadStatus, LimitViolation> {
    let mut pos = 0;
    loop {
        if buf[pos..].starts_with(b"\r\n") {
            pos += 2;
        } else if buf[pos..].starts_with(b"\n") {
            pos += 1;
        } else {
            break;
        }
    }
    let mut header_len = pos;
    if header_len > limits.max_header_size {
        debug!(len = header_len, "too many empty lines before request line");
        return Err(LimitViolation::HeaderTooLarge {
            len: header_len,
            limit: limits.max_header_size,
        });
    }

    let line_end = find_lf(buf, pos);
    let line = strip_cr(&buf[pos..line_end.unwrap_or(buf.len())]);
    let uri_len = match (target_len(line), line_end) {
        (Some(len), _) => len,
        // a complete line without any space is all target
        (None, Some(_)) => line.len(),
        // method still arriving
        (None, None) => 0,
    };
    if uri_len > limits.max_uri_length {
        debug!(len = uri_len, limit = limits.max_uri_length, "request-target too long");
        return Err(LimitViolation::UriTooLong {
            len: uri_len,
            limit: limits.max_uri_length,
        });
    }
    if line.len() > limits.max_uri_length + REQUEST_LINE_OVERHEAD {
        debug!(len = line.len(), "request line too long");
        return Err(LimitViolation::UriTooLong {
            len: line.len(),
            limit: limits.max_uri_length,
        });
    }
    pos = match line_end {
        Some(end) => end + 1,
        None => return Ok(HeadStatus::Partial),
    };

    loop {
        let line_end = find_lf(buf, pos);
        let line = strip_cr(&buf[pos..line_end.unwrap_or(buf.len())]);
        if let (Some(end), true) = (line_end, line.is_empty()) {
            trace!(header_len, "request head complete");
            return Ok(HeadStatus::Complete(end + 1));
        }
        header_len += line.len();
        if header_len > limits.max_header_size {
            debug!(
                len = header_len,
                limit = limits.max_header_size,
                "header block too large"
            );
            return Err(LimitViolation::HeaderTooLarge {
                len: header_len,
                limit: limits.max_header_size,
            });
        }
        match line_end {
            Some(end) => pos = end + 1,
            None => return Ok(HeadStatus::Partial),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn limits(max_uri_length: usize, max_header_size: usize) -> Limits {
        Limits {
            max_uri_length,
            max_header_size,
        }
    }

    #[test]
    fn test_uri_boundary() {
        let l = limits(2, 1024);
        let ok = b"GET /a HTTP/1.1\r\nHost: x\r\n\r\n";
        assert_eq!(scan_head(ok, &l), Ok(HeadStatus::Complete(ok.len())));

        let bad = b"GET /ab HTTP/1.1\r\nHost: x\r\n\r\n";
        let err = scan_head(bad, &l).unwrap_err();
        assert_eq!(err, LimitViolation::UriTooLong { len: 3, limit: 2 });
        assert_eq!(err.status(), StatusCode::URI_TOO_LONG);
    }

    #[test]
    fn test_header_boundary() {
        // "X-Test: " is 8 bytes, so a 22 byte value fills 30 bytes exactly
        let l = limits(1024, 30);
        let value = "a".repeat(22);
        let ok = format!("GET / HTTP/1.1\r\nX-Test: {}\r\n\r\n", value);
        assert_eq!(
            scan_head(ok.as_bytes(), &l),
            Ok(HeadStatus::Complete(ok.len()))
        );

        let over = format!("GET / HTTP/1.1\r\nX-Test: {}a\r\n\r\n", value);
        let err = scan_head(over.as_bytes(), &l).unwrap_err();
        assert_eq!(err, LimitViolation::HeaderTooLarge { len: 31, limit: 30 });
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_header_size_sums_lines() {
        let l = limits(1024, 10);
        let ok = b"GET / HTTP/1.1\r\nA: 1\r\nBB: 2\r\n\r\n";
        assert!(matches!(scan_head(ok, &l), Ok(HeadStatus::Complete(_))));
        let bad = b"GET / HTTP/1.1\r\nA: 1\r\nBB: 2\r\nC: 3\r\n\r\n";
        assert!(matches!(
            scan_head(bad, &l),
            Err(LimitViolation::HeaderTooLarge { len: 13, .. })
        ));
    }

    #[test]
    #[traced_test]
    fn test_partial_heads() {
        let l = Limits::default();
        let partial: Vec<&[u8]> = vec![
            b"",
            b"GE",
            b"GET /path",
            b"GET /path HTTP/1.1\r",
            b"GET /path HTTP/1.1\r\n",
            b"GET /path HTTP/1.1\r\nHost: x",
            b"GET /path HTTP/1.1\r\nHost: x\r\n",
            b"GET /path HTTP/1.1\r\nHost: x\r\n\r",
        ];
        for p in &partial {
            assert_eq!(scan_head(p, &l), Ok(HeadStatus::Partial), "{:?}", p);
        }
    }

    #[test]
    fn test_early_rejection() {
        let l = limits(8, 16);
        // no line terminator seen yet
        assert!(matches!(
            scan_head(b"GET /0123456789", &l),
            Err(LimitViolation::UriTooLong { len: 11, .. })
        ));
        assert!(matches!(
            scan_head(b"GET / HTTP/1.1\r\nX-Long: 0123456789", &l),
            Err(LimitViolation::HeaderTooLarge { len: 18, .. })
        ));
        // a complete line with no space at all counts as a target
        assert!(matches!(
            scan_head(b"GARBAGEGARBAGE\r\n", &l),
            Err(LimitViolation::UriTooLong { len: 14, .. })
        ));
        // an unterminated line is bounded even before its first space
        let garbage = "G".repeat(8 + REQUEST_LINE_OVERHEAD + 1);
        assert!(matches!(
            scan_head(garbage.as_bytes(), &l),
            Err(LimitViolation::UriTooLong { len: 73, limit: 8 })
        ));
        // ...and after its target
        let endless = format!("GET / HTTP/1.1{}", "1".repeat(REQUEST_LINE_OVERHEAD));
        assert!(matches!(
            scan_head(endless.as_bytes(), &l),
            Err(LimitViolation::UriTooLong { .. })
        ));
    }

    #[test]
    fn test_split_request_line_within_limit() {
        let l = limits(2, 30);
        let full = b"GET /a HTTP/1.0\r\n\r\n";
        for n in 0..full.len() {
            assert_eq!(
                scan_head(&full[..n], &l),
                Ok(HeadStatus::Partial),
                "{:?}",
                &full[..n]
            );
        }
        assert_eq!(scan_head(full, &l), Ok(HeadStatus::Complete(full.len())));
    }

    #[test]
    fn test_leading_empty_lines_bounded() {
        let l = limits(2, 30);
        let ok = format!("{}GET /a HTTP/1.0\r\n\r\n", "\r\n".repeat(15));
        assert_eq!(
            scan_head(ok.as_bytes(), &l),
            Ok(HeadStatus::Complete(ok.len()))
        );

        let flood = "\r\n".repeat(1024);
        assert_eq!(
            scan_head(flood.as_bytes(), &l),
            Err(LimitViolation::HeaderTooLarge { len: 2048, limit: 30 })
        );
    }

    #[test]
    fn test_leading_empty_lines_and_bare_lf() {
        let l = Limits::default();
        let buf = b"\r\n\r\nGET / HTTP/1.1\nHost: x\n\nbody";
        assert_eq!(scan_head(buf, &l), Ok(HeadStatus::Complete(buf.len() - 4)));
    }

    #[test]
    fn test_body_bytes_not_counted() {
        let l = limits(1024, 7);
        let head = b"POST / HTTP/1.1\r\nHost: x\r\n\r\n";
        let mut buf = head.to_vec();
        buf.extend_from_slice(b"lots of body bytes here");
        assert_eq!(scan_head(&buf, &l), Ok(HeadStatus::Complete(head.len())));
    }
}
