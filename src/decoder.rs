use crate::{common::RequestHead, errors::DecoderError, header::HeaderTable};
use http::{Method, Version};
use tracing::{instrument, trace};

const INLINE_HEADERS: usize = 128;

/// Decodes a complete request head.
///
/// Returns `Ok(None)` while `bytes` holds only part of the head. The number
/// of header fields is bounded only by the bytes given.
#[instrument(err, skip(bytes), fields(len = bytes.len()))]
pub fn decode_request_head(
    bytes: &[u8],
) -> Result<Option<(usize, RequestHead)>, DecoderError> {
    // every field ends with a LF
    let max_fields = bytes.iter().filter(|b| **b == b'\n').count();
    if max_fields > INLINE_HEADERS {
        trace!(max_fields, "header slots on the heap");
        let mut headers = vec![httparse::EMPTY_HEADER; max_fields];
        parse_head(bytes, &mut headers)
    } else {
        let mut headers = [httparse::EMPTY_HEADER; INLINE_HEADERS];
        parse_head(bytes, &mut headers)
    }
}

fn parse_head<'b>(
    bytes: &'b [u8],
    headers: &mut [httparse::Header<'b>],
) -> Result<Option<(usize, RequestHead)>, DecoderError> {
    let mut req = httparse::Request::new(headers);

    let parsed_len = match req.parse(bytes) {
        Ok(httparse::Status::Complete(parsed_len)) => {
            trace!("complete({})", parsed_len);
            parsed_len
        }
        Ok(httparse::Status::Partial) => {
            trace!("partial");
            return Ok(None);
        }
        Err(err) => {
            return Err(match err {
                // if invalid Token, try to determine if for method or path
                httparse::Error::Token => {
                    if req.method.is_none() {
                        DecoderError::BadMethod("invalid method token".into())
                    } else {
                        DecoderError::BadUri("invalid URI token".into())
                    }
                }
                httparse::Error::Version => DecoderError::BadVersion("invalid version".into()),
                other => DecoderError::BadFormat(other.to_string()),
            });
        }
    };

    let method = req
        .method
        .ok_or_else(|| DecoderError::BadMethod("missing method".into()))?;
    let method = Method::from_bytes(method.as_bytes())
        .map_err(|e| DecoderError::BadMethod(format!("failed to parse http method: {}", e)))?;
    let version = match req.version {
        Some(0) => Version::HTTP_10,
        Some(1) => Version::HTTP_11,
        v => return Err(DecoderError::BadVersion(format!("bad http version: {:?}", v))),
    };
    let target = req
        .path
        .ok_or_else(|| DecoderError::BadUri("missing request-target".into()))?;

    let mut head = RequestHead::new(method, target)?.with_version(version);
    head.headers = decode_headers(req.headers)?;

    Ok(Some((parsed_len, head)))
}

fn decode_headers(raw: &[httparse::Header<'_>]) -> Result<HeaderTable, DecoderError> {
    let mut table = HeaderTable::with_capacity(raw.len());
    for hdr in raw {
        let value = std::str::from_utf8(hdr.value)
            .map_err(|_| DecoderError::BadHeaderValue(hdr.name.to_owned()))?;
        table.append(hdr.name, value);
    }
    Ok(table)
}

/// Declared body length. Bodies framed by `Transfer-Encoding` are not
/// supported.
pub fn decode_content_length(headers: &HeaderTable) -> Result<Option<usize>, DecoderError> {
    if let Some(te) = headers.get("Transfer-Encoding") {
        return Err(DecoderError::UnsupportedTransferEncoding(te.to_owned()));
    }

    let mut len = None;
    for value in headers.get_all("Content-Length") {
        for part in value.split(',') {
            let n = part
                .trim()
                .parse::<usize>()
                .map_err(|_| DecoderError::BadContentLength)?;
            match len {
                Some(prev) if prev != n => {
                    trace!(prev, n, "conflicting 'Content-Length' values");
                    return Err(DecoderError::BadContentLength);
                }
                _ => len = Some(n),
            }
        }
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_decode_request_head() {
        let buf = b"GET /path?key=val HTTP/1.0\r\n\
            Host: my.http.server\r\n\
            Date: Wed, 21 Oct 2015 07:28:00 GMT\r\n\
            \r\nbody";

        let (off, head) = decode_request_head(buf).unwrap().unwrap();
        assert_eq!(off, buf.len() - 4);
        assert_eq!(head.method, Method::GET);
        assert_eq!(head.target, "/path?key=val");
        assert_eq!(head.uri.path(), "/path");
        assert_eq!(head.version, Version::HTTP_10);
        assert_eq!(head.headers.len(), 2);
        assert_eq!(head.headers.get("host"), Some("my.http.server"));
        assert_eq!(
            head.headers.get("Date"),
            Some("Wed, 21 Oct 2015 07:28:00 GMT")
        );
        assert_eq!(head.headers.names(), vec!["Host", "Date"]);
    }

    #[test]
    fn test_decode_request_head_partial() {
        let partial: Vec<&[u8]> = vec![
            b"",
            b"POST",
            b"POST /x HTTP/1.1\r\n",
            b"POST /x HTTP/1.1\r\nHost: a\r\n",
        ];
        for p in &partial {
            assert_eq!(decode_request_head(p).unwrap().map(|r| r.0), None);
        }
    }

    #[test]
    fn test_decode_request_head_many_fields() {
        let mut buf = String::from("GET / HTTP/1.1\r\n");
        for i in 0..200 {
            buf.push_str(&format!("X-{}: {}\r\n", i, i));
        }
        buf.push_str("\r\n");

        let (off, head) = decode_request_head(buf.as_bytes()).unwrap().unwrap();
        assert_eq!(off, buf.len());
        assert_eq!(head.headers.len(), 200);
        assert_eq!(head.headers.get("x-199"), Some("199"));
    }

    #[test]
    #[traced_test]
    fn test_decode_request_head_errors() {
        assert!(matches!(
            decode_request_head(b"G(T / HTTP/1.1\r\n\r\n"),
            Err(DecoderError::BadMethod(_))
        ));
        assert!(matches!(
            decode_request_head(b"GET / HTTP/2.0\r\n\r\n"),
            Err(DecoderError::BadVersion(_))
        ));
        assert!(matches!(
            decode_request_head(b"GET / HTTP/1.1\r\nBad Header: x\r\n\r\n"),
            Err(DecoderError::BadFormat(_))
        ));
    }

    #[test]
    fn test_decode_content_length() {
        let expectations: Vec<(Vec<(&str, &str)>, Result<Option<usize>, DecoderError>)> = vec![
            (vec![], Ok(None)),
            (vec![("Content-Length", "0")], Ok(Some(0))),
            (vec![("content-length", " 42 ")], Ok(Some(42))),
            (vec![("Content-Length", "5, 5")], Ok(Some(5))),
            (
                vec![("Content-Length", "5"), ("Content-Length", "5")],
                Ok(Some(5)),
            ),
            (
                vec![("Content-Length", "5"), ("Content-Length", "6")],
                Err(DecoderError::BadContentLength),
            ),
            (vec![("Content-Length", "-1")], Err(DecoderError::BadContentLength)),
            (vec![("Content-Length", "abc")], Err(DecoderError::BadContentLength)),
            (
                vec![("Transfer-Encoding", "chunked")],
                Err(DecoderError::UnsupportedTransferEncoding("chunked".into())),
            ),
        ];
        for (headers, expected) in expectations {
            let table: HeaderTable = headers.into_iter().collect();
            assert_eq!(decode_content_length(&table), expected);
        }
    }
}
