use mime::Mime;

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_XML: &str = "application/xml";
pub const TEXT_PLAIN: &str = "text/plain";
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";
pub const APPLICATION_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

#[inline]
pub(crate) fn parse(content_type: &str) -> Option<Mime> {
    content_type.trim().parse::<Mime>().ok()
}

/// True when the `type/subtype` of `content_type` equals `expected`,
/// ignoring case and parameters.
pub(crate) fn essence_is(content_type: &str, expected: &str) -> bool {
    match parse(content_type) {
        Some(m) => m.essence_str().eq_ignore_ascii_case(expected),
        None => false,
    }
}

pub(crate) fn is_multipart(content_type: &str) -> bool {
    matches!(parse(content_type), Some(m) if m.type_() == mime::MULTIPART)
}

/// The `charset` parameter, if any.
pub(crate) fn charset(content_type: &str) -> Option<String> {
    parse(content_type)
        .and_then(|m| m.get_param(mime::CHARSET).map(|c| c.as_str().to_owned()))
}
