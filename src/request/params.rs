use crate::{entity::media, errors::RequestError, request::Request};
use percent_encoding::percent_decode_str;
use std::{borrow::Cow, collections::HashMap};
use tracing::trace;

const COOKIE: &str = "Cookie";

fn decode_component(s: &str) -> Cow<'_, str> {
    percent_decode_str(s).decode_utf8_lossy()
}

impl Request {
    /// Query parameters, each name mapped to its values in order of
    /// appearance.
    pub fn query_params(&self) -> HashMap<String, Vec<String>> {
        let mut params: HashMap<String, Vec<String>> = HashMap::new();
        if let Some(query) = self.uri().query() {
            for (k, v) in form_urlencoded::parse(query.as_bytes()) {
                params.entry(k.into_owned()).or_default().push(v.into_owned());
            }
        }
        params
    }

    /// First value of query parameter `key`.
    pub fn query_param_value(&self, key: &str) -> Option<String> {
        let query = self.uri().query()?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Matrix parameters of the path segment ending at `path`.
    ///
    /// For `/a;x=1/b;y=2`, `matrix_params("/a")` yields `{x: 1}` and
    /// `matrix_params("/a/b")` yields `{y: 2}`. Unknown paths yield an empty map.
    pub fn matrix_params(&self, path: &str) -> HashMap<String, String> {
        let wanted = path.trim_end_matches('/');
        let mut current = String::new();

        for segment in self.uri().path().split('/').filter(|s| !s.is_empty()) {
            let mut pieces = segment.split(';');
            current.push('/');
            current.push_str(pieces.next().unwrap_or_default());
            if current != wanted {
                continue;
            }
            return pieces
                .filter_map(|p| p.split_once('='))
                .map(|(k, v)| {
                    (
                        decode_component(k).trim().to_owned(),
                        decode_component(v).trim().to_owned(),
                    )
                })
                .collect();
        }

        HashMap::new()
    }

    /// Parameters of an `application/x-www-form-urlencoded` body.
    ///
    /// The body is percent-decoded as a whole, then split on `&` and on the
    /// first `=` of each entry. Entries without `=` are skipped, names and
    /// values are trimmed and entries with an empty value are dropped.
    pub async fn form_params(&mut self) -> Result<HashMap<String, String>, RequestError> {
        match self.content_type() {
            None => return Err(RequestError::MissingContentType),
            Some(ct) if !media::essence_is(ct, media::APPLICATION_FORM_URLENCODED) => {
                return Err(RequestError::InvalidContentType(ct.to_owned()))
            }
            Some(_) => (),
        }

        let text = self.text_payload().await?;
        let plus_as_space = text.replace('+', " ");
        let decoded = percent_decode_str(&plus_as_space)
            .decode_utf8()
            .map_err(|e| RequestError::PayloadDecoding(format!("invalid form data: {}", e)))?;

        let mut params = HashMap::new();
        for entry in decoded.split('&') {
            let (name, value) = match entry.split_once('=') {
                Some(nv) => nv,
                None => {
                    trace!(entry, "skipping form entry without '='");
                    continue;
                }
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            params.insert(name.trim().to_owned(), value.to_owned());
        }
        Ok(params)
    }

    /// `(name, value)` pairs of every `Cookie` header, in order.
    pub fn cookies(&self) -> Vec<(String, String)> {
        self.entity()
            .headers()
            .get_all(COOKIE)
            .into_iter()
            .flat_map(|v| v.split(';'))
            .filter_map(|c| c.split_once('='))
            .map(|(n, v)| {
                let v = v.trim();
                let v = v
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(v);
                (n.trim().to_owned(), v.to_owned())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{entity::Body, errors::RequestError, request::tests::request};
    use std::collections::HashMap;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_query_params() {
        let req = request("/p?a=1&a=2&b=x", &[], Body::Empty);
        let params = req.query_params();
        assert_eq!(params.len(), 2);
        assert_eq!(params["a"], vec!["1", "2"]);
        assert_eq!(params["b"], vec!["x"]);
        assert_eq!(req.query_param_value("a").as_deref(), Some("1"));
        assert_eq!(req.query_param_value("c"), None);
    }

    #[test]
    fn test_query_params_decoding() {
        let req = request("/p?name=John%20Doe&q=a+b&flag", &[], Body::Empty);
        assert_eq!(req.query_param_value("name").as_deref(), Some("John Doe"));
        assert_eq!(req.query_param_value("q").as_deref(), Some("a b"));
        assert_eq!(req.query_param_value("flag").as_deref(), Some(""));

        let req = request("/p", &[], Body::Empty);
        assert!(req.query_params().is_empty());
        assert_eq!(req.query_param_value("a"), None);
    }

    #[test]
    fn test_matrix_params() {
        let req = request("/hello;a=4;b=5/world;x=%206/plain?q=1", &[], Body::Empty);
        assert_eq!(req.matrix_params("/hello"), map(&[("a", "4"), ("b", "5")]));
        assert_eq!(req.matrix_params("/hello/world/"), map(&[("x", "6")]));
        assert!(req.matrix_params("/hello/world/plain").is_empty());
        assert!(req.matrix_params("/nope").is_empty());
        assert!(req.matrix_params("/world").is_empty());
    }

    #[tokio::test]
    async fn test_form_params() {
        let mut req = request(
            "/",
            &[("Content-Type", "application/x-www-form-urlencoded")],
            Body::from(b"name=John%20Doe&age=&city=NYC".to_vec()),
        );
        let params = req.form_params().await.unwrap();
        assert_eq!(params, map(&[("name", "John Doe"), ("city", "NYC")]));
    }

    #[tokio::test]
    async fn test_form_params_quirks() {
        let mut req = request(
            "/",
            &[("content-type", "Application/X-WWW-Form-Urlencoded")],
            Body::from(b" a = 1 &novalue&b=x=y&c=+&d=%20v%20&a=2".to_vec()),
        );
        let params = req.form_params().await.unwrap();
        assert_eq!(params, map(&[("a", "2"), ("b", "x=y"), ("d", "v")]));

        let mut req = request(
            "/",
            &[("Content-Type", "application/x-www-form-urlencoded")],
            Body::Empty,
        );
        assert!(req.form_params().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_form_params_content_type_errors() {
        let mut req = request(
            "/",
            &[("Content-Type", "application/json")],
            Body::from(b"a=1".to_vec()),
        );
        assert!(matches!(
            req.form_params().await,
            Err(RequestError::InvalidContentType(ref ct)) if ct == "application/json"
        ));

        let mut req = request("/", &[], Body::from(b"a=1".to_vec()));
        assert!(matches!(
            req.form_params().await,
            Err(RequestError::MissingContentType)
        ));
    }

    #[tokio::test]
    async fn test_form_params_streamed_once() {
        let mut req = request(
            "/",
            &[("Content-Type", "application/x-www-form-urlencoded")],
            Body::stream(&b"k=v"[..]),
        );
        assert_eq!(req.form_params().await.unwrap(), map(&[("k", "v")]));
        assert!(matches!(
            req.form_params().await,
            Err(RequestError::EntityConsumed)
        ));
    }

    #[test]
    fn test_cookies() {
        let req = request(
            "/",
            &[
                ("Cookie", "sid=abc; theme=\"dark\"; broken"),
                ("cookie", " lang = en "),
            ],
            Body::Empty,
        );
        let expected: Vec<(String, String)> = vec![
            ("sid".into(), "abc".into()),
            ("theme".into(), "dark".into()),
            ("lang".into(), "en".into()),
        ];
        assert_eq!(req.cookies(), expected);
    }
}
