//! Lenient request parameter extractor.
//!
//! Clients send JSON, the provider sends form-urlencoded bodies and some
//! values arrive in the query string. Webhook handlers must acknowledge
//! whatever they get, so this extractor never rejects: unparsable input
//! simply yields fewer parameters.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::Value;

/// Query and body parameters merged into one map; body wins on conflict.
#[derive(Debug, Clone, Default)]
pub struct Params(pub HashMap<String, String>);

impl Params {
    /// Get a parameter by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Decode a form-urlencoded string into the map.
    fn extend_form(&mut self, input: &[u8]) {
        self.0.extend(
            url::form_urlencoded::parse(input).map(|(k, v)| (k.into_owned(), v.into_owned())),
        );
    }

    /// Decode a JSON object's scalar members into the map.
    fn extend_json(&mut self, input: &[u8]) {
        let Ok(Value::Object(object)) = serde_json::from_slice::<Value>(input) else {
            return;
        };

        for (key, value) in object {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => continue,
            };
            self.0.insert(key, value);
        }
    }
}

impl<S> FromRequest<S> for Params
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut params = Self::default();

        if let Some(query) = req.uri().query() {
            params.extend_form(query.as_bytes());
        }

        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.trim_start().starts_with("application/json"));

        let body = Bytes::from_request(req, state).await.unwrap_or_default();
        if is_json {
            params.extend_json(&body);
        } else {
            params.extend_form(&body);
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http;

    async fn extract(req: Request) -> Params {
        Params::from_request(req, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_form_body_and_query_merge() {
        let req = http::Request::builder()
            .method("POST")
            .uri("/twiml/connect?target=%2B447700900123&mode=custom")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=Pizza+Hut&mode=private"))
            .unwrap();

        let params = extract(req).await;
        assert_eq!(params.get("target"), Some("+447700900123"));
        assert_eq!(params.get("name"), Some("Pizza Hut"));
        assert_eq!(params.get("mode"), Some("private"));
    }

    #[tokio::test]
    async fn test_json_body() {
        let req = http::Request::builder()
            .method("POST")
            .uri("/voice")
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(Body::from(
                r#"{"To":"+447700900123","CallerIdMode":"custom","CustomCallerId":"Pizza","Retries":2,"Meta":{}}"#,
            ))
            .unwrap();

        let params = extract(req).await;
        assert_eq!(params.get("To"), Some("+447700900123"));
        assert_eq!(params.get("Retries"), Some("2"));
        assert_eq!(params.get("Meta"), None);
    }

    #[tokio::test]
    async fn test_malformed_json_yields_nothing() {
        let req = http::Request::builder()
            .method("POST")
            .uri("/call-status")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        assert!(extract(req).await.0.is_empty());
    }
}
