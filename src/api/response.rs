//! Response types.

use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

/// A call-control document served as `text/xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Twiml(pub String);

impl IntoResponse for Twiml {
    fn into_response(self) -> Response {
        ([(CONTENT_TYPE, "text/xml")], self.0).into_response()
    }
}
