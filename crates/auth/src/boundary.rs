//! Request/response boundary used by the gate
//!
//! The gate only needs to read one header and, on rejection, set a status
//! and a JSON body. These traits name exactly that, so the gate can sit in
//! front of any HTTP stack. Adapters for axum/http types are provided.

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, request::Parts, HeaderMap, HeaderValue, Request, StatusCode},
    response::Response,
};
use serde_json::Value;

/// Name of the header carrying the bearer credential.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Read access to request headers.
pub trait HeaderSource {
    /// Raw value of header `name`, if present.
    fn header(&self, name: &str) -> Option<&[u8]>;
}

/// Write access to an outgoing response.
pub trait ResponseSink {
    fn set_status(&mut self, status: StatusCode);
    fn send_json(&mut self, body: &Value);
}

impl HeaderSource for HeaderMap {
    fn header(&self, name: &str) -> Option<&[u8]> {
        self.get(name).map(HeaderValue::as_bytes)
    }
}

impl HeaderSource for Parts {
    fn header(&self, name: &str) -> Option<&[u8]> {
        self.headers.header(name)
    }
}

impl<B> HeaderSource for Request<B> {
    fn header(&self, name: &str) -> Option<&[u8]> {
        self.headers().header(name)
    }
}

impl ResponseSink for Response<Body> {
    fn set_status(&mut self, status: StatusCode) {
        *self.status_mut() = status;
    }

    fn send_json(&mut self, body: &Value) {
        *self.body_mut() = Body::from(body.to_string());
        self.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
}
