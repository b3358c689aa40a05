use std::fmt;

use crate::http::headers::HeaderSet;

/// HTTP request methods.
///
/// Only GET and POST are dispatched by the connection pipeline. The other
/// well-known verbs are recognised so handlers and logs can name them;
/// anything else is kept as [`Method::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Submit data; the body is read before dispatch
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
    /// Any other token, upper-cased
    Other(String),
}

impl Method {
    /// Parses a method token. Matching is case-insensitive: the token is
    /// upper-cased first, so `get` and `GET` are the same method.
    ///
    /// # Example
    ///
    /// ```
    /// # use httplet::http::request::Method;
    /// assert_eq!(Method::parse("get"), Method::GET);
    /// assert_eq!(Method::parse("brew"), Method::Other("BREW".to_string()));
    /// ```
    pub fn parse(token: &str) -> Self {
        let upper = token.to_uppercase();
        match upper.as_str() {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            _ => Method::Other(upper),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(s) => s,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed HTTP request head.
///
/// `target` and `version` are stored exactly as received. Nothing is
/// decoded or validated, so a handler that maps the target onto a file
/// path or URL has to check it itself.
#[derive(Debug, Clone)]
pub struct Request {
    /// The request method, upper-cased
    pub method: Method,
    /// The raw request target (e.g. "/index.html?x=1")
    pub target: String,
    /// The raw protocol version (e.g. "HTTP/1.0")
    pub version: String,
    /// Headers, filled in once the header block has been read
    pub headers: HeaderSet,
}

impl Request {
    /// Retrieves a header value by its exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }
}
