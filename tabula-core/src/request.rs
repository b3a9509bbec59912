//! Inbound request representation.
//!
//! Transport is out of scope; this is the minimal shape the routing and
//! handler layers need: a method, a path, and parsed query parameters.

use std::collections::HashMap;
use std::fmt;

/// HTTP method of an inbound request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    /// The canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inbound request.
#[derive(Clone, Debug)]
pub struct Request {
    /// Request method.
    pub method: Method,
    /// Path without the query string.
    pub path: String,
    /// Parsed query parameters.
    pub query: HashMap<String, String>,
}

impl Request {
    /// Build a request, splitting a query string off the target if present.
    pub fn new(method: Method, target: impl AsRef<str>) -> Self {
        let target = target.as_ref();
        let (path, query) = match target.split_once('?') {
            Some((path, raw)) => (path, parse_query(raw)),
            None => (target, HashMap::new()),
        };
        Self {
            method,
            path: path.to_string(),
            query,
        }
    }

    /// A GET request for the given target.
    pub fn get(target: impl AsRef<str>) -> Self {
        Self::new(Method::Get, target)
    }

    /// Look up a query parameter.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

fn parse_query(raw: &str) -> HashMap<String, String> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}
