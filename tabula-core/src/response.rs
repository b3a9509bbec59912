//! Outbound response representation.

/// A rendered response.
///
/// Failures that the serving layer recovers from (missing route, unknown
/// model, missing record) become structured responses with the appropriate
/// status rather than propagated faults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// HTTP-style status code.
    pub status: u16,
    /// Rendered body markup.
    pub body: String,
}

impl Response {
    /// A 200 response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// A structured 404 response.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: 404,
            body: format!("not found: {}", detail.into()),
        }
    }

    /// A structured 500 response.
    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            status: 500,
            body: format!("internal error: {}", detail.into()),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
