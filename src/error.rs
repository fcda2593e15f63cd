//! Error types for portal queries

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Result type alias for portal operations
pub type Result<T> = std::result::Result<T, PortalError>;

/// Why a single category could not be retrieved
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortalError {
    /// Connection, DNS or transport failure
    #[error("portal unreachable: {0}")]
    Unreachable(String),

    /// Request did not complete within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Portal answered with a non-2xx status
    #[error("portal returned HTTP {code}")]
    HttpStatus { code: u16 },

    /// 2xx response with nothing in it
    #[error("portal returned an empty body")]
    EmptyBody,

    /// Body is not JSON, or lacks the structure the category needs
    #[error("unexpected response: {0}")]
    Parse(String),

    /// Well-formed response without any data
    #[error("{0}")]
    NotFound(String),
}

impl PortalError {
    /// Stable tag for machine-readable output
    pub fn kind(&self) -> &'static str {
        match self {
            PortalError::Unreachable(_) => "unreachable",
            PortalError::Timeout => "timeout",
            PortalError::HttpStatus { .. } => "http_status",
            PortalError::EmptyBody => "empty_body",
            PortalError::Parse(_) => "parse_error",
            PortalError::NotFound(_) => "not_found",
        }
    }

    /// Transport-level failure (no usable HTTP response)
    pub fn is_transport(&self) -> bool {
        matches!(self, PortalError::Unreachable(_) | PortalError::Timeout)
    }
}

impl From<reqwest::Error> for PortalError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PortalError::Timeout
        } else if let Some(status) = e.status() {
            PortalError::HttpStatus {
                code: status.as_u16(),
            }
        } else {
            PortalError::Unreachable(e.to_string())
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(e: serde_json::Error) -> Self {
        PortalError::Parse(e.to_string())
    }
}

impl Serialize for PortalError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("PortalError", 2)?;
        s.serialize_field("kind", self.kind())?;
        s.serialize_field("reason", &self.to_string())?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(PortalError::Timeout.kind(), "timeout");
        assert_eq!(PortalError::HttpStatus { code: 404 }.kind(), "http_status");
        assert_eq!(PortalError::NotFound("x".into()).kind(), "not_found");
        assert!(PortalError::Unreachable("dns".into()).is_transport());
        assert!(!PortalError::EmptyBody.is_transport());
    }

    #[test]
    fn test_serialize() {
        let value = serde_json::to_value(PortalError::HttpStatus { code: 503 }).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "kind": "http_status", "reason": "portal returned HTTP 503" })
        );
    }

    #[test]
    fn test_from_json_error() {
        let err: PortalError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), "parse_error");
    }
}
