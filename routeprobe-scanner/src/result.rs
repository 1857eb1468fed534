use crate::headers::HeaderSnapshot;
use crate::route::RouteDescriptor;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Marker serialized in place of a status code when no response was received.
pub const ERROR_STATUS: &str = "ERROR";

/// Outcome of a single request: either the numeric status code or the
/// `"ERROR"` marker for transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStatus {
    Code(u16),
    Error,
}

impl RouteStatus {
    pub fn code(&self) -> Option<u16> {
        match self {
            RouteStatus::Code(code) => Some(*code),
            RouteStatus::Error => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RouteStatus::Error)
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteStatus::Code(code) => write!(f, "{}", code),
            RouteStatus::Error => f.write_str(ERROR_STATUS),
        }
    }
}

impl Serialize for RouteStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RouteStatus::Code(code) => serializer.serialize_u16(*code),
            RouteStatus::Error => serializer.serialize_str(ERROR_STATUS),
        }
    }
}

impl<'de> Deserialize<'de> for RouteStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u16),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Ok(RouteStatus::Code(code)),
            Raw::Text(text) if text == ERROR_STATUS => Ok(RouteStatus::Error),
            Raw::Text(text) => Err(de::Error::custom(format!(
                "expected a status code or \"{}\", found \"{}\"",
                ERROR_STATUS, text
            ))),
        }
    }
}

/// What was observed for one route during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub route: RouteDescriptor,
    pub status: RouteStatus,
    pub headers: HeaderSnapshot,
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RouteResult {
    pub fn new(route: RouteDescriptor, status_code: u16, headers: HeaderSnapshot, size: u64) -> Self {
        Self {
            route,
            status: RouteStatus::Code(status_code),
            headers,
            size,
            error: None,
        }
    }

    pub fn with_error(route: RouteDescriptor, error: String) -> Self {
        Self {
            route,
            status: RouteStatus::Error,
            headers: HeaderSnapshot::new(),
            size: 0,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status.is_error()
    }

    /// Recorded value of a tracked header, if the snapshot holds it.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteType;
    use serde_json::json;

    fn home() -> RouteDescriptor {
        RouteDescriptor::new("/", RouteType::Html, "Home page")
    }

    #[test]
    fn test_status_serializes_as_number_or_marker() {
        assert_eq!(serde_json::to_value(RouteStatus::Code(404)).unwrap(), json!(404));
        assert_eq!(serde_json::to_value(RouteStatus::Error).unwrap(), json!("ERROR"));
    }

    #[test]
    fn test_status_deserializes_from_number_or_marker() {
        let code: RouteStatus = serde_json::from_value(json!(301)).unwrap();
        assert_eq!(code, RouteStatus::Code(301));

        let error: RouteStatus = serde_json::from_value(json!("ERROR")).unwrap();
        assert_eq!(error, RouteStatus::Error);

        let bad: Result<RouteStatus, _> = serde_json::from_value(json!("TIMEOUT"));
        assert!(bad.is_err());
    }

    #[test]
    fn test_error_result_shape() {
        let result = RouteResult::with_error(home(), "connection refused".to_string());
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["status"], "ERROR");
        assert_eq!(value["error"], "connection refused");
        assert_eq!(value["headers"], json!({}));
        assert_eq!(value["route"]["type"], "html");
    }

    #[test]
    fn test_success_result_omits_error_key() {
        let result = RouteResult::new(home(), 200, HeaderSnapshot::new(), 512);
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["status"], 200);
        assert_eq!(value["size"], 512);
        assert!(value.get("error").is_none());
        assert_eq!(result.status.code(), Some(200));
    }
}
