use serde::{Deserialize, Serialize};
use std::fmt;

/// Content category a route is expected to serve. Informational only; the
/// checker treats every type the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteType {
    Html,
    Api,
    Static,
    Image,
    NextjsStatic,
    Pwa,
}

impl RouteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteType::Html => "html",
            RouteType::Api => "api",
            RouteType::Static => "static",
            RouteType::Image => "image",
            RouteType::NextjsStatic => "nextjs-static",
            RouteType::Pwa => "pwa",
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry of a route catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub path: String,
    #[serde(rename = "type")]
    pub route_type: RouteType,
    pub description: String,
}

impl RouteDescriptor {
    pub fn new(path: &str, route_type: RouteType, description: &str) -> Self {
        Self {
            path: path.to_string(),
            route_type,
            description: description.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_type_serializes_kebab_case() {
        let json = serde_json::to_string(&RouteType::NextjsStatic).unwrap();
        assert_eq!(json, "\"nextjs-static\"");
        assert_eq!(RouteType::NextjsStatic.to_string(), "nextjs-static");
    }

    #[test]
    fn test_descriptor_uses_type_key() {
        let route = RouteDescriptor::new("/sw.js", RouteType::Pwa, "Service Worker");
        let value = serde_json::to_value(&route).unwrap();

        assert_eq!(value["path"], "/sw.js");
        assert_eq!(value["type"], "pwa");
        assert_eq!(value["description"], "Service Worker");
        assert!(value.get("route_type").is_none());
    }

    #[test]
    fn test_descriptor_rejects_unknown_type() {
        let json = r#"{"path": "/", "type": "video", "description": "Home"}"#;
        let parsed: Result<RouteDescriptor, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }
}
