//! Proxy mock assembly: generalized request URLs paired with canned
//! responses, serialized to the mock-file JSON schema.

mod build;
mod combine;

pub use build::{build_mocks, generalize_url, BuildSummary};
pub use combine::{combine_mock_files, read_mock_file, write_mock_file};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One canned response, matched by generalized URL and HTTP method.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyMock {
    pub url: String,
    pub method: String,
    pub response_code: u16,
    #[serde(default)]
    pub response_headers: HashMap<String, String>,
    /// Parsed JSON when the documented body parses, the raw string otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<serde_json::Value>,
}

/// The on-disk mock file: responses sorted by descending URL length so the
/// most specific mock is matched first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockFile {
    pub responses: Vec<ProxyMock>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_serializes_camel_case() {
        let mock = ProxyMock {
            url: "https://graph.microsoft.com/v1.0/me".to_string(),
            method: "GET".to_string(),
            response_code: 200,
            response_headers: HashMap::new(),
            response_body: Some(serde_json::json!({"id": "123"})),
        };
        let json = serde_json::to_value(&mock).unwrap();
        assert_eq!(json["responseCode"], 200);
        assert!(json.get("responseBody").is_some());
        assert!(json.get("response_code").is_none());
    }

    #[test]
    fn missing_body_omitted_from_json() {
        let mock = ProxyMock {
            url: "https://graph.microsoft.com/v1.0/me".to_string(),
            method: "DELETE".to_string(),
            response_code: 204,
            response_headers: HashMap::new(),
            response_body: None,
        };
        let json = serde_json::to_string(&mock).unwrap();
        assert!(!json.contains("responseBody"));
    }

    #[test]
    fn mock_file_roundtrip() {
        let file = MockFile {
            responses: vec![ProxyMock {
                url: "https://graph.microsoft.com/v1.0/users/*".to_string(),
                method: "GET".to_string(),
                response_code: 200,
                response_headers: HashMap::new(),
                response_body: Some(serde_json::Value::String("raw".to_string())),
            }],
        };
        let json = serde_json::to_string_pretty(&file).unwrap();
        let parsed: MockFile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.responses.len(), 1);
        assert_eq!(parsed.responses[0].url, file.responses[0].url);
    }
}
