//! Request document decoding.

use super::kind::ForecastKind;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_kind() -> Option<String> {
    Some(ForecastKind::DEFAULT.as_str().to_string())
}

/// A forecast request: which series to forecast and its raw records.
///
/// `type` is kept as a string so an unknown value can be reported by name
/// instead of failing document decoding. An absent `type` takes the default
/// kind; an explicit `null` decodes to `None` and is reported as unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(rename = "type", default = "default_kind")]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Vec<Value>,
}

impl Request {
    pub fn new(kind: ForecastKind, data: Vec<Value>) -> Self {
        Self {
            kind: Some(kind.as_str().to_string()),
            data,
        }
    }

    /// Decode a JSON request document.
    pub fn from_json(document: &str) -> Result<Self> {
        serde_json::from_str(document).map_err(|e| {
            ForecastError::MalformedInput(format!("request document is not valid: {}", e))
        })
    }

    /// The requested forecast kind.
    pub fn forecast_kind(&self) -> Result<ForecastKind> {
        match &self.kind {
            Some(name) => name.parse(),
            None => Err(ForecastError::UnknownRequestKind("None".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_take_defaults() {
        let request = Request::from_json("{}").unwrap();
        assert_eq!(request.kind.as_deref(), Some("bank_transactions"));
        assert!(request.data.is_empty());
        assert_eq!(request.forecast_kind().unwrap(), ForecastKind::BankTransactions);
    }

    #[test]
    fn unknown_kind_survives_decoding() {
        let request = Request::from_json(r#"{"type": "unknown_kind", "data": [1]}"#).unwrap();
        assert_eq!(
            request.forecast_kind(),
            Err(ForecastError::UnknownRequestKind("unknown_kind".to_string()))
        );
    }

    #[test]
    fn null_kind_is_unknown() {
        let request = Request::from_json(r#"{"type": null, "data": []}"#).unwrap();
        assert_eq!(request.kind, None);
        assert_eq!(
            request.forecast_kind(),
            Err(ForecastError::UnknownRequestKind("None".to_string()))
        );
    }

    #[test]
    fn unparseable_documents_are_malformed() {
        for doc in ["", "not json", "[1, 2]", r#"{"data": 3}"#, r#"{"type": 7}"#] {
            assert!(
                matches!(Request::from_json(doc), Err(ForecastError::MalformedInput(_))),
                "{doc:?} should be rejected"
            );
        }
    }

    #[test]
    fn request_serializes_with_wire_names() {
        let request = Request::new(
            ForecastKind::ExceptionResolution,
            vec![json!({"date": "2024-01-05", "status": "RESOLVED"})],
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "exception_resolution");
        assert_eq!(value["data"][0]["status"], "RESOLVED");
    }
}
