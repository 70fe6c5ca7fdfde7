//! Declarative operation descriptors.
//!
//! A descriptor is the contract between configuration parsing and the stage
//! factory. In JSON it is a flat object whose `type` (or `kind`) key names the
//! operation and whose remaining keys are its parameters:
//!
//! ```json
//! {"type": "box", "width": 5, "height": 5}
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::error::EditResult;

/// A single parameter value.
///
/// Non-numeric JSON values are kept as [`ParamValue::Other`] so validation can
/// report them by name instead of failing inside the JSON parser.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Other(serde_json::Value),
}

impl ParamValue {
    /// Integer value; floats are not coerced.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric value, accepting integers as well as floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Other(_) => None,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Other(serde_json::Value::Null) => "null",
            Self::Other(serde_json::Value::Bool(_)) => "boolean",
            Self::Other(serde_json::Value::String(_)) => "string",
            Self::Other(serde_json::Value::Array(_)) => "array",
            Self::Other(serde_json::Value::Object(_)) => "object",
            Self::Other(serde_json::Value::Number(_)) => "number",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Other(serde_json::Value::String(v.to_string()))
    }
}

/// Operation kind plus its raw, not yet validated parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OperationDescriptor {
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
    #[serde(flatten)]
    pub parameters: BTreeMap<String, ParamValue>,
}

impl OperationDescriptor {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Add or replace a parameter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Parse a JSON array of descriptors.
    pub fn parse_list(json: &str) -> EditResult<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind)?;
        for (i, (name, value)) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_object() {
        let d: OperationDescriptor =
            serde_json::from_str(r#"{"type": "box", "width": 5, "height": 7}"#).unwrap();
        assert_eq!(d.kind, "box");
        assert_eq!(d.parameters.get("width"), Some(&ParamValue::Int(5)));
        assert_eq!(d.parameters.get("height"), Some(&ParamValue::Int(7)));
        assert!(!d.parameters.contains_key("type"));
    }

    #[test]
    fn test_kind_alias_and_numeric_types() {
        let d: OperationDescriptor =
            serde_json::from_str(r#"{"kind": "brightness", "value": 1.5, "factor": 2}"#).unwrap();
        assert_eq!(d.kind, "brightness");
        assert_eq!(d.parameters.get("value"), Some(&ParamValue::Float(1.5)));
        assert_eq!(d.parameters["factor"].as_f64(), Some(2.0));
        assert_eq!(d.parameters["value"].as_i64(), None);
    }

    #[test]
    fn test_non_numeric_values_are_kept() {
        let d: OperationDescriptor =
            serde_json::from_str(r#"{"type": "sharpen", "amount": "lots"}"#).unwrap();
        let amount = &d.parameters["amount"];
        assert_eq!(amount.as_f64(), None);
        assert_eq!(amount.type_name(), "string");
    }

    #[test]
    fn test_missing_type_is_rejected() {
        let err = OperationDescriptor::parse_list(r#"[{"width": 3}]"#).unwrap_err();
        assert!(err.to_string().contains("type"));
    }

    #[test]
    fn test_builder_and_display() {
        let d = OperationDescriptor::new("box").with("width", 3).with("height", 5);
        assert_eq!(d.to_string(), "box(height=5, width=3)");
        assert_eq!(OperationDescriptor::new("sobel").to_string(), "sobel()");
    }

    #[test]
    fn test_parse_list_keeps_order() {
        let list = OperationDescriptor::parse_list(
            r#"[{"type": "brightness", "value": 0.5}, {"type": "sobel"}, {"type": "box", "width": 3, "height": 3}]"#,
        )
        .unwrap();
        let kinds: Vec<&str> = list.iter().map(|d| d.kind.as_str()).collect();
        assert_eq!(kinds, vec!["brightness", "sobel", "box"]);
    }
}
