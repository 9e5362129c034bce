use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Query parameters for the generic endpoint.
pub type Params = BTreeMap<String, String>;

/// Parsed JSON body of a successful call.
///
/// The shape belongs to the EIA service; this wrapper never coerces it. A
/// typical body looks like `{"response": {"total": 2, "data": [ {...}, ... ]}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryResult(Value);

impl QueryResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The top-level `"response"` object, if any.
    pub fn response(&self) -> Option<&Map<String, Value>> {
        self.0.get("response")?.as_object()
    }

    /// Rows under `response.data`, when that is an array.
    pub fn data_rows(&self) -> Option<&Vec<Value>> {
        self.response()?.get("data")?.as_array()
    }

    /// `response.total`. The service sends it as a number or as a string.
    pub fn total(&self) -> Option<u64> {
        match self.response()?.get("total")? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<Value> for QueryResult {
    fn from(v: Value) -> Self {
        Self(v)
    }
}

/// Message text of an embedded `"error"` entry, if the body carries one.
///
/// Accepts `{"error": {"message": "..."}}`, `{"error": "..."}`, and falls back
/// to the raw JSON text of the error value for anything else.
pub fn embedded_error(body: &Value) -> Option<String> {
    let err = body.as_object()?.get("error")?;
    let msg = match err {
        Value::String(s) => s.clone(),
        Value::Object(o) => match o.get("message") {
            Some(Value::String(s)) => s.clone(),
            _ => err.to_string(),
        },
        other => other.to_string(),
    };
    Some(msg)
}
