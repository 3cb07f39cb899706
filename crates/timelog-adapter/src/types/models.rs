/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// One structured time-log entry as returned by the parsing service.
///
/// The service emits capitalised keys (`Employee`, `Date`, ...); lower-case
/// keys are accepted as well. Missing or `null` values become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(
        rename = "Employee",
        alias = "employee",
        default,
        deserialize_with = "serde_helpers::deserialize_string_or_empty"
    )]
    pub employee: String,
    #[serde(
        rename = "Date",
        alias = "date",
        default,
        deserialize_with = "serde_helpers::deserialize_string_or_empty"
    )]
    pub date: String,
    #[serde(
        rename = "Time",
        alias = "time",
        default,
        deserialize_with = "serde_helpers::deserialize_string_or_empty"
    )]
    pub time: String,
    #[serde(
        rename = "Description",
        alias = "description",
        default,
        deserialize_with = "serde_helpers::deserialize_string_or_empty"
    )]
    pub description: String,
    #[serde(
        rename = "Subtask",
        alias = "subtask",
        default,
        deserialize_with = "serde_helpers::deserialize_string_or_empty"
    )]
    pub subtask: String,
}

impl ResultRow {
    pub fn new(
        employee: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        description: impl Into<String>,
        subtask: impl Into<String>,
    ) -> Self {
        Self {
            employee: employee.into(),
            date: date.into(),
            time: time.into(),
            description: description.into(),
            subtask: subtask.into(),
        }
    }
}

mod serde_helpers {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize_string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(String::new()),
            Value::String(raw) => Ok(raw),
            Value::Number(number) => Ok(number.to_string()),
            Value::Bool(flag) => Ok(flag.to_string()),
            other => Err(serde::de::Error::custom(format!(
                "expected string field, found {other}"
            ))),
        }
    }
}
