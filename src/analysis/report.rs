use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::consts::DISCLAIMER;

/// Free text the model may give as one string, a list, or something richer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Notes {
    One(String),
    Many(Vec<String>),
    Other(Value),
}

/// Care details. Every field is optional and unknown keys are kept, so a
/// near-miss reply still reaches the client as the model wrote it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Notes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Notes>,
    /// `None` when the model did not say; never defaulted to `false`.
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub vet_visit_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Findings for a photo that shows a dog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogReport {
    pub is_dog: bool,
    pub disease: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<CareInfo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts `true`/`false` as booleans or strings (`"yes"`/`"no"` too).
/// `null` and anything unrecognised read as "not stated".
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// The model's verdict, keyed on `is_dog`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiseaseAnalysis {
    NotDog { message: Option<String> },
    Dog(DogReport),
}

impl DiseaseAnalysis {
    /// Read the object produced by the JSON extractor.
    ///
    /// `is_dog: false` only needs an optional `message`; anything else must
    /// deserialize as a [`DogReport`].
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if value.get("is_dog").and_then(Value::as_bool) == Some(false) {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string);
            return Ok(Self::NotDog { message });
        }
        serde_json::from_value(value).map(Self::Dog)
    }
}

/// Response body of `/v1/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DogReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AnalysisEnvelope {
    pub fn success(report: DogReport) -> Self {
        Self {
            success: true,
            data: Some(report),
            disclaimer: Some(DISCLAIMER.to_string()),
            error: None,
            message: None,
            details: None,
        }
    }

    pub fn not_a_dog(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::failure("not a dog image", None)
        }
    }

    pub fn failure(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            disclaimer: None,
            error: Some(error.into()),
            message: None,
            details,
        }
    }
}
