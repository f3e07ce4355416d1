use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_COMPANY_NAME: &str = "Linkup";

/// Raw values typed into the submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisForm {
    pub event_url: String,
    pub company_url: String,
    pub company_name: Option<String>,
}

/// Outbound body of `POST /api/analyze`. One instance per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    event_url: String,
    company_url: String,
    company_name: String,
}

impl AnalysisRequest {
    pub fn from_form(form: &AnalysisForm) -> Self {
        let company_name = form
            .company_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_COMPANY_NAME);
        Self {
            event_url: form.event_url.trim().to_string(),
            company_url: form.company_url.trim().to_string(),
            company_name: company_name.to_string(),
        }
    }

    pub fn event_url(&self) -> &str {
        &self.event_url
    }

    pub fn company_url(&self) -> &str {
        &self.company_url
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }
}

/// Parsed success body of the analysis endpoint. Shape is interpreted by the
/// presenter, not by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    body: Map<String, Value>,
}

impl AnalysisResult {
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(body) => Some(Self { body }),
            _ => None,
        }
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.body)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub linkup_configured: bool,
    #[serde(default)]
    pub openai_configured: bool,
}

impl HealthStatus {
    pub fn is_fully_configured(&self) -> bool {
        self.linkup_configured && self.openai_configured
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireMetadata {
    #[serde(default)]
    pub event_url: Option<String>,
    #[serde(default)]
    pub analysis_date: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_url: Option<String>,
    #[serde(default)]
    pub workflow_version: Option<String>,
}

/// Union of both historical summary namings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireSummary {
    #[serde(default, deserialize_with = "whole_count")]
    pub total_attendees_analyzed: Option<u64>,
    #[serde(default, deserialize_with = "whole_count")]
    pub high_priority_matches: Option<u64>,
    #[serde(default, deserialize_with = "whole_count")]
    pub medium_priority_matches: Option<u64>,
    #[serde(default, deserialize_with = "whole_count")]
    pub low_priority_matches: Option<u64>,
    #[serde(default, deserialize_with = "whole_count")]
    pub not_a_fit: Option<u64>,
    #[serde(default, deserialize_with = "whole_count")]
    pub perfect_matches: Option<u64>,
    #[serde(default, deserialize_with = "whole_count")]
    pub good_matches: Option<u64>,
    #[serde(default, deserialize_with = "whole_count")]
    pub moderate_matches: Option<u64>,
    #[serde(default, deserialize_with = "whole_count")]
    pub poor_matches: Option<u64>,
}

/// Counters may arrive as whole-valued floats (`2.0`).
fn whole_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match (n.as_u64(), n.as_f64()) {
            (Some(count), _) => Ok(Some(count)),
            (None, Some(f)) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
                Ok(Some(f as u64))
            }
            _ => Err(de::Error::custom(format!("expected a whole count, found {n}"))),
        },
        Some(other) => Err(de::Error::custom(format!("expected a count, found {other}"))),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireContactInfo {
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireAttendee {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub company_description: Option<String>,
    #[serde(default)]
    pub icp_match_score: Option<f64>,
    #[serde(default)]
    pub business_value_score: Option<f64>,
    #[serde(default)]
    pub opportunity_type: Option<String>,
    #[serde(default)]
    pub match_reasoning: Option<String>,
    #[serde(default)]
    pub recommended_action: Option<String>,
    #[serde(default)]
    pub key_talking_points: Option<Vec<String>>,
    #[serde(default)]
    pub contact_info: Option<WireContactInfo>,
}
