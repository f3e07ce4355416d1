//! Resolves the historical payload schemas into one canonical report.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::{
    domain::{ScoreScale, Tier, TierCounts},
    error::ClassifiedError,
    protocol::{AnalysisResult, WireAttendee, WireContactInfo, WireMetadata, WireSummary},
};
use tracing::debug;

const MATCHES_ENVELOPE: &str = "step4_matches";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Forces a scale instead of detecting it from the payload.
    pub scale: Option<ScoreScale>,
}

/// Which summary naming the payload used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySchema {
    /// `high_priority_matches`, `medium_priority_matches`, ...
    Legacy,
    /// `perfect_matches`, `good_matches`, ...
    Current,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalSummary {
    pub schema: SummarySchema,
    pub counts: TierCounts,
    pub total_analyzed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub event_url: Option<String>,
    pub analysis_date: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "schema", rename_all = "snake_case")]
pub enum AttendeeScores {
    Legacy { icp_match: f64 },
    Current { icp_match: f64, business_value: f64 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub linkedin: Option<String>,
    pub email: Option<String>,
    pub twitter: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.linkedin.is_none() && self.email.is_none() && self.twitter.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedAttendee {
    pub name: String,
    pub role: String,
    pub company: String,
    pub company_description: Option<String>,
    pub scores: AttendeeScores,
    pub rank_key: f64,
    pub tier: Tier,
    pub opportunity_type: Option<String>,
    pub match_reasoning: Option<String>,
    pub recommended_action: Option<String>,
    pub key_talking_points: Vec<String>,
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedReport {
    pub metadata: ReportMetadata,
    pub summary: CanonicalSummary,
    pub scale: ScoreScale,
    /// Payload order; ranking happens on a copy.
    pub attendees: Vec<NormalizedAttendee>,
    pub overall_assessment: Option<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireMatchReport {
    #[serde(default)]
    summary: Option<WireSummary>,
    #[serde(default)]
    overall_event_assessment: Option<String>,
    #[serde(default)]
    recommendations: Option<Vec<String>>,
}

pub fn normalize(
    result: &AnalysisResult,
    options: &NormalizeOptions,
) -> Result<NormalizedReport, ClassifiedError> {
    let body = result.body();
    let matches = match body.get(MATCHES_ENVELOPE) {
        Some(Value::Object(matches)) => matches,
        Some(_) => {
            return Err(ClassifiedError::malformed(format!(
                "{MATCHES_ENVELOPE} is not an object"
            )))
        }
        None => body,
    };

    let metadata: WireMetadata = decode_optional(body.get("metadata"), "metadata")?;
    let report: WireMatchReport = decode(Value::Object(matches.clone()), "report")?;
    let attendees = decode_attendees(matches)?;

    let (schema, counts) = resolve_summary(report.summary.as_ref());
    let scale = options
        .scale
        .unwrap_or_else(|| detect_scale(&attendees, schema));
    let total_analyzed = report
        .summary
        .as_ref()
        .and_then(|s| s.total_attendees_analyzed)
        .filter(|&total| total > 0)
        .unwrap_or(attendees.len() as u64);
    debug!(
        ?schema,
        ?scale,
        attendees = attendees.len(),
        "report: normalized payload"
    );

    Ok(NormalizedReport {
        metadata: ReportMetadata {
            event_url: non_blank(metadata.event_url),
            analysis_date: non_blank(metadata.analysis_date),
            company_name: non_blank(metadata.company_name),
        },
        summary: CanonicalSummary {
            schema,
            counts,
            total_analyzed,
        },
        scale,
        attendees: attendees
            .into_iter()
            .map(|(name, wire)| normalize_attendee(name, wire, scale))
            .collect(),
        overall_assessment: non_blank(report.overall_event_assessment),
        recommendations: non_blank_items(report.recommendations),
    })
}

/// Legacy-named counters win over current-named ones, counter by counter.
pub fn resolve_summary(summary: Option<&WireSummary>) -> (SummarySchema, TierCounts) {
    let Some(s) = summary else {
        return (SummarySchema::Legacy, TierCounts::default());
    };
    let legacy = [
        s.high_priority_matches,
        s.medium_priority_matches,
        s.low_priority_matches,
        s.not_a_fit,
    ];
    let current = [
        s.perfect_matches,
        s.good_matches,
        s.moderate_matches,
        s.poor_matches,
    ];
    let schema = if legacy.iter().all(Option::is_none) && current.iter().any(Option::is_some) {
        SummarySchema::Current
    } else {
        SummarySchema::Legacy
    };
    let pick = |i: usize| legacy[i].or(current[i]).unwrap_or(0);
    (
        schema,
        TierCounts {
            high: pick(0),
            medium: pick(1),
            low: pick(2),
            not_a_fit: pick(3),
        },
    )
}

/// `business_value_score` and the current summary naming only exist in the
/// 0-100 schema, so either one selects it. Magnitude is never consulted.
fn detect_scale(attendees: &[(String, WireAttendee)], schema: SummarySchema) -> ScoreScale {
    if attendees
        .iter()
        .any(|(_, a)| a.business_value_score.is_some())
    {
        ScoreScale::Hundred
    } else if schema == SummarySchema::Current {
        ScoreScale::Hundred
    } else {
        ScoreScale::Ten
    }
}

fn decode_attendees(matches: &Map<String, Value>) -> Result<Vec<(String, WireAttendee)>, ClassifiedError> {
    let entries = match matches.get("attendees") {
        None | Some(Value::Null) => {
            return Err(ClassifiedError::malformed("attendees field is missing"))
        }
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(ClassifiedError::malformed("attendees is not a sequence")),
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            if !entry.is_object() {
                return Err(ClassifiedError::malformed(format!(
                    "attendee #{index} is not an object"
                )));
            }
            let wire: WireAttendee = decode(entry.clone(), &format!("attendee #{index}"))?;
            let name = non_blank(wire.name.clone()).ok_or_else(|| {
                ClassifiedError::malformed(format!("attendee #{index} has no name"))
            })?;
            Ok((name, wire))
        })
        .collect()
}

fn normalize_attendee(name: String, wire: WireAttendee, scale: ScoreScale) -> NormalizedAttendee {
    let icp_match = wire.icp_match_score.unwrap_or(0.0);
    let (scores, rank_key) = match scale {
        ScoreScale::Hundred => {
            let business_value = wire.business_value_score.unwrap_or(0.0);
            (
                AttendeeScores::Current {
                    icp_match,
                    business_value,
                },
                (icp_match + business_value) / 2.0,
            )
        }
        ScoreScale::Ten => (AttendeeScores::Legacy { icp_match }, icp_match),
    };

    NormalizedAttendee {
        name,
        role: wire.role.unwrap_or_default(),
        company: wire.company.unwrap_or_default(),
        company_description: non_blank(wire.company_description),
        scores,
        rank_key,
        tier: Tier::classify(rank_key, scale),
        opportunity_type: non_blank(wire.opportunity_type),
        match_reasoning: non_blank(wire.match_reasoning),
        recommended_action: non_blank(wire.recommended_action),
        key_talking_points: non_blank_items(wire.key_talking_points),
        contact: normalize_contact(wire.contact_info),
    }
}

fn normalize_contact(contact: Option<WireContactInfo>) -> ContactInfo {
    let Some(contact) = contact else {
        return ContactInfo::default();
    };
    ContactInfo {
        linkedin: non_blank(contact.linkedin),
        email: non_blank(contact.email),
        twitter: non_blank(contact.twitter),
    }
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, ClassifiedError> {
    serde_json::from_value(value).map_err(|e| ClassifiedError::malformed(format!("{what}: {e}")))
}

fn decode_optional<T: DeserializeOwned + Default>(
    value: Option<&Value>,
    what: &str,
) -> Result<T, ClassifiedError> {
    match value {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => decode(value.clone(), what),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_blank_items(items: Option<Vec<String>>) -> Vec<String> {
    items
        .unwrap_or_default()
        .into_iter()
        .filter(|item| !item.trim().is_empty())
        .collect()
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
