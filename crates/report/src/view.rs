//! Nested presentation model assembled from a normalized report.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use shared::domain::{ScoreScale, Tier};

use crate::{
    normalize::{AttendeeScores, ContactInfo, NormalizedAttendee, NormalizedReport},
    rank::rank,
};

pub const REPORT_TITLE: &str = "Event ICP Analysis Results";
pub const DEFAULT_OPPORTUNITY: &str = "Moderate";
const TWITTER_PROFILE_BASE: &str = "https://twitter.com/";
const UNKNOWN_DATE: &str = "Unknown date";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub label: String,
    pub new_tab: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub title: String,
    pub event_link: Option<Link>,
    pub analysis_date: String,
    pub total_attendees: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCell {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreIndicator {
    pub label: String,
    pub short_label: String,
    pub value: String,
    pub out_of: u32,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpportunityLabel {
    pub text: String,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendeeCard {
    pub name: String,
    pub role: String,
    pub company: String,
    pub company_description: Option<String>,
    pub tier: Tier,
    pub scores: Vec<ScoreIndicator>,
    pub opportunity: Option<OpportunityLabel>,
    pub match_reasoning: Option<String>,
    pub recommended_action: Option<String>,
    pub talking_points: Vec<String>,
    /// Empty when no contact channel is present.
    pub contact_links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportView {
    pub header: HeaderView,
    pub summary: Vec<SummaryCell>,
    pub overall_assessment: Option<String>,
    pub recommendations: Vec<String>,
    pub attendees: Vec<AttendeeCard>,
}

pub fn build_view(report: &NormalizedReport) -> ReportView {
    let counts = report.summary.counts;
    ReportView {
        header: HeaderView {
            title: REPORT_TITLE.to_string(),
            event_link: report.metadata.event_url.as_deref().map(event_link),
            analysis_date: format_analysis_date(report.metadata.analysis_date.as_deref()),
            total_attendees: report.summary.total_analyzed,
        },
        summary: [
            ("Perfect Match", counts.high),
            ("Good Match", counts.medium),
            ("Moderate", counts.low),
            ("Poor Fit", counts.not_a_fit),
        ]
        .into_iter()
        .map(|(label, value)| SummaryCell {
            label: label.to_string(),
            value,
        })
        .collect(),
        overall_assessment: report.overall_assessment.clone(),
        recommendations: report.recommendations.clone(),
        attendees: rank(&report.attendees)
            .iter()
            .map(|attendee| attendee_card(attendee, report.scale))
            .collect(),
    }
}

fn attendee_card(attendee: &NormalizedAttendee, scale: ScoreScale) -> AttendeeCard {
    let (scores, opportunity) = match attendee.scores {
        AttendeeScores::Legacy { icp_match } => (
            vec![indicator("ICP Match Score", "ICP", icp_match, scale)],
            attendee.opportunity_type.as_deref().map(opportunity_label),
        ),
        AttendeeScores::Current {
            icp_match,
            business_value,
        } => (
            vec![
                indicator("ICP Match Score", "ICP", icp_match, scale),
                indicator("Business Potential Score", "Potential", business_value, scale),
            ],
            Some(opportunity_label(
                attendee
                    .opportunity_type
                    .as_deref()
                    .unwrap_or(DEFAULT_OPPORTUNITY),
            )),
        ),
    };

    AttendeeCard {
        name: attendee.name.clone(),
        role: attendee.role.clone(),
        company: attendee.company.clone(),
        company_description: attendee.company_description.clone(),
        tier: attendee.tier,
        scores,
        opportunity,
        match_reasoning: attendee.match_reasoning.clone(),
        recommended_action: attendee.recommended_action.clone(),
        talking_points: attendee.key_talking_points.clone(),
        contact_links: contact_links(&attendee.contact),
    }
}

fn indicator(label: &str, short_label: &str, value: f64, scale: ScoreScale) -> ScoreIndicator {
    ScoreIndicator {
        label: label.to_string(),
        short_label: short_label.to_string(),
        value: value.to_string(),
        out_of: scale.max() as u32,
        tier: Tier::classify(value, scale),
    }
}

fn opportunity_label(text: &str) -> OpportunityLabel {
    let class = text
        .trim()
        .to_ascii_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    OpportunityLabel {
        text: text.trim().to_string(),
        class,
    }
}

fn event_link(href: &str) -> Link {
    let label = url::Url::parse(href)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| href.to_string());
    Link {
        href: href.to_string(),
        label,
        new_tab: true,
    }
}

pub fn contact_links(contact: &ContactInfo) -> Vec<Link> {
    let mut links = Vec::new();
    if let Some(linkedin) = &contact.linkedin {
        links.push(Link {
            href: linkedin.trim().to_string(),
            label: "LinkedIn".to_string(),
            new_tab: true,
        });
    }
    if let Some(email) = &contact.email {
        links.push(Link {
            href: format!("mailto:{}", email.trim()),
            label: "Email".to_string(),
            new_tab: false,
        });
    }
    if let Some(twitter) = &contact.twitter {
        links.push(Link {
            href: twitter_url(twitter),
            label: "Twitter".to_string(),
            new_tab: true,
        });
    }
    links
}

pub fn twitter_url(handle: &str) -> String {
    let handle = handle.trim();
    if handle.starts_with("http") {
        handle.to_string()
    } else {
        format!("{TWITTER_PROFILE_BASE}{}", handle.trim_start_matches('@'))
    }
}

/// Calendar date only, independent of the local timezone.
pub fn format_analysis_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return UNKNOWN_DATE.to_string();
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.date_naive().to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.date().to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.to_string();
    }
    raw.to_string()
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
