use super::*;
use serde_json::json;

fn result(value: Value) -> AnalysisResult {
    AnalysisResult::from_value(value).expect("object payload")
}

fn auto() -> NormalizeOptions {
    NormalizeOptions::default()
}

#[test]
fn both_summary_namings_resolve_to_same_counts() {
    let legacy = result(json!({
        "summary": {"high_priority_matches": 3, "medium_priority_matches": 5, "low_priority_matches": 2, "not_a_fit": 1},
        "attendees": []
    }));
    let current = result(json!({
        "summary": {"perfect_matches": 3, "good_matches": 5, "moderate_matches": 2, "poor_matches": 1},
        "attendees": []
    }));

    let legacy = normalize(&legacy, &auto()).expect("legacy");
    let current = normalize(&current, &auto()).expect("current");
    assert_eq!(legacy.summary.counts, current.summary.counts);
    assert_eq!(
        legacy.summary.counts,
        TierCounts {
            high: 3,
            medium: 5,
            low: 2,
            not_a_fit: 1
        }
    );
    assert_eq!(legacy.summary.schema, SummarySchema::Legacy);
    assert_eq!(current.summary.schema, SummarySchema::Current);
}

#[test]
fn legacy_field_wins_per_counter_when_both_present() {
    let summary: WireSummary = serde_json::from_value(json!({
        "high_priority_matches": 4,
        "perfect_matches": 9,
        "good_matches": 6,
        "poor_matches": 2,
        "not_a_fit": 0
    }))
    .expect("summary");

    let (_, counts) = resolve_summary(Some(&summary));
    assert_eq!(
        counts,
        TierCounts {
            high: 4,
            medium: 6,
            low: 0,
            not_a_fit: 0
        }
    );
}

#[test]
fn envelope_and_metadata_are_read() {
    let report = normalize(
        &result(json!({
            "metadata": {"event_url": "https://lu.ma/cv", "analysis_date": "2025-10-01T09:30:00.123456"},
            "step4_matches": {
                "summary": {"total_attendees_analyzed": 35},
                "attendees": [{"name": "Ada", "icp_match_score": 8}],
                "overall_event_assessment": "Strong event.",
                "recommendations": ["Book a booth", ""]
            }
        })),
        &auto(),
    )
    .expect("normalize");

    assert_eq!(report.metadata.event_url.as_deref(), Some("https://lu.ma/cv"));
    assert_eq!(report.summary.total_analyzed, 35);
    assert_eq!(report.overall_assessment.as_deref(), Some("Strong event."));
    assert_eq!(report.recommendations, vec!["Book a booth".to_string()]);
    assert_eq!(report.attendees.len(), 1);
}

#[test]
fn total_falls_back_to_attendee_count() {
    let report = normalize(
        &result(json!({"attendees": [{"name": "Ada"}, {"name": "Grace"}]})),
        &auto(),
    )
    .expect("normalize");
    assert_eq!(report.summary.total_analyzed, 2);
    assert_eq!(report.summary.counts, TierCounts::default());
}

#[test]
fn business_value_presence_selects_hundred_scale() {
    let report = normalize(
        &result(json!({"attendees": [
            {"name": "Ada", "icp_match_score": 80, "business_value_score": 60},
            {"name": "Grace", "icp_match_score": 9}
        ]})),
        &auto(),
    )
    .expect("normalize");

    assert_eq!(report.scale, ScoreScale::Hundred);
    assert_eq!(report.attendees[0].rank_key, 70.0);
    assert_eq!(report.attendees[0].tier, Tier::High);
    // Missing business value counts as zero under the current schema.
    assert_eq!(report.attendees[1].rank_key, 4.5);
    assert_eq!(report.attendees[1].tier, Tier::Low);
}

#[test]
fn legacy_scores_rank_on_icp_alone() {
    let report = normalize(
        &result(json!({"attendees": [
            {"name": "Ada", "icp_match_score": 7},
            {"name": "Grace", "icp_match_score": 6},
            {"name": "Linus"}
        ]})),
        &auto(),
    )
    .expect("normalize");

    assert_eq!(report.scale, ScoreScale::Ten);
    let tiers: Vec<Tier> = report.attendees.iter().map(|a| a.tier).collect();
    assert_eq!(tiers, [Tier::High, Tier::Medium, Tier::Low]);
    assert_eq!(
        report.attendees[0].scores,
        AttendeeScores::Legacy { icp_match: 7.0 }
    );
    assert_eq!(report.attendees[2].rank_key, 0.0);
}

#[test]
fn low_hundred_scale_scores_are_not_mistaken_for_ten_scale() {
    let report = normalize(
        &result(json!({"attendees": [
            {"name": "Ada", "icp_match_score": 8, "business_value_score": 6}
        ]})),
        &auto(),
    )
    .expect("normalize");
    assert_eq!(report.scale, ScoreScale::Hundred);
    assert_eq!(report.attendees[0].tier, Tier::Low);
}

#[test]
fn empty_attendees_fall_back_to_summary_naming() {
    let report = normalize(
        &result(json!({"summary": {"perfect_matches": 0}, "attendees": []})),
        &auto(),
    )
    .expect("normalize");
    assert_eq!(report.scale, ScoreScale::Hundred);

    let report = normalize(&result(json!({"attendees": []})), &auto()).expect("normalize");
    assert_eq!(report.scale, ScoreScale::Ten);
}

#[test]
fn current_summary_naming_selects_hundred_scale_without_business_value() {
    let report = normalize(
        &result(json!({
            "summary": {"perfect_matches": 0, "good_matches": 0, "moderate_matches": 0, "poor_matches": 1},
            "attendees": [{"name": "Ada", "icp_match_score": 12}]
        })),
        &auto(),
    )
    .expect("normalize");

    assert_eq!(report.scale, ScoreScale::Hundred);
    assert_eq!(report.attendees[0].rank_key, 6.0);
    assert_eq!(report.attendees[0].tier, Tier::Low);
}

#[test]
fn legacy_summary_naming_keeps_ten_scale() {
    let report = normalize(
        &result(json!({
            "summary": {"high_priority_matches": 1},
            "attendees": [{"name": "Ada", "icp_match_score": 8}]
        })),
        &auto(),
    )
    .expect("normalize");
    assert_eq!(report.scale, ScoreScale::Ten);
    assert_eq!(report.attendees[0].tier, Tier::High);
}

#[test]
fn zero_total_falls_back_to_attendee_count() {
    let report = normalize(
        &result(json!({
            "summary": {"total_attendees_analyzed": 0},
            "attendees": [{"name": "Ada"}, {"name": "Grace"}]
        })),
        &auto(),
    )
    .expect("normalize");
    assert_eq!(report.summary.total_analyzed, 2);
}

#[test]
fn whole_float_counters_are_accepted() {
    let report = normalize(
        &result(json!({
            "summary": {"total_attendees_analyzed": 3.0, "perfect_matches": 2.0, "poor_matches": 1},
            "attendees": []
        })),
        &auto(),
    )
    .expect("normalize");
    assert_eq!(report.summary.total_analyzed, 3);
    assert_eq!(report.summary.counts.high, 2);
    assert_eq!(report.summary.counts.not_a_fit, 1);
}

#[test]
fn fractional_counters_are_malformed() {
    let err = normalize(
        &result(json!({"summary": {"perfect_matches": 2.5}, "attendees": []})),
        &auto(),
    )
    .expect_err("fractional count");
    assert!(matches!(err, ClassifiedError::MalformedResponse(_)));
}

#[test]
fn forced_scale_overrides_detection() {
    let options = NormalizeOptions {
        scale: Some(ScoreScale::Hundred),
    };
    let report = normalize(
        &result(json!({"attendees": [{"name": "Ada", "icp_match_score": 90}]})),
        &options,
    )
    .expect("normalize");
    assert_eq!(report.scale, ScoreScale::Hundred);
    assert_eq!(report.attendees[0].rank_key, 45.0);
}

#[test]
fn missing_attendees_is_malformed() {
    let err = normalize(&result(json!({"summary": {}})), &auto()).expect_err("must fail");
    assert!(matches!(err, ClassifiedError::MalformedResponse(_)));

    let err = normalize(
        &result(json!({"step4_matches": {"attendees": null}})),
        &auto(),
    )
    .expect_err("must fail");
    assert!(matches!(err, ClassifiedError::MalformedResponse(_)));
}

#[test]
fn non_sequence_attendees_is_malformed() {
    let err = normalize(&result(json!({"attendees": {"name": "Ada"}})), &auto())
        .expect_err("must fail");
    assert_eq!(
        err,
        ClassifiedError::MalformedResponse("attendees is not a sequence".to_string())
    );
}

#[test]
fn nameless_attendee_is_malformed() {
    let err = normalize(
        &result(json!({"attendees": [{"name": "Ada"}, {"role": "CTO"}]})),
        &auto(),
    )
    .expect_err("must fail");
    assert_eq!(
        err,
        ClassifiedError::MalformedResponse("attendee #1 has no name".to_string())
    );
}

#[test]
fn wrongly_typed_fields_are_malformed() {
    let err = normalize(
        &result(json!({"attendees": [{"name": "Ada", "icp_match_score": "high"}]})),
        &auto(),
    )
    .expect_err("must fail");
    assert!(matches!(err, ClassifiedError::MalformedResponse(_)));

    let err = normalize(&result(json!({"attendees": ["Ada"]})), &auto()).expect_err("must fail");
    assert!(matches!(err, ClassifiedError::MalformedResponse(_)));
}

#[test]
fn blank_optionals_collapse_to_absent() {
    let report = normalize(
        &result(json!({"attendees": [{
            "name": "Ada",
            "company_description": "  ",
            "key_talking_points": ["", "Compilers"],
            "contact_info": {"linkedin": "", "email": null}
        }]})),
        &auto(),
    )
    .expect("normalize");
    let ada = &report.attendees[0];
    assert_eq!(ada.company_description, None);
    assert_eq!(ada.key_talking_points, vec!["Compilers".to_string()]);
    assert!(ada.contact.is_empty());
}

#[test]
fn source_payload_is_not_mutated() {
    let raw = result(json!({"attendees": [{"name": "B", "icp_match_score": 2}, {"name": "A", "icp_match_score": 9}]}));
    let before = raw.clone();
    let _ = normalize(&raw, &auto()).expect("normalize");
    assert_eq!(raw, before);
}
