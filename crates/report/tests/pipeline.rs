use report::{present, NormalizeOptions, OutputFormat};
use serde_json::{json, Value};
use shared::{error::ClassifiedError, protocol::AnalysisResult};

fn payload() -> Value {
    json!({
        "metadata": {
            "event_url": "https://cerebralvalley.ai/summit",
            "company_name": "Linkup",
            "analysis_date": "2025-10-01T09:30:00.5",
            "workflow_version": "v2_4step"
        },
        "step4_matches": {
            "summary": {"total_attendees_analyzed": 3, "perfect_matches": 2, "good_matches": 0, "moderate_matches": 1, "poor_matches": 0},
            "attendees": [
                {
                    "name": "Amjad <Masad>",
                    "role": "Founder & CEO",
                    "company": "Replit",
                    "company_description": "Cloud development platform.",
                    "icp_match_score": 80,
                    "business_value_score": 60,
                    "match_reasoning": "Builds agents that need web search.",
                    "recommended_action": "Book a demo",
                    "key_talking_points": ["Agent grounding", "Latency"],
                    "contact_info": {"twitter": "@amasad", "email": "amjad@example.com"}
                },
                {
                    "name": "Mike Krieger",
                    "role": "Chief Product Officer",
                    "company": "Anthropic",
                    "icp_match_score": 90,
                    "business_value_score": 90,
                    "opportunity_type": "Perfect"
                },
                {
                    "name": "Daniel Lurie",
                    "role": "Mayor",
                    "company": "City and County of San Francisco",
                    "icp_match_score": 10,
                    "business_value_score": 40,
                    "contact_info": {}
                }
            ],
            "overall_event_assessment": "Strong concentration of AI builders.",
            "recommendations": ["Prioritize founders"]
        }
    })
}

fn result(value: Value) -> AnalysisResult {
    AnalysisResult::from_value(value).expect("object payload")
}

#[test]
fn rendering_twice_is_byte_identical() {
    for format in [OutputFormat::Html, OutputFormat::Text, OutputFormat::Json] {
        let first = present(&result(payload()), &NormalizeOptions::default(), format).expect("first");
        let second =
            present(&result(payload()), &NormalizeOptions::default(), format).expect("second");
        assert_eq!(first, second);
    }
}

#[test]
fn html_orders_ranked_attendees_and_escapes_text() {
    let html = present(&result(payload()), &NormalizeOptions::default(), OutputFormat::Html)
        .expect("render");

    let krieger = html.find("Mike Krieger").expect("krieger");
    let masad = html.find("Amjad &lt;Masad&gt;").expect("escaped masad");
    let lurie = html.find("Daniel Lurie").expect("lurie");
    assert!(krieger < masad && masad < lurie);
    assert!(!html.contains("<Masad>"));

    assert!(html.contains("<a href=\"https://cerebralvalley.ai/summit\""));
    assert!(html.contains(">cerebralvalley.ai</a>"));
    assert!(html.contains("2025-10-01"));
    assert!(html.contains("3 attendees analyzed"));
    assert!(html.contains("<h5>Overall Assessment</h5>"));
    assert!(html.contains("<li>Prioritize founders</li>"));
    assert!(html.contains("href=\"https://twitter.com/amasad\""));
    assert!(html.contains("href=\"mailto:amjad@example.com\""));
    assert!(html.contains("<div class=\"opportunity-badge perfect\">Perfect</div>"));
    assert!(html.contains("<div class=\"attendee-card high-priority\">"));
    assert!(html.contains("<div class=\"attendee-card low-priority\">"));
    assert_eq!(html.matches("<h5>Contact</h5>").count(), 1);
}

#[test]
fn text_output_lists_scores_and_tiers() {
    let text = present(&result(payload()), &NormalizeOptions::default(), OutputFormat::Text)
        .expect("render");
    assert!(text.contains("1. Mike Krieger [HIGH]"));
    assert!(text.contains("ICP 80/100, Potential 60/100 (Moderate)"));
    assert!(text.contains("3. Daniel Lurie [LOW]"));
    assert!(text.contains("Perfect Match: 2 | Good Match: 0 | Moderate: 1 | Poor Fit: 0"));
}

#[test]
fn malformed_payload_yields_no_output() {
    let mut broken = payload();
    broken["step4_matches"]
        .as_object_mut()
        .expect("matches")
        .remove("attendees");

    let err = present(&result(broken), &NormalizeOptions::default(), OutputFormat::Html)
        .expect_err("must fail");
    assert!(matches!(err, ClassifiedError::MalformedResponse(_)));
}
