//! Plain-text rendering for terminals.

use std::fmt::Write as _;

use crate::view::{AttendeeCard, ReportView};

pub fn render_text(view: &ReportView) -> String {
    let mut out = String::new();
    let header = &view.header;
    let _ = writeln!(out, "{}", header.title);
    let _ = writeln!(out, "{}", "=".repeat(header.title.len()));
    if let Some(link) = &header.event_link {
        let _ = writeln!(out, "Event:     {} ({})", link.label, link.href);
    }
    let _ = writeln!(out, "Date:      {}", header.analysis_date);
    let _ = writeln!(out, "Attendees: {} analyzed", header.total_attendees);
    out.push('\n');

    let cells: Vec<String> = view
        .summary
        .iter()
        .map(|cell| format!("{}: {}", cell.label, cell.value))
        .collect();
    let _ = writeln!(out, "{}", cells.join(" | "));

    if let Some(assessment) = &view.overall_assessment {
        let _ = writeln!(out, "\nOverall Assessment\n  {assessment}");
    }
    if !view.recommendations.is_empty() {
        out.push_str("\nRecommendations\n");
        for item in &view.recommendations {
            let _ = writeln!(out, "  - {item}");
        }
    }

    out.push_str("\nAttendee Analysis\n");
    for (position, card) in view.attendees.iter().enumerate() {
        push_card(&mut out, position + 1, card);
    }
    out
}

fn push_card(out: &mut String, position: usize, card: &AttendeeCard) {
    let _ = writeln!(
        out,
        "\n{position}. {} [{}]",
        card.name,
        card.tier.as_str().to_ascii_uppercase()
    );
    let _ = writeln!(out, "   {} @ {}", card.role, card.company);
    if let Some(description) = &card.company_description {
        let _ = writeln!(out, "   {description}");
    }
    let scores: Vec<String> = card
        .scores
        .iter()
        .map(|score| format!("{} {}/{}", score.short_label, score.value, score.out_of))
        .collect();
    let mut line = scores.join(", ");
    if let Some(opportunity) = &card.opportunity {
        let _ = write!(line, " ({})", opportunity.text);
    }
    let _ = writeln!(out, "   {line}");
    if let Some(reasoning) = &card.match_reasoning {
        let _ = writeln!(out, "   Why: {reasoning}");
    }
    if let Some(action) = &card.recommended_action {
        let _ = writeln!(out, "   Next: {action}");
    }
    for point in &card.talking_points {
        let _ = writeln!(out, "   * {point}");
    }
    for link in &card.contact_links {
        let _ = writeln!(out, "   {}: {}", link.label, link.href);
    }
}
