//! HTML fragment for the results region.

use std::fmt::Write as _;

use crate::view::{AttendeeCard, HeaderView, Link, ReportView};

pub fn render_html(view: &ReportView) -> String {
    let mut out = String::new();
    push_header(&mut out, &view.header);

    out.push_str("<div class=\"summary-grid\">\n");
    for cell in &view.summary {
        let _ = writeln!(
            out,
            "<div class=\"summary-card\"><div class=\"summary-card-value\">{}</div><div class=\"summary-card-label\">{}</div></div>",
            cell.value,
            escape(&cell.label)
        );
    }
    out.push_str("</div>\n");

    if let Some(assessment) = &view.overall_assessment {
        push_paragraph_section(&mut out, "Overall Assessment", assessment);
    }
    if !view.recommendations.is_empty() {
        push_list_section(&mut out, "Recommendations", &view.recommendations);
    }

    out.push_str("<div class=\"attendees-list\">\n<h3>Attendee Analysis</h3>\n");
    for card in &view.attendees {
        push_attendee(&mut out, card);
    }
    out.push_str("</div>\n");
    out
}

fn push_header(out: &mut String, header: &HeaderView) {
    let _ = writeln!(
        out,
        "<div class=\"results-header\">\n<h2>{}</h2>\n<div class=\"results-meta\">",
        escape(&header.title)
    );
    if let Some(link) = &header.event_link {
        let _ = writeln!(out, "<div class=\"meta-item\">{}</div>", anchor(link, None));
    }
    let _ = writeln!(
        out,
        "<div class=\"meta-item\">{}</div>\n<div class=\"meta-item\">{} attendees analyzed</div>\n</div>\n</div>",
        escape(&header.analysis_date),
        header.total_attendees
    );
}

fn push_attendee(out: &mut String, card: &AttendeeCard) {
    let _ = writeln!(
        out,
        "<div class=\"attendee-card {}-priority\">",
        card.tier.as_str()
    );
    let _ = writeln!(
        out,
        "<div class=\"attendee-header\">\n<div class=\"attendee-info\">\n<h4>{}</h4>\n<div class=\"attendee-role\">{}</div>\n<div class=\"attendee-company\">{}</div>",
        escape(&card.name),
        escape(&card.role),
        escape(&card.company)
    );
    if let Some(description) = &card.company_description {
        let _ = writeln!(
            out,
            "<div class=\"attendee-company-desc\">{}</div>",
            escape(description)
        );
    }
    out.push_str("</div>\n<div class=\"score-badges\">\n");
    for score in &card.scores {
        let _ = writeln!(
            out,
            "<div class=\"score-badge {}\" title=\"{}\">{}: {}/{}</div>",
            score.tier.as_str(),
            escape(&score.label),
            escape(&score.short_label),
            escape(&score.value),
            score.out_of
        );
    }
    out.push_str("</div>\n</div>\n");

    if let Some(opportunity) = &card.opportunity {
        let _ = writeln!(
            out,
            "<div class=\"opportunity-badge {}\">{}</div>",
            escape(&opportunity.class),
            escape(&opportunity.text)
        );
    }

    out.push_str("<div class=\"attendee-details\">\n");
    if let Some(reasoning) = &card.match_reasoning {
        push_paragraph_section(out, "Why They're a Match", reasoning);
    }
    if let Some(action) = &card.recommended_action {
        push_paragraph_section(out, "Recommended Action", action);
    }
    if !card.talking_points.is_empty() {
        push_list_section(out, "Key Talking Points", &card.talking_points);
    }
    if !card.contact_links.is_empty() {
        out.push_str("<div class=\"detail-section\">\n<h5>Contact</h5>\n<div class=\"contact-links\">\n");
        for link in &card.contact_links {
            let _ = writeln!(out, "{}", anchor(link, Some("contact-link")));
        }
        out.push_str("</div>\n</div>\n");
    }
    out.push_str("</div>\n</div>\n");
}

fn push_paragraph_section(out: &mut String, heading: &str, text: &str) {
    let _ = writeln!(
        out,
        "<div class=\"detail-section\">\n<h5>{}</h5>\n<p>{}</p>\n</div>",
        escape(heading),
        escape(text)
    );
}

fn push_list_section(out: &mut String, heading: &str, items: &[String]) {
    let _ = writeln!(
        out,
        "<div class=\"detail-section\">\n<h5>{}</h5>\n<ul class=\"talking-points\">",
        escape(heading)
    );
    for item in items {
        let _ = writeln!(out, "<li>{}</li>", escape(item));
    }
    out.push_str("</ul>\n</div>\n");
}

/// Links with a scheme other than http(s) or mailto render as plain text.
fn anchor(link: &Link, class: Option<&str>) -> String {
    if !is_safe_href(&link.href) {
        return escape(&link.label);
    }
    let class = class
        .map(|class| format!(" class=\"{class}\""))
        .unwrap_or_default();
    let target = if link.new_tab {
        " target=\"_blank\" rel=\"noopener\""
    } else {
        ""
    };
    format!(
        "<a href=\"{}\"{target}{class}>{}</a>",
        escape(&link.href),
        escape(&link.label)
    )
}

fn is_safe_href(href: &str) -> bool {
    let lower = href.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("mailto:")
}

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
