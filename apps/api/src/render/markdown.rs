//! Markdown view of a curation document.
//!
//! Every optional field has a placeholder, so any decoded document renders.

use chrono::DateTime;

use crate::models::curation::{clamp_confidence, CurationResult, StartupEntry};

const CONFIDENCE_CELLS: usize = 10;
const DISCLAIMER: &str = "_Note: This tool uses language models and may have inaccuracies. \
Validate important details directly from company sources before applying._";

/// Renders the whole document: header, one card per startup in list order, footer.
pub fn render_curation(doc: &CurationResult) -> String {
    let mut blocks = vec!["## Startup Curation".to_string()];

    if let Some(generated) = non_blank(&doc.generated_at) {
        blocks.push(format!("_Generated: {}_", format_generated_at(generated)));
    }
    if let Some(summary) = non_blank(&doc.query_summary) {
        blocks.push(quote(summary));
    }

    if doc.startups.is_empty() {
        blocks.push("---".to_string());
        blocks.push("_No startups returned._".to_string());
    }
    for entry in &doc.startups {
        blocks.push("---".to_string());
        blocks.push(render_startup_card(entry));
    }

    blocks.push("---".to_string());
    if let Some(notes) = non_blank(&doc.notes) {
        blocks.push(format!("**Notes:** {notes}"));
    }
    if !doc.next_actions.is_empty() {
        let items: Vec<String> = doc.next_actions.iter().map(|a| format!("- {a}")).collect();
        blocks.push(format!("**Next actions:**\n{}", items.join("\n")));
    }
    blocks.push(DISCLAIMER.to_string());

    blocks.join("\n\n") + "\n"
}

/// Renders a single startup as a Markdown card.
pub fn render_startup_card(entry: &StartupEntry) -> String {
    let mut blocks = Vec::new();

    let title = non_blank(&entry.name).unwrap_or("Unnamed Startup");
    blocks.push(match non_blank(&entry.website) {
        Some(website) => format!("### {title} — {website}"),
        None => format!("### {title}"),
    });
    blocks.push(match non_blank(&entry.hq_location) {
        Some(location) => format!("_{location}_"),
        None => "_Location: unknown_".to_string(),
    });
    blocks.push(format!(
        "**Stage:** {} · **Team Size:** {}",
        or_unknown(&entry.stage),
        or_unknown(&entry.team_size)
    ));
    blocks.push(format!("**Core Product:** {}", or_unknown(&entry.core_product)));

    if !entry.founders.is_empty() {
        let mut lines = vec!["**Founders and mentality**".to_string()];
        for founder in &entry.founders {
            lines.push(format!(
                "- {}: {}",
                or_unknown(&founder.name),
                or_unknown(&founder.background)
            ));
            if let Some(notes) = non_blank(&founder.mentality_notes).filter(|n| *n != "—") {
                lines.push(format!("  - Mentality: {notes}"));
            }
        }
        blocks.push(lines.join("\n"));
    }

    let oss = &entry.open_source_involvement;
    let mut lines = vec![format!("**Open Source:** {}", oss.level.as_str())];
    if oss.repos.is_empty() {
        lines.push("No repos listed.".to_string());
    }
    for repo in &oss.repos {
        let name = non_blank(&repo.name).unwrap_or("repo");
        lines.push(match non_blank(&repo.url) {
            Some(url) => format!("- {name}: {url}"),
            None => format!("- {name}"),
        });
    }
    blocks.push(lines.join("\n"));

    blocks.push(format!(
        "**Why aligned:** {}",
        non_blank(&entry.why_aligned).unwrap_or("—")
    ));

    if !entry.suggested_roles.is_empty() {
        blocks.push(format!(
            "**Suggested roles:** {}",
            entry.suggested_roles.join(", ")
        ));
    }

    if let Some(outreach) = non_blank(&entry.example_outreach) {
        blocks.push(format!("**Example outreach**\n{}", fenced(outreach, "text")));
    }

    if !entry.sources.is_empty() {
        let mut lines = vec!["**Sources / Links**".to_string()];
        for source in &entry.sources {
            let label = non_blank(&source.label).unwrap_or("link");
            let url = non_blank(&source.url).unwrap_or("(unknown)");
            lines.push(format!("- {label}: {url}"));
        }
        blocks.push(lines.join("\n"));
    }

    if let Some(confidence) = entry.clamped_confidence() {
        blocks.push(format!("**Confidence:** `{}`", confidence_bar(confidence)));
    }

    blocks.join("\n\n")
}

/// Fallback view when the reply did not decode. The raw text is reproduced unchanged.
pub fn render_unparsed(raw_text: &str) -> String {
    format!(
        "**Failed to parse the model response as JSON. Showing raw output below.**\n\n{}\n",
        fenced(raw_text, "text")
    )
}

/// A fixed-width text bar, e.g. `[███████░░░] 0.73`. Out-of-range values are clamped.
pub fn confidence_bar(value: f64) -> String {
    let value = clamp_confidence(value);
    let filled = (value * CONFIDENCE_CELLS as f64).round() as usize;
    format!(
        "[{}{}] {value:.2}",
        "█".repeat(filled),
        "░".repeat(CONFIDENCE_CELLS - filled)
    )
}

/// RFC 3339 timestamps are shown in UTC; anything else verbatim.
fn format_generated_at(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| {
            ts.with_timezone(&chrono::Utc)
                .format("%Y-%m-%d %H:%M UTC")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn or_unknown(value: &str) -> &str {
    non_blank(value).unwrap_or("unknown")
}

fn quote(text: &str) -> String {
    text.lines()
        .map(|line| format!("> {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wraps `body` in a code fence longer than any backtick run inside it.
fn fenced(body: &str, lang: &str) -> String {
    let longest_run = body
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run.max(2) + 1);
    format!("{fence}{lang}\n{body}\n{fence}")
}
