//! Prompt Builder: turns a profile, preferences, and vetting list into the
//! single instruction string sent as the user message.
//!
//! Pure and deterministic: identical inputs always produce the identical string.

use crate::curation::prompts::CURATION_PROMPT_TEMPLATE;
use crate::models::profile::{CandidateProfile, OssImportance, Preferences, Stage};

/// Rendered for blank profile fields.
pub const PROFILE_FALLBACK: &str = "N/A";
/// Rendered for blank filter-style preferences.
pub const ANY_FALLBACK: &str = "Any";
/// Rendered for blank exclude/other fields and an empty vetting list.
pub const NONE_FALLBACK: &str = "None";

/// Builds the curation prompt for `top_n` startups.
pub fn build_user_prompt(
    profile: &CandidateProfile,
    prefs: &Preferences,
    provided_companies: &[String],
    top_n: u8,
) -> String {
    let stage = prefs.stage.unwrap_or(Stage::Any);
    let oss_importance = prefs.oss_importance.unwrap_or(OssImportance::Neutral);
    let companies = render_company_list(provided_companies);
    let top_n = top_n.to_string();

    let values: [(&str, &str); 16] = [
        ("name", or_fallback(&profile.name, PROFILE_FALLBACK)),
        ("headline", or_fallback(&profile.headline, PROFILE_FALLBACK)),
        ("skills", or_fallback(&profile.skills, PROFILE_FALLBACK)),
        ("interests", or_fallback(&profile.interests, PROFILE_FALLBACK)),
        ("values", or_fallback(&profile.values, PROFILE_FALLBACK)),
        ("links", or_fallback(&profile.links, PROFILE_FALLBACK)),
        ("sectors", or_fallback(&prefs.sectors, ANY_FALLBACK)),
        ("stage", stage.as_str()),
        ("team_size", or_fallback(&prefs.team_size, ANY_FALLBACK)),
        ("location", or_fallback(&prefs.location, ANY_FALLBACK)),
        ("oss_importance", oss_importance.as_str()),
        ("other", or_fallback(&prefs.other, NONE_FALLBACK)),
        ("exclude", or_fallback(&prefs.exclude, NONE_FALLBACK)),
        ("geo", or_fallback(&prefs.geo, ANY_FALLBACK)),
        ("provided_companies", companies.as_str()),
        ("top_n", top_n.as_str()),
    ];

    fill_template(CURATION_PROMPT_TEMPLATE, &values)
        .trim()
        .to_string()
}

/// Trimmed value, or the fallback token when the value is blank.
fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

/// The vetting list as a JSON array of names, or the `None` marker.
/// JSON keeps names with quotes or commas unambiguous for the model.
fn render_company_list(companies: &[String]) -> String {
    if companies.is_empty() {
        NONE_FALLBACK.to_string()
    } else {
        serde_json::Value::from(companies.to_vec()).to_string()
    }
}

/// Replaces `{key}` tokens in one left-to-right pass. Substituted text is never
/// rescanned, and braces that do not wrap a known key are copied as-is.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 512);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substitution = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (close, *value))
        });

        match substitution {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_with<'a>(prompt: &'a str, label: &str) -> &'a str {
        prompt
            .lines()
            .find(|l| l.trim_start().starts_with(label))
            .unwrap_or_else(|| panic!("no line starting with {label:?}"))
            .trim()
    }

    #[test]
    fn test_headline_only_scenario() {
        let profile = CandidateProfile {
            headline: "ML Engineer".to_string(),
            ..Default::default()
        };
        let prompt = build_user_prompt(&profile, &Preferences::default(), &[], 5);

        assert_eq!(line_with(&prompt, "- Headline/Role:"), "- Headline/Role: ML Engineer");
        assert_eq!(line_with(&prompt, "- Name:"), "- Name: N/A");
        assert_eq!(line_with(&prompt, "- Skills/Tech:"), "- Skills/Tech: N/A");
        assert_eq!(line_with(&prompt, "- Interests/Theses:"), "- Interests/Theses: N/A");
        assert_eq!(line_with(&prompt, "- Values/Culture:"), "- Values/Culture: N/A");
        assert_eq!(
            line_with(&prompt, "- Notable Links"),
            "- Notable Links (GitHub/Portfolio/LinkedIn): N/A"
        );
        assert_eq!(line_with(&prompt, "- Sectors/Problem Areas:"), "- Sectors/Problem Areas: Any");
        assert_eq!(line_with(&prompt, "- Stage Preference:"), "- Stage Preference: Any");
        assert_eq!(line_with(&prompt, "- Team Size Range:"), "- Team Size Range: Any");
        assert_eq!(line_with(&prompt, "- Location/Remote:"), "- Location/Remote: Any");
        assert_eq!(line_with(&prompt, "- Geographic Focus:"), "- Geographic Focus: Any");
        assert_eq!(
            line_with(&prompt, "- Open-Source Importance:"),
            "- Open-Source Importance: Neutral"
        );
        assert_eq!(line_with(&prompt, "- Other Constraints:"), "- Other Constraints: None");
        assert_eq!(line_with(&prompt, "- Exclude Companies:"), "- Exclude Companies: None");
        assert!(prompt.contains("- Provided companies to vet (optional):\n  None\n"));
        assert!(prompt.contains("Limit the list to exactly 5 startups."));
    }

    #[test]
    fn test_every_non_blank_field_is_embedded_verbatim() {
        let profile = CandidateProfile {
            name: "Grace Hopper".to_string(),
            headline: "Compiler Engineer".to_string(),
            skills: "Rust, COBOL, LLVM".to_string(),
            interests: "devtools, OSS infra".to_string(),
            values: "product-first, frugal".to_string(),
            links: "https://github.com/grace".to_string(),
        };
        let prefs = Preferences {
            sectors: "Developer Tools".to_string(),
            stage: Some(Stage::SeriesA),
            team_size: "5-50".to_string(),
            location: "Remote-first".to_string(),
            oss_importance: Some(OssImportance::High),
            other: "Needs visa sponsorship".to_string(),
            exclude: "MegaCorp, Initech".to_string(),
            geo: "EU".to_string(),
        };
        let companies = vec!["Oxide Computer".to_string(), "Zed Industries".to_string()];
        let prompt = build_user_prompt(&profile, &prefs, &companies, 12);

        for value in [
            "Grace Hopper",
            "Compiler Engineer",
            "Rust, COBOL, LLVM",
            "devtools, OSS infra",
            "product-first, frugal",
            "https://github.com/grace",
            "Developer Tools",
            "series-a",
            "5-50",
            "Remote-first",
            "High",
            "Needs visa sponsorship",
            "MegaCorp, Initech",
            "EU",
            r#"["Oxide Computer","Zed Industries"]"#,
            "exactly 12 startups",
        ] {
            assert!(prompt.contains(value), "prompt is missing {value:?}");
        }
        assert!(!prompt.contains("N/A"));
    }

    #[test]
    fn test_whitespace_only_fields_use_fallbacks() {
        let profile = CandidateProfile {
            name: "   ".to_string(),
            ..Default::default()
        };
        let prefs = Preferences {
            exclude: "\n\t".to_string(),
            ..Default::default()
        };
        let prompt = build_user_prompt(&profile, &prefs, &[], 3);
        assert_eq!(line_with(&prompt, "- Name:"), "- Name: N/A");
        assert_eq!(line_with(&prompt, "- Exclude Companies:"), "- Exclude Companies: None");
    }

    #[test]
    fn test_explicit_any_stage_renders_any() {
        let prefs = Preferences {
            stage: Some(Stage::Any),
            ..Default::default()
        };
        let prompt = build_user_prompt(&CandidateProfile::default(), &prefs, &[], 8);
        assert_eq!(line_with(&prompt, "- Stage Preference:"), "- Stage Preference: Any");
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let profile = CandidateProfile {
            skills: "Go, Kubernetes".to_string(),
            ..Default::default()
        };
        let prefs = Preferences {
            sectors: "Security".to_string(),
            ..Default::default()
        };
        let companies = vec!["Acme".to_string()];
        let a = build_user_prompt(&profile, &prefs, &companies, 7);
        let b = build_user_prompt(&profile, &prefs, &companies, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_schema_and_output_rules_are_embedded() {
        let prompt = build_user_prompt(&CandidateProfile::default(), &Preferences::default(), &[], 8);
        assert!(prompt.starts_with("You are a startup-curation research agent."));
        assert!(prompt.contains("Return ONLY valid, minified JSON (no comments, no markdown fences)."));
        assert!(prompt.contains("Do NOT invent links."));
        assert!(prompt.contains(r#""level": "<none|partial|core|unknown>""#));
        assert!(prompt.contains(r#""stage": "<pre-seed|seed|series-a|series-b|growth|unknown>""#));
        assert!(prompt.contains(r#"{"name": "<repo name>", "url": "<repo url>"}"#));
        assert!(prompt.contains(r#""confidence": <float between 0 and 1>"#));
        assert!(prompt.contains("Ensure diversity of choices while adhering to preferences."));
        assert!(prompt.contains("prioritize vetting and ranking them"));
    }

    #[test]
    fn test_user_text_with_placeholder_tokens_is_not_expanded() {
        let profile = CandidateProfile {
            name: "{top_n} {skills}".to_string(),
            ..Default::default()
        };
        let prompt = build_user_prompt(&profile, &Preferences::default(), &[], 4);
        assert_eq!(line_with(&prompt, "- Name:"), "- Name: {top_n} {skills}");
    }

    #[test]
    fn test_fill_template_leaves_unknown_braces() {
        let filled = fill_template("{a} {\"b\": {c}} {", &[("a", "1"), ("c", "3")]);
        assert_eq!(filled, "1 {\"b\": 3} {");
    }
}
