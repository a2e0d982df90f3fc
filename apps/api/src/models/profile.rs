use std::fmt;

use serde::{Deserialize, Serialize};

/// The candidate's professional profile. Every field is free text and optional;
/// blank values render as a fallback token in the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    pub name: String,
    pub headline: String,
    pub skills: String,
    pub interests: String,
    pub values: String,
    pub links: String,
}

/// Funding stage the candidate prefers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    Any,
    #[serde(rename = "pre-seed")]
    PreSeed,
    #[serde(rename = "seed")]
    Seed,
    #[serde(rename = "series-a")]
    SeriesA,
    #[serde(rename = "series-b")]
    SeriesB,
    #[serde(rename = "growth")]
    Growth,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Any => "Any",
            Stage::PreSeed => "pre-seed",
            Stage::Seed => "seed",
            Stage::SeriesA => "series-a",
            Stage::SeriesB => "series-b",
            Stage::Growth => "growth",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much the candidate weighs open-source involvement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OssImportance {
    Low,
    #[default]
    Neutral,
    High,
}

impl OssImportance {
    pub fn as_str(&self) -> &'static str {
        match self {
            OssImportance::Low => "Low",
            OssImportance::Neutral => "Neutral",
            OssImportance::High => "High",
        }
    }
}

impl fmt::Display for OssImportance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search preferences and filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub sectors: String,
    pub stage: Option<Stage>,
    pub team_size: String,
    pub location: String,
    pub oss_importance: Option<OssImportance>,
    pub other: String,
    pub exclude: String,
    pub geo: String,
}

/// Splits a free-text vetting list into company names, one per line.
/// Lines are trimmed and blank lines dropped.
pub fn parse_company_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_company_list_trims_and_drops_blanks() {
        let raw = "  Acme Robotics \n\n\tOxide Computer\n   \nZed Industries";
        assert_eq!(
            parse_company_list(raw),
            vec!["Acme Robotics", "Oxide Computer", "Zed Industries"]
        );
    }

    #[test]
    fn test_parse_company_list_empty() {
        assert!(parse_company_list("").is_empty());
        assert!(parse_company_list("\n  \n").is_empty());
    }

    #[test]
    fn test_stage_serde_uses_hyphenated_names() {
        let stage: Stage = serde_json::from_str("\"series-a\"").unwrap();
        assert_eq!(stage, Stage::SeriesA);
        let any: Stage = serde_json::from_str("\"Any\"").unwrap();
        assert_eq!(any, Stage::Any);
        assert_eq!(serde_json::to_string(&Stage::PreSeed).unwrap(), "\"pre-seed\"");
    }

    #[test]
    fn test_oss_importance_default_is_neutral() {
        assert_eq!(OssImportance::default(), OssImportance::Neutral);
        let high: OssImportance = serde_json::from_str("\"High\"").unwrap();
        assert_eq!(high.to_string(), "High");
    }

    #[test]
    fn test_preferences_missing_fields_default() {
        let prefs: Preferences = serde_json::from_str(r#"{"sectors": "DevTools"}"#).unwrap();
        assert_eq!(prefs.sectors, "DevTools");
        assert!(prefs.stage.is_none());
        assert!(prefs.oss_importance.is_none());
        assert!(prefs.exclude.is_empty());
    }

    #[test]
    fn test_profile_accepts_empty_object() {
        let profile: CandidateProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, CandidateProfile::default());
    }
}
