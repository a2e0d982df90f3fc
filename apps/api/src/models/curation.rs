//! The curation document returned by the model.
//!
//! Decoding is all-or-nothing only at the top level (see `curation::normalizer`).
//! Below that, every field is filled once at decode time: missing or
//! wrong-typed values become their defaults, and list elements that are not
//! objects are dropped. Rendering code can then read plain fields.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurationResult {
    #[serde(deserialize_with = "lenient::text")]
    pub generated_at: String,
    #[serde(deserialize_with = "lenient::text")]
    pub query_summary: String,
    #[serde(deserialize_with = "lenient::records")]
    pub startups: Vec<StartupEntry>,
    #[serde(deserialize_with = "lenient::text")]
    pub notes: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub next_actions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupEntry {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub website: String,
    #[serde(deserialize_with = "lenient::text")]
    pub hq_location: String,
    /// `pre-seed|seed|series-a|series-b|growth|unknown`, kept verbatim for display.
    #[serde(deserialize_with = "lenient::text")]
    pub stage: String,
    #[serde(deserialize_with = "lenient::text")]
    pub team_size: String,
    #[serde(deserialize_with = "lenient::text")]
    pub core_product: String,
    #[serde(deserialize_with = "lenient::records")]
    pub founders: Vec<Founder>,
    #[serde(deserialize_with = "lenient::record")]
    pub open_source_involvement: OpenSourceInvolvement,
    #[serde(deserialize_with = "lenient::text")]
    pub why_aligned: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub suggested_roles: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub example_outreach: String,
    #[serde(deserialize_with = "lenient::records")]
    pub sources: Vec<SourceLink>,
    #[serde(deserialize_with = "lenient::number")]
    pub confidence: Option<f64>,
}

impl StartupEntry {
    /// Confidence forced into [0, 1]; `None` when the model gave no number.
    pub fn clamped_confidence(&self) -> Option<f64> {
        self.confidence.map(clamp_confidence)
    }
}

pub fn clamp_confidence(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Founder {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub background: String,
    #[serde(deserialize_with = "lenient::text")]
    pub mentality_notes: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OssLevel {
    None,
    Partial,
    Core,
    #[default]
    Unknown,
}

impl OssLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OssLevel::None => "none",
            OssLevel::Partial => "partial",
            OssLevel::Core => "core",
            OssLevel::Unknown => "unknown",
        }
    }
}

impl<'de> Deserialize<'de> for OssLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient::text(deserializer)?;
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "none" => OssLevel::None,
            "partial" => OssLevel::Partial,
            "core" => OssLevel::Core,
            _ => OssLevel::Unknown,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenSourceInvolvement {
    pub level: OssLevel,
    #[serde(deserialize_with = "lenient::records")]
    pub repos: Vec<RepoRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoRef {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceLink {
    #[serde(deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(deserialize_with = "lenient::text")]
    pub url: String,
}

/// Field deserializers that never fail on a well-formed JSON value.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Strings pass through, numbers become their text form, anything else is empty.
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        })
    }

    pub fn text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        })
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(Value::deserialize(deserializer)?.as_f64())
    }

    pub fn record<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(deserializer)? {
            value @ Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => T::default(),
        })
    }

    pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_confidence_clamping() {
        let cases = [(-0.5, 0.0), (0.0, 0.0), (0.73, 0.73), (1.0, 1.0), (2.0, 1.0)];
        for (input, expected) in cases {
            let entry = StartupEntry {
                confidence: Some(input),
                ..Default::default()
            };
            assert_eq!(entry.clamped_confidence(), Some(expected), "input {input}");
        }
    }

    #[test]
    fn test_missing_confidence_stays_none() {
        let entry: StartupEntry = serde_json::from_value(json!({"name": "Acme"})).unwrap();
        assert_eq!(entry.clamped_confidence(), None);
    }

    #[test]
    fn test_non_numeric_confidence_is_none() {
        let entry: StartupEntry =
            serde_json::from_value(json!({"confidence": "very high"})).unwrap();
        assert!(entry.confidence.is_none());
    }

    #[test]
    fn test_missing_founders_key_gives_empty_list() {
        let entry: StartupEntry = serde_json::from_value(json!({
            "name": "Acme",
            "website": "https://acme.dev"
        }))
        .unwrap();
        assert!(entry.founders.is_empty());
        assert!(entry.sources.is_empty());
        assert_eq!(entry.open_source_involvement.level, OssLevel::Unknown);
    }

    #[test]
    fn test_wrong_typed_nested_fields_fall_back_to_defaults() {
        let entry: StartupEntry = serde_json::from_value(json!({
            "name": ["not", "a", "string"],
            "founders": "Jane and John",
            "open_source_involvement": "lots",
            "suggested_roles": ["Backend Engineer", 42, null],
            "sources": [{"label": "website"}, "https://example.com"],
            "team_size": 25,
            "hq_location": null
        }))
        .unwrap();
        assert_eq!(entry.name, "");
        assert!(entry.founders.is_empty());
        assert_eq!(entry.open_source_involvement, OpenSourceInvolvement::default());
        assert_eq!(entry.suggested_roles, vec!["Backend Engineer"]);
        assert_eq!(entry.sources.len(), 1);
        assert_eq!(entry.sources[0].label, "website");
        assert_eq!(entry.sources[0].url, "");
        assert_eq!(entry.team_size, "25");
        assert_eq!(entry.hq_location, "");
    }

    #[test]
    fn test_oss_level_parsing_is_forgiving() {
        let oss: OpenSourceInvolvement = serde_json::from_value(json!({
            "level": "Core",
            "repos": [{"name": "engine", "url": "https://github.com/acme/engine"}]
        }))
        .unwrap();
        assert_eq!(oss.level, OssLevel::Core);
        assert_eq!(oss.repos[0].name, "engine");

        let odd: OpenSourceInvolvement =
            serde_json::from_value(json!({"level": "mostly"})).unwrap();
        assert_eq!(odd.level, OssLevel::Unknown);

        let wrong: OpenSourceInvolvement = serde_json::from_value(json!({"level": 3})).unwrap();
        assert_eq!(wrong.level, OssLevel::Unknown);
    }

    #[test]
    fn test_oss_level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&OssLevel::Partial).unwrap(), "\"partial\"");
    }

    #[test]
    fn test_full_document_deserializes() {
        let doc: CurationResult = serde_json::from_value(json!({
            "generated_at": "2024-05-01T12:00:00Z",
            "query_summary": "ML engineer seeking OSS-heavy infra startups",
            "startups": [{
                "name": "Acme",
                "website": "https://acme.dev",
                "hq_location": "Berlin",
                "stage": "seed",
                "team_size": "10-20",
                "core_product": "Vector database",
                "founders": [{"name": "Ada", "background": "ex-Google", "mentality_notes": "builder"}],
                "open_source_involvement": {"level": "core", "repos": []},
                "why_aligned": "Matches Rust + ML interests",
                "suggested_roles": ["ML Engineer"],
                "example_outreach": "Hi Ada",
                "sources": [{"label": "website", "url": "https://acme.dev"}],
                "confidence": 0.8
            }],
            "notes": "Validate funding.",
            "next_actions": ["Email Ada"]
        }))
        .unwrap();
        assert_eq!(doc.startups.len(), 1);
        assert_eq!(doc.startups[0].founders[0].mentality_notes, "builder");
        assert_eq!(doc.next_actions, vec!["Email Ada"]);
    }
}
