//! Curation pipeline: the single generate action.
//!
//! Flow: validate → credential check → build prompt → one completion call →
//! normalize. Nothing is retried; every error ends the attempt.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::curation::normalizer::{normalize_response, DecodedCuration, ParseFailure};
use crate::curation::prompt_builder::build_user_prompt;
use crate::errors::AppError;
use crate::llm_client::{ApiKey, CompletionProvider, CompletionRequest, ModelChoice};
use crate::models::profile::{parse_company_list, CandidateProfile, Preferences};

pub const TOP_N_RANGE: RangeInclusive<u8> = 3..=15;
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=1.0;
const DEFAULT_TOP_N: u8 = 8;
const DEFAULT_TEMPERATURE: f32 = 0.4;

// ────────────────────────────────────────────────────────────────────────────
// Request model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub model: ModelChoice,
    pub top_n: u8,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: ModelChoice::default(),
            top_n: DEFAULT_TOP_N,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Everything the form collects, built once before the pipeline runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurationRequest {
    pub profile: CandidateProfile,
    pub preferences: Preferences,
    /// One company per line.
    pub provided_companies: String,
    pub settings: GenerationSettings,
}

impl CurationRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if !TOP_N_RANGE.contains(&self.settings.top_n) {
            return Err(AppError::Validation(format!(
                "top_n must be between {} and {}, got {}",
                TOP_N_RANGE.start(),
                TOP_N_RANGE.end(),
                self.settings.top_n
            )));
        }
        if !TEMPERATURE_RANGE.contains(&self.settings.temperature) {
            return Err(AppError::Validation(format!(
                "temperature must be between {:.1} and {:.1}, got {}",
                TEMPERATURE_RANGE.start(),
                TEMPERATURE_RANGE.end(),
                self.settings.temperature
            )));
        }
        Ok(())
    }

    pub fn companies(&self) -> Vec<String> {
        parse_company_list(&self.provided_companies)
    }

    pub fn build_prompt(&self) -> String {
        build_user_prompt(
            &self.profile,
            &self.preferences,
            &self.companies(),
            self.settings.top_n,
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Outcome
// ────────────────────────────────────────────────────────────────────────────

/// Result of a generate action that reached the provider.
#[derive(Debug)]
pub enum CurationOutcome {
    Curated(DecodedCuration),
    /// The reply did not decode; `raw_text` is the unstripped completion.
    Unparsed {
        raw_text: String,
        reason: ParseFailure,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs one generate action against `provider`.
///
/// `MissingCredential` and validation errors are returned before any network
/// call. Provider failures become `AppError::Provider`. A reply that does not
/// decode is not an error here: it comes back as `CurationOutcome::Unparsed`.
pub async fn run_curation(
    provider: &dyn CompletionProvider,
    api_key: Option<&ApiKey>,
    request: &CurationRequest,
    max_tokens: u32,
) -> Result<CurationOutcome, AppError> {
    request.validate()?;
    let api_key = api_key.ok_or(AppError::MissingCredential)?;

    let prompt = request.build_prompt();
    info!(
        "Requesting {} startups from {} (temperature {:.1})",
        request.settings.top_n, request.settings.model, request.settings.temperature
    );

    let completion = CompletionRequest {
        model: request.settings.model,
        prompt: &prompt,
        temperature: request.settings.temperature,
        max_tokens,
    };
    let raw_text = provider
        .complete(api_key, &completion)
        .await
        .map_err(|e| AppError::Provider(e.to_string()))?;

    match normalize_response(&raw_text) {
        Ok(decoded) => {
            let returned = decoded.document.startups.len();
            if returned != usize::from(request.settings.top_n) {
                info!(
                    "Model returned {returned} startups ({} requested)",
                    request.settings.top_n
                );
            }
            Ok(CurationOutcome::Curated(decoded))
        }
        Err(reason) => {
            warn!("Model response did not decode: {reason}");
            Ok(CurationOutcome::Unparsed { raw_text, reason })
        }
    }
}
