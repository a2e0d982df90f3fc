//! Axum route handlers for the Curation API.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::curation::pipeline::{run_curation, CurationOutcome, CurationRequest, GenerationSettings};
use crate::errors::AppError;
use crate::llm_client::{ApiKey, ModelChoice};
use crate::models::profile::{CandidateProfile, Preferences};
use crate::render::{render_curation, render_unparsed, ExportArtifact};
use crate::state::AppState;

/// Per-request credential override. Used for this call only, never stored or logged.
pub const API_KEY_HEADER: &str = "x-openai-key";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
    Download,
}

#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct ParseErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CurationResponse {
    Curated {
        curation_id: Uuid,
        model: ModelChoice,
        requested_count: u8,
        returned_count: usize,
        document: Value,
        markdown: String,
    },
    Unparsed {
        curation_id: Uuid,
        model: ModelChoice,
        requested_count: u8,
        error: ParseErrorBody,
        raw_text: String,
        markdown: String,
    },
}

#[derive(Debug, Serialize)]
pub struct PromptPreviewResponse {
    pub profile: CandidateProfile,
    pub preferences: Preferences,
    pub provided_companies: Vec<String>,
    pub settings: GenerationSettings,
    pub prompt: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/curations
///
/// The generate action: build prompt → one completion call → normalize → render.
/// `?format=json` (default) returns the document and its Markdown view,
/// `?format=markdown` the view alone, `?format=download` the export artifact.
pub async fn handle_curate(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
    headers: HeaderMap,
    payload: Result<Json<CurationRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let curation_id = Uuid::new_v4();
    let Json(request) = payload
        .map_err(AppError::from)
        .inspect_err(|e| warn!("Curation {curation_id} rejected: {e}"))?;
    let api_key = resolve_credential(&headers, state.config.openai_api_key.as_ref());

    let outcome = run_curation(
        state.llm.as_ref(),
        api_key.as_ref(),
        &request,
        state.config.max_tokens,
    )
    .await
    .inspect_err(|e| warn!("Curation {curation_id} failed: {e}"))?;

    let model = request.settings.model;
    let requested_count = request.settings.top_n;

    match outcome {
        CurationOutcome::Curated(decoded) => {
            let returned_count = decoded.document.startups.len();
            info!("Curation {curation_id} ready: {returned_count} startups");

            match query.format {
                OutputFormat::Download => {
                    let artifact = ExportArtifact::from_document(&decoded.raw).map_err(|e| {
                        AppError::Internal(anyhow::anyhow!("Failed to serialize export: {e}"))
                    })?;
                    Ok(artifact.into_response())
                }
                OutputFormat::Markdown => Ok(markdown_response(render_curation(&decoded.document))),
                OutputFormat::Json => Ok(Json(CurationResponse::Curated {
                    curation_id,
                    model,
                    requested_count,
                    returned_count,
                    markdown: render_curation(&decoded.document),
                    document: decoded.raw,
                })
                .into_response()),
            }
        }
        CurationOutcome::Unparsed { raw_text, reason } => {
            info!("Curation {curation_id} returned unparsed output");

            match query.format {
                OutputFormat::Download => Err(AppError::ParseFailure {
                    message: reason.to_string(),
                    raw_text,
                }),
                OutputFormat::Markdown => Ok(markdown_response(render_unparsed(&raw_text))),
                OutputFormat::Json => Ok(Json(CurationResponse::Unparsed {
                    curation_id,
                    model,
                    requested_count,
                    error: ParseErrorBody {
                        code: "PARSE_FAILURE",
                        message: format!("Failed to parse the model response as JSON: {reason}"),
                    },
                    markdown: render_unparsed(&raw_text),
                    raw_text,
                })
                .into_response()),
            }
        }
    }
}

/// POST /api/v1/curations/prompt
///
/// Returns the normalized inputs and the exact prompt the generate action would
/// send, without calling the provider.
pub async fn handle_preview_prompt(
    payload: Result<Json<CurationRequest>, JsonRejection>,
) -> Result<Json<PromptPreviewResponse>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let prompt = request.build_prompt();
    let provided_companies = request.companies();

    Ok(Json(PromptPreviewResponse {
        profile: request.profile,
        preferences: request.preferences,
        provided_companies,
        settings: request.settings,
        prompt,
    }))
}

/// A non-blank header value wins; otherwise the configured key, if any.
pub fn resolve_credential(headers: &HeaderMap, configured: Option<&ApiKey>) -> Option<ApiKey> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ApiKey::new)
        .or_else(|| configured.cloned())
}

fn markdown_response(body: String) -> Response {
    (
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        body,
    )
        .into_response()
}
