use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::Value;

pub const EXPORT_FILE_NAME: &str = "startup_curation.json";

/// The downloadable copy of a decoded curation document. Write-only: nothing
/// in the service reads it back.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub content: String,
}

impl ExportArtifact {
    /// Serializes the document as indented JSON.
    pub fn from_document(document: &Value) -> Result<Self, serde_json::Error> {
        Ok(Self {
            file_name: EXPORT_FILE_NAME,
            content: serde_json::to_string_pretty(document)?,
        })
    }
}

impl IntoResponse for ExportArtifact {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, "application/json".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.file_name),
                ),
            ],
            self.content,
        )
            .into_response()
    }
}
