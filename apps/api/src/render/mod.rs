// Presentation layer: Markdown view of a curation and the JSON export artifact.

pub mod export;
pub mod markdown;

pub use export::ExportArtifact;
pub use markdown::{render_curation, render_unparsed};
