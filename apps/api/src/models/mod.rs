pub mod curation;
pub mod profile;
