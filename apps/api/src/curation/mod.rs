// Startup curation: prompt building, response normalization, and the generate action.
// The only provider call goes through llm_client.

pub mod handlers;
pub mod normalizer;
pub mod pipeline;
pub mod prompt_builder;
pub mod prompts;
