// Article → Figma block generation.
// Implements: prompt composition, completion call, response normalization, block formatting.
// All LLM calls go through llm_client.

pub mod content_type;
pub mod figma_block;
pub mod generator;
pub mod handlers;
pub mod normalizer;
pub mod prompts;
