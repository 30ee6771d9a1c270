//! Content Generation — orchestrates one request end to end.
//!
//! Flow: validate input → compose system prompt → completion call →
//!       normalize response → format Figma block → return.
//!
//! Stateless: the only thing carried between calls is the caller's credential,
//! and that is passed in explicitly each time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::content_type::{ContentType, CtaType};
use crate::generation::figma_block::{format_figma_block, BlockMetadata};
use crate::generation::normalizer::{normalize_response, GeneratedContent};
use crate::generation::prompts::compose_system_prompt;
use crate::llm_client::{ApiKey, CompletionService};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Request body for content generation.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleRequest {
    pub article_text: String,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub is_breaking: bool,
    #[serde(default)]
    pub use_cta: bool,
    #[serde(default)]
    pub cta_type: Option<CtaType>,
    #[serde(default)]
    pub custom_instructions: String,
    /// Overrides the server's default key for this request only.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Response from the generation pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutput {
    pub generation_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub content_type: ContentType,
    pub content: GeneratedContent,
    pub figma_block: String,
}

impl ArticleRequest {
    /// Block metadata with toggles that don't apply to this content type switched off.
    fn block_metadata(&self) -> BlockMetadata {
        let profile = self.content_type.profile();
        let use_cta = profile.includes_cta && self.use_cta;
        BlockMetadata {
            content_type: self.content_type,
            is_breaking: profile.honors_breaking && self.is_breaking,
            use_cta,
            cta_type: self.cta_type.filter(|_| use_cta),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full pipeline for one article.
///
/// Input problems are reported as `MissingInput` before any network call.
/// Completion failures come back as `Transport`, unparseable output as
/// `MalformedResponse`. No retries.
pub async fn generate_content(
    completion: &dyn CompletionService,
    default_api_key: Option<&str>,
    request: ArticleRequest,
) -> Result<GenerationOutput, AppError> {
    // Step 1: Validate input
    let api_key = ApiKey::resolve(request.api_key.as_deref(), default_api_key)?;

    if request.article_text.trim().is_empty() {
        return Err(AppError::MissingInput(
            "Please provide a news article".to_string(),
        ));
    }

    let meta = request.block_metadata();
    if meta.use_cta && meta.cta_type.is_none() {
        return Err(AppError::MissingInput(
            "cta_type is required when use_cta is true".to_string(),
        ));
    }

    let generation_id = Uuid::new_v4();
    info!(
        "Generating {} content {} (article: {} chars, breaking: {})",
        request.content_type.as_str(),
        generation_id,
        request.article_text.chars().count(),
        meta.is_breaking
    );

    // Step 2: Compose system prompt
    let system_prompt = compose_system_prompt(
        request.content_type,
        meta.is_breaking,
        &request.custom_instructions,
    );

    // Step 3: Completion call
    let raw_text = completion
        .complete(
            &api_key,
            &system_prompt,
            &request.article_text,
            request.content_type.profile().json_mode,
        )
        .await?;
    info!(
        "Completion for {} returned {} chars",
        generation_id,
        raw_text.chars().count()
    );

    // Step 4: Normalize
    let content = normalize_response(&raw_text, request.content_type, meta.is_breaking)?;

    // Step 5: Format
    let figma_block = format_figma_block(&content, &meta);
    info!(
        "Generated {} content {} ({} block lines, {} chars)",
        request.content_type.as_str(),
        generation_id,
        figma_block.lines().count(),
        figma_block.chars().count()
    );

    Ok(GenerationOutput {
        generation_id,
        generated_at: Utc::now(),
        content_type: request.content_type,
        content,
        figma_block,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
