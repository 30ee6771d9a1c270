//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::content_type::ContentType;
use crate::generation::figma_block::{parse_figma_block, FigmaFields};
use crate::generation::generator::{generate_content, ArticleRequest, GenerationOutput};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ContentTypeInfo {
    pub content_type: ContentType,
    pub includes_instagram: bool,
    pub includes_cta: bool,
    pub honors_breaking: bool,
}

#[derive(Debug, Deserialize)]
pub struct ParseBlockRequest {
    pub block: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/content-types
///
/// Lists the content types and which optional fields each one carries.
pub async fn handle_content_types() -> Json<Vec<ContentTypeInfo>> {
    Json(
        ContentType::ALL
            .into_iter()
            .map(|content_type| {
                let profile = content_type.profile();
                ContentTypeInfo {
                    content_type,
                    includes_instagram: profile.includes_instagram,
                    includes_cta: profile.includes_cta,
                    honors_breaking: profile.honors_breaking,
                }
            })
            .collect(),
    )
}

/// POST /api/v1/generate
///
/// Full pipeline: compose prompt → completion → normalize → Figma block.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<ArticleRequest>,
) -> Result<Json<GenerationOutput>, AppError> {
    let output = generate_content(
        state.completion.as_ref(),
        state.config.openai_api_key.as_deref(),
        request,
    )
    .await?;

    Ok(Json(output))
}

/// POST /api/v1/figma-block/parse
///
/// Reads a block back the way the plugin does. Useful for checking a block
/// before pasting it.
pub async fn handle_parse_block(
    Json(request): Json<ParseBlockRequest>,
) -> Result<Json<FigmaFields>, AppError> {
    Ok(Json(parse_figma_block(&request.block)?))
}
