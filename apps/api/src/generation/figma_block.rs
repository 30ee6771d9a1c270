//! The sentinel-delimited `KEY: value` block pasted into the Figma plugin.
//!
//! ```text
//! DUB_NEWS_DATA_START
//! CONTENT_TYPE: <post|story|market_recap>
//! TEMPLATE_TYPE: <breaking|non-breaking|default>
//! HEADLINE: <text>
//! BODY: <text>
//! [INSTAGRAM: <text>]        post, market_recap only
//! [SOURCE: <text>]           when non-empty
//! [USE_CTA: <true|false>]    post, market_recap only
//! [CTA_TYPE: <type>]         only if USE_CTA is true
//! DUB_NEWS_DATA_END
//! ```
//!
//! The plugin's format must be reproduced byte-for-byte, so values are NOT
//! escaped. Known limitation: a value containing a sentinel line, or a line
//! starting with one of the keys below, corrupts the block when read back.

use serde::Serialize;
use thiserror::Error;

use crate::generation::content_type::{ContentType, CtaType};
use crate::generation::normalizer::GeneratedContent;

pub const BLOCK_START: &str = "DUB_NEWS_DATA_START";
pub const BLOCK_END: &str = "DUB_NEWS_DATA_END";

const KEY_CONTENT_TYPE: &str = "CONTENT_TYPE";
const KEY_TEMPLATE_TYPE: &str = "TEMPLATE_TYPE";
const KEY_HEADLINE: &str = "HEADLINE";
const KEY_BODY: &str = "BODY";
const KEY_INSTAGRAM: &str = "INSTAGRAM";
const KEY_SOURCE: &str = "SOURCE";
const KEY_USE_CTA: &str = "USE_CTA";
const KEY_CTA_TYPE: &str = "CTA_TYPE";

const KEYS: [&str; 8] = [
    KEY_CONTENT_TYPE,
    KEY_TEMPLATE_TYPE,
    KEY_HEADLINE,
    KEY_BODY,
    KEY_INSTAGRAM,
    KEY_SOURCE,
    KEY_USE_CTA,
    KEY_CTA_TYPE,
];

/// Request-side data written alongside the generated content.
#[derive(Debug, Clone, Copy)]
pub struct BlockMetadata {
    pub content_type: ContentType,
    pub is_breaking: bool,
    pub use_cta: bool,
    pub cta_type: Option<CtaType>,
}

/// Renders the block. Pure and deterministic.
pub fn format_figma_block(content: &GeneratedContent, meta: &BlockMetadata) -> String {
    let profile = meta.content_type.profile();
    let mut lines: Vec<String> = Vec::with_capacity(10);

    lines.push(BLOCK_START.to_string());
    lines.push(field(KEY_CONTENT_TYPE, meta.content_type.as_str()));
    lines.push(field(
        KEY_TEMPLATE_TYPE,
        meta.content_type.template_type(meta.is_breaking),
    ));
    lines.push(field(KEY_HEADLINE, &content.headline));
    lines.push(field(KEY_BODY, &content.body));

    if profile.includes_instagram {
        lines.push(field(KEY_INSTAGRAM, &content.instagram_caption));
    }

    if !content.source.is_empty() {
        lines.push(field(KEY_SOURCE, &content.source));
    }

    if profile.includes_cta {
        match meta.cta_type.filter(|_| meta.use_cta) {
            Some(cta) => {
                lines.push(field(KEY_USE_CTA, "true"));
                lines.push(field(KEY_CTA_TYPE, cta.as_str()));
            }
            None => lines.push(field(KEY_USE_CTA, "false")),
        }
    }

    lines.push(BLOCK_END.to_string());
    lines.join("\n")
}

fn field(key: &str, value: &str) -> String {
    format!("{key}: {value}")
}

// ────────────────────────────────────────────────────────────────────────────
// Reader
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockParseError {
    #[error("missing DUB_NEWS_DATA_START line")]
    MissingStart,

    #[error("missing DUB_NEWS_DATA_END line")]
    MissingEnd,

    #[error("required field {0} is missing")]
    MissingField(&'static str),

    #[error("text before the first field: {0:?}")]
    UnexpectedLine(String),

    #[error("unknown content type {0:?}")]
    UnknownContentType(String),

    #[error("unknown CTA type {0:?}")]
    UnknownCtaType(String),

    #[error("USE_CTA must be true or false, got {0:?}")]
    InvalidUseCta(String),
}

/// Field values read back out of a block, the way the plugin sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FigmaFields {
    pub content_type: ContentType,
    pub template_type: String,
    pub headline: String,
    pub body: String,
    pub instagram: Option<String>,
    pub source: Option<String>,
    pub use_cta: Option<bool>,
    pub cta_type: Option<CtaType>,
}

/// Reads a block. Text outside the sentinels is ignored; a line that does not
/// start with a known key continues the previous field's value.
/// Accepts both `\n` and `\r\n` line endings; values are read back with `\n`.
pub fn parse_figma_block(text: &str) -> Result<FigmaFields, BlockParseError> {
    let mut lines = text.lines();

    lines
        .by_ref()
        .find(|line| line.trim_end() == BLOCK_START)
        .ok_or(BlockParseError::MissingStart)?;

    let mut fields: Vec<(&'static str, String)> = Vec::new();
    let mut closed = false;

    for line in lines {
        if line.trim_end() == BLOCK_END {
            closed = true;
            break;
        }

        if let Some((key, value)) = split_field(line) {
            fields.push((key, value.to_string()));
        } else if let Some((_, value)) = fields.last_mut() {
            value.push('\n');
            value.push_str(line);
        } else {
            return Err(BlockParseError::UnexpectedLine(line.to_string()));
        }
    }

    if !closed {
        return Err(BlockParseError::MissingEnd);
    }

    // Repeated keys: the last occurrence wins.
    let take = |key: &str| {
        fields
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
    };
    let require = |key: &'static str| take(key).ok_or(BlockParseError::MissingField(key));

    let content_type_raw = require(KEY_CONTENT_TYPE)?;
    let content_type = ContentType::from_wire(&content_type_raw)
        .ok_or(BlockParseError::UnknownContentType(content_type_raw))?;

    let use_cta = take(KEY_USE_CTA)
        .map(|v| match v.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(BlockParseError::InvalidUseCta(v)),
        })
        .transpose()?;

    let cta_type = take(KEY_CTA_TYPE)
        .map(|v| CtaType::from_wire(&v).ok_or(BlockParseError::UnknownCtaType(v)))
        .transpose()?;

    Ok(FigmaFields {
        content_type,
        template_type: require(KEY_TEMPLATE_TYPE)?,
        headline: require(KEY_HEADLINE)?,
        body: require(KEY_BODY)?,
        instagram: take(KEY_INSTAGRAM),
        source: take(KEY_SOURCE),
        use_cta,
        cta_type,
    })
}

/// Splits `KEY: value` for known keys. The single space after the colon is optional.
fn split_field(line: &str) -> Option<(&'static str, &str)> {
    KEYS.iter().find_map(|&key| {
        let rest = line.strip_prefix(key)?.strip_prefix(':')?;
        Some((key, rest.strip_prefix(' ').unwrap_or(rest)))
    })
}
