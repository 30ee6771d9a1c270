//! Content types and their per-variant behavior table.
//!
//! Composer, normalizer and formatter all read `ContentProfile` instead of
//! matching on `ContentType` themselves, so adding a variant is one table entry.

use serde::{Deserialize, Serialize};

use crate::generation::prompts::{MARKET_RECAP_TEMPLATE, POST_TEMPLATE, STORY_TEMPLATE};

/// Which kind of post is being generated. Selects prompt template and output fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Post,
    Story,
    MarketRecap,
}

/// Call-to-action annotation for post and market-recap output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtaType {
    Politician,
    Crypto,
    HedgeFund,
    Search,
}

/// Static, per-variant data.
#[derive(Debug)]
pub struct ContentProfile {
    pub base_template: &'static str,
    pub includes_instagram: bool,
    pub includes_cta: bool,
    /// Whether the breaking-news toggle applies. Market recaps are never breaking.
    pub honors_breaking: bool,
    /// Whether the breaking flag is stored on `GeneratedContent`.
    pub records_breaking: bool,
    /// Whether the completion request asks for JSON-mode output.
    pub json_mode: bool,
}

static POST_PROFILE: ContentProfile = ContentProfile {
    base_template: POST_TEMPLATE,
    includes_instagram: true,
    includes_cta: true,
    honors_breaking: true,
    records_breaking: true,
    json_mode: true,
};

static STORY_PROFILE: ContentProfile = ContentProfile {
    base_template: STORY_TEMPLATE,
    includes_instagram: false,
    includes_cta: false,
    honors_breaking: true,
    records_breaking: false,
    json_mode: false,
};

static MARKET_RECAP_PROFILE: ContentProfile = ContentProfile {
    base_template: MARKET_RECAP_TEMPLATE,
    includes_instagram: true,
    includes_cta: true,
    honors_breaking: false,
    records_breaking: false,
    json_mode: true,
};

impl ContentType {
    pub const ALL: [ContentType; 3] = [
        ContentType::Post,
        ContentType::Story,
        ContentType::MarketRecap,
    ];

    pub fn profile(self) -> &'static ContentProfile {
        match self {
            ContentType::Post => &POST_PROFILE,
            ContentType::Story => &STORY_PROFILE,
            ContentType::MarketRecap => &MARKET_RECAP_PROFILE,
        }
    }

    /// Wire name used in `CONTENT_TYPE:` lines.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Post => "post",
            ContentType::Story => "story",
            ContentType::MarketRecap => "market_recap",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ct| ct.as_str() == value)
    }

    /// Value of the `TEMPLATE_TYPE:` line.
    pub fn template_type(self, is_breaking: bool) -> &'static str {
        if !self.profile().honors_breaking {
            "default"
        } else if is_breaking {
            "breaking"
        } else {
            "non-breaking"
        }
    }
}

impl CtaType {
    pub const ALL: [CtaType; 4] = [
        CtaType::Politician,
        CtaType::Crypto,
        CtaType::HedgeFund,
        CtaType::Search,
    ];

    /// Wire name used in `CTA_TYPE:` lines.
    pub fn as_str(self) -> &'static str {
        match self {
            CtaType::Politician => "politician",
            CtaType::Crypto => "crypto",
            CtaType::HedgeFund => "hedge_fund",
            CtaType::Search => "search",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cta| cta.as_str() == value)
    }
}
