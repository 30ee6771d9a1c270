// Base system prompts for each content type, plus the composer that
// appends custom instructions and the breaking-news qualifier.

use crate::generation::content_type::ContentType;

/// Label placed before caller-supplied custom instructions.
pub const CUSTOM_INSTRUCTIONS_LABEL: &str = "Additional specific instructions for this article:";

/// System prompt for single-image news posts.
pub const POST_TEMPLATE: &str = r#"
Breaking Headline: Create a clear and engaging headline.
70-Word Narrative: Summarize the news article in a single, cohesive 70-word paragraph.
30-Word Instagram Caption: Write a 30-word caption for an Instagram post.
Source: Name the publication or outlet the article came from, if it is stated.

Guidelines:
- Include all important numbers and stats from the article using only the provided data.
- Do not hallucinate or use any outside statistics or hashtags.
- Use clear, simple language and grammar suitable for Instagram readers.
- Maintain an informational and engaging tone without being overly cringy.
- When using complex or policy-related terms, include brief explanations in parentheses.
- Since the input may contain entire website information, distinguish between the actual
  news text and distracting ads or irrelevant information, and focus solely on the relevant news content.

Return a JSON response with exactly this structure:
{
  "isBreaking": boolean,
  "headline": string,
  "body": string,
  "instagramCaption": string,
  "source": string
}
"#;

/// System prompt for multi-slide stories. No caption: stories are not captioned.
pub const STORY_TEMPLATE: &str = r#"
Story Headline: Create a short, punchy headline of at most 12 words.
Story Body: Retell the news article in 3 short paragraphs of 2-3 sentences each,
separated by a blank line. Each paragraph must stand on its own as a story slide.
Source: Name the publication or outlet the article came from, if it is stated.

Guidelines:
- Include all important numbers and stats from the article using only the provided data.
- Do not hallucinate or use any outside statistics or hashtags.
- Write for a reader tapping through slides: one idea per paragraph, no filler.
- When using complex or policy-related terms, include brief explanations in parentheses.
- Ignore ads, navigation text and unrelated links that may surround the article.

Respond with a single JSON object and nothing else, using exactly this structure:
{
  "headline": string,
  "body": string,
  "source": string
}
"#;

/// System prompt for end-of-day market recaps.
pub const MARKET_RECAP_TEMPLATE: &str = r#"
Recap Headline: Summarize the day's market move in one headline, naming the index or asset.
Recap Body: Write 2 short paragraphs separated by a blank line. The first covers what
moved and by how much; the second covers why, using only reasons given in the article.
30-Word Instagram Caption: Write a 30-word caption for an Instagram post.
Source: Name the publication or data provider the figures came from, if it is stated.

Guidelines:
- Quote every price, percentage and point change exactly as the article gives it.
- Do not hallucinate or use any outside statistics, forecasts or hashtags.
- Do not give investment advice or predict future prices.
- Keep a neutral, informational tone.

Return a JSON response with exactly this structure:
{
  "headline": string,
  "body": string,
  "instagramCaption": string,
  "source": string
}
"#;

/// Builds the system instruction for one generation request.
///
/// Base template, then the custom-instruction section (if any), then the
/// breaking-news qualifier for content types that honor it. Cannot fail.
pub fn compose_system_prompt(
    content_type: ContentType,
    is_breaking: bool,
    custom_instructions: &str,
) -> String {
    let profile = content_type.profile();
    let mut prompt = String::from(profile.base_template);

    if !custom_instructions.trim().is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(CUSTOM_INSTRUCTIONS_LABEL);
        prompt.push('\n');
        prompt.push_str(custom_instructions);
    }

    if profile.honors_breaking {
        prompt.push_str(&breaking_qualifier(is_breaking));
    }

    prompt
}

fn breaking_qualifier(is_breaking: bool) -> String {
    format!(
        "\nThis is {} news.",
        if is_breaking { "breaking" } else { "non-breaking" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_without_custom_is_template_plus_qualifier() {
        let prompt = compose_system_prompt(ContentType::Post, true, "");
        assert_eq!(prompt, format!("{POST_TEMPLATE}\nThis is breaking news."));
    }

    #[test]
    fn test_story_non_breaking_qualifier() {
        let prompt = compose_system_prompt(ContentType::Story, false, "");
        assert_eq!(prompt, format!("{STORY_TEMPLATE}\nThis is non-breaking news."));
    }

    #[test]
    fn test_market_recap_never_gets_qualifier() {
        for is_breaking in [true, false] {
            let prompt = compose_system_prompt(ContentType::MarketRecap, is_breaking, "");
            assert_eq!(prompt, MARKET_RECAP_TEMPLATE);
            assert!(!prompt.contains("breaking news."));
        }
    }

    #[test]
    fn test_custom_instructions_appended_verbatim_before_qualifier() {
        let custom = "Mention the vote count.\nKeep it under 60 words.";
        let prompt = compose_system_prompt(ContentType::Post, false, custom);
        let expected = format!(
            "{POST_TEMPLATE}\n\n{CUSTOM_INSTRUCTIONS_LABEL}\n{custom}\nThis is non-breaking news."
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_whitespace_custom_instructions_ignored() {
        let prompt = compose_system_prompt(ContentType::MarketRecap, false, "  \n ");
        assert_eq!(prompt, MARKET_RECAP_TEMPLATE);
    }

    #[test]
    fn test_story_template_does_not_request_caption() {
        assert!(!STORY_TEMPLATE.contains("instagramCaption"));
        assert!(POST_TEMPLATE.contains("instagramCaption"));
        assert!(MARKET_RECAP_TEMPLATE.contains("instagramCaption"));
    }
}
