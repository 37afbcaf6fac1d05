//! Topic tags from article titles.

use once_cell::sync::Lazy;
use regex::Regex;

/// Tag used when no rule matches.
pub const FALLBACK_TAG: &str = "news";

/// Maximum number of tags kept per title.
pub const MAX_TAGS: usize = 4;

/// `(tag, pattern)` rules in priority order. Patterns are case-insensitive
/// and bounded by ASCII word boundaries, so accented letters next to a
/// keyword count as a boundary.
pub static TAG_RULES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("agents", r"(?i)(?-u:\b)(agent|agents|agentic)(?-u:\b)"),
        (
            "models",
            r"(?i)(?-u:\b)(gpt|claude|gemini|llama|mistral|model|llm|foundation)(?-u:\b)",
        ),
        ("research", r"(?i)(?-u:\b)(research|paper|study|breakthrough|discover)(?-u:\b)"),
        (
            "funding",
            r"(?i)(?-u:\b)(raises|funding|invest|valuation|series [a-c]|million|billion|\$\d+[mb])(?-u:\b)",
        ),
        ("product", r"(?i)(?-u:\b)(launch|release|announce|feature|update|new|beta)(?-u:\b)"),
        (
            "open-source",
            r"(?i)(?-u:\b)(open source|open-source|opensource|github|hugging face)(?-u:\b)",
        ),
        (
            "safety",
            r"(?i)(?-u:\b)(safety|alignment|ethics|regulation|govern|policy)(?-u:\b)",
        ),
        ("robotics", r"(?i)(?-u:\b)(robot|robotics|hardware|humanoid|physical)(?-u:\b)"),
        (
            "image",
            r"(?i)(?-u:\b)(image|midjourney|dall-e|stable diffusion|flux)(?-u:\b)",
        ),
        ("video", r"(?i)(?-u:\b)(video|runway|kling|pika|sora|luma|veo)(?-u:\b)"),
        (
            "audio",
            r"(?i)(?-u:\b)(voice|speech|audio|sound|music|suno|elevenlabs)(?-u:\b)",
        ),
        (
            "coding",
            r"(?i)(?-u:\b)(code|coding|developer|programming|copilot|codex)(?-u:\b)",
        ),
    ]
    .into_iter()
    .map(|(tag, pattern)| (tag, Regex::new(pattern).unwrap()))
    .collect()
});

/// Classify a title into between one and [`MAX_TAGS`] topic tags.
///
/// Tags come out in [`TAG_RULES`] order regardless of where in the title
/// they matched.
pub fn classify_title(title: &str) -> Vec<String> {
    let mut tags: Vec<String> = TAG_RULES
        .iter()
        .filter(|(_, re)| re.is_match(title))
        .map(|(tag, _)| (*tag).to_string())
        .take(MAX_TAGS)
        .collect();
    if tags.is_empty() {
        tags.push(FALLBACK_TAG.to_string());
    }
    tags
}
