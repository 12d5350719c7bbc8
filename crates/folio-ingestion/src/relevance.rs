//! Keyword relevance flag.

/// True when any keyword occurs (case-insensitively) in the title or abstract.
/// Blank keywords never match.
pub fn check_relevance(title: &str, abstract_text: &str, keywords: &[String]) -> bool {
    let text = format!("{title} {abstract_text}").to_lowercase();
    keywords
        .iter()
        .map(|kw| kw.trim().to_lowercase())
        .any(|kw| !kw.is_empty() && text.contains(&kw))
}
