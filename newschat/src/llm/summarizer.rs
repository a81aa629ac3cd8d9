// Summarizer module
use serde::Deserialize;
use tracing::info;

use super::{extract_json_from_text, LlmClient};
use crate::error::{Error, Result};
use crate::news::NewsArticle;

const NEWS_SUMMARY_SYSTEM_PROMPT: &str = r#"You are a news summarizer. Given a collection of news articles, create a concise, informative summary that:
1. Highlights the key points and common themes
2. Maintains objectivity and factual accuracy
3. Includes relevant dates and sources
4. Is written in a clear, journalistic style
5. Small 2 line intro and outro
6. Use bullet points and short sentences to make them easier to read

Your response must be a JSON object with this structure:
{
  "summary": "your summary text here"
}
"#;

// Internal structure for parsing summary JSON
#[derive(Debug, Deserialize)]
struct SummaryJson {
    summary: String,
}

/// Summarize a list of news articles into a short report.
///
/// The whole article list is serialized as the user turn. An empty list is
/// sent as `[]` and not special-cased; the model's `summary` string is
/// returned as-is.
pub async fn summarize_news(client: &LlmClient, articles: &[NewsArticle]) -> Result<String> {
    let payload = serde_json::to_string(articles)
        .map_err(|e| Error::malformed("failed to serialize articles for summarization", e))?;

    let content = client.chat_json(NEWS_SUMMARY_SYSTEM_PROMPT, payload).await?;

    let cleaned = extract_json_from_text(&content)
        .ok_or_else(|| Error::MalformedResponse("no JSON object in summary reply".into()))?;
    let parsed: SummaryJson = serde_json::from_str(&cleaned)
        .map_err(|e| Error::malformed("failed to parse summary reply", e))?;

    info!(
        "summarized {} articles into {} chars",
        articles.len(),
        parsed.summary.len()
    );
    Ok(parsed.summary)
}
