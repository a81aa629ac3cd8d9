use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{extract_json_from_text, LlmClient};
use crate::error::{Error, Result};
use crate::news::SortBy;

/// Outcome of classifying the latest chat message.
///
/// Exactly one variant is produced, selected by the `type` discriminator the
/// model emits. An unknown discriminator fails the parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Classification {
    #[serde(rename = "expects_general_reply")]
    GeneralReply { reply: String },
    #[serde(rename = "expects_to_search_news")]
    SearchNews {
        #[serde(rename = "searchParams")]
        search_params: SearchParams,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(rename = "sortBy")]
    pub sort_by: SortBy,
}

fn classification_system_prompt() -> String {
    // Matches JavaScript's Date.toDateString(), e.g. "Sat Aug 30 2026"
    let today = Utc::now().format("%a %b %d %Y");
    format!(
        r#"
For context: Today's date is {today}.

You are a message classifier that determines if a user's message requires news search or a general response.
You will be provided with the entire chat history, but focus primarily on the most recent message to determine the user's current intent.

Classify the conversation based on the latest message into one of two types:
1. expects_general_reply - when the latest message just needs a conversational response
2. expects_to_search_news - when the latest message is asking about news or current events

Response must be a JSON object with this structure:
{{
  "type": "expects_general_reply" | "expects_to_search_news",
  "reply": string (only if type is expects_general_reply),
  "searchParams": {{
    "query": string (should just be keywords, not a full sentence as few words as possible),
    "sortBy": "relevancy" | "popularity" | "publishedAt"
  }} (only if type is expects_to_search_news)
}}

Consider the context of the entire conversation, but prioritize the intent of the most recent message.
Ensure the response is valid JSON and matches the exact structure above."#
    )
}

/// Classify a chat message as a conversational turn or a news-search intent.
///
/// One outbound chat-completion call; the model's JSON reply is parsed into
/// [`Classification`].
pub async fn classify(client: &LlmClient, message: &str) -> Result<Classification> {
    let prompt = classification_system_prompt();
    let content = client.chat_json(&prompt, message.to_string()).await?;
    let classification = parse_classification(&content)?;
    info!(
        variant = match &classification {
            Classification::GeneralReply { .. } => "expects_general_reply",
            Classification::SearchNews { .. } => "expects_to_search_news",
        },
        "message classified"
    );
    Ok(classification)
}

fn parse_classification(content: &str) -> Result<Classification> {
    let cleaned = extract_json_from_text(content)
        .ok_or_else(|| Error::MalformedResponse("no JSON object in classification reply".into()))?;
    serde_json::from_str(&cleaned)
        .map_err(|e| Error::malformed("failed to parse classification reply", e))
}
