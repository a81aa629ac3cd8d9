use tracing::info;

use crate::error::Result;
use crate::llm::classifier::{self, Classification};
use crate::llm::{summarizer, LlmClient};
use crate::news::NewsClient;

/// Answer a chat message: classify it, then either return the model's direct
/// reply or search the news and summarize what came back.
///
/// Stateless; thread and message persistence belong to the caller.
pub async fn respond(llm: &LlmClient, news: &NewsClient, message: &str) -> Result<String> {
    match classifier::classify(llm, message).await? {
        Classification::GeneralReply { reply } => Ok(reply),
        Classification::SearchNews { search_params } => {
            info!(
                query = %search_params.query,
                sort_by = search_params.sort_by.as_str(),
                "searching news for classified intent"
            );
            let response = news.search(&search_params.query, search_params.sort_by).await?;
            summarizer::summarize_news(llm, &response.articles).await
        }
    }
}
