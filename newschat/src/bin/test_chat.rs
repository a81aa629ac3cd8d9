use std::path::PathBuf;

use common::Config;
use newschat::llm::classifier::{self, Classification};
use newschat::llm::{summarizer, LlmClient};
use newschat::news::NewsClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load configuration: config.default.toml overridden by config.toml,
    // both optional. API keys come from the environment variables the
    // config names (OPENAI_API_KEY / NEWS_API_KEY by default).
    let default_path = PathBuf::from("config.default.toml");
    let override_path = PathBuf::from("config.toml");
    let config = Config::load_with_defaults(Some(&default_path), Some(&override_path)).await?;

    let llm_cfg = config.llm.unwrap_or_default();
    let news_cfg = config.news.unwrap_or_default();

    println!("\n{}", "=".repeat(60));
    println!("Testing Newschat operations");
    println!(
        "Base URL: {}",
        llm_cfg.api_url.as_deref().unwrap_or(newschat::llm::DEFAULT_API_URL)
    );
    println!(
        "Model: {}",
        llm_cfg.model.as_deref().unwrap_or(newschat::llm::DEFAULT_MODEL)
    );
    println!("{}", "=".repeat(60));

    let llm = LlmClient::from_config(&llm_cfg)?;

    // Test 1: classification of a conversational message
    println!("\n[Test 1] Classifying a conversational message...");
    match classifier::classify(&llm, "Hi, how are you today?").await {
        Ok(Classification::GeneralReply { reply }) => {
            println!("✓ Classified as general reply");
            println!("  Reply: {}", reply);
        }
        Ok(Classification::SearchNews { search_params }) => {
            println!("✗ Unexpected news intent: {:?}", search_params);
        }
        Err(e) => println!("✗ Classification failed: {}", e),
    }

    // Test 2: classification of a news question
    println!("\n[Test 2] Classifying a news question...");
    let classification =
        classifier::classify(&llm, "What's the latest on the climate summit?").await;
    match &classification {
        Ok(Classification::SearchNews { search_params }) => {
            println!("✓ Classified as news search");
            println!("  Query: {}", search_params.query);
            println!("  Sort: {}", search_params.sort_by.as_str());
        }
        Ok(Classification::GeneralReply { reply }) => {
            println!("✗ Unexpected general reply: {}", reply);
        }
        Err(e) => println!("✗ Classification failed: {}", e),
    }

    // Tests 3+4 need a news API key; skip quietly when absent
    let news = match NewsClient::from_config(&news_cfg) {
        Ok(client) => client,
        Err(e) => {
            println!("\nSkipping news search + summary tests: {}", e);
            return Ok(());
        }
    };

    if let Ok(Classification::SearchNews { search_params }) = classification {
        println!("\n[Test 3] Searching news for '{}'...", search_params.query);
        match news.search(&search_params.query, search_params.sort_by).await {
            Ok(response) => {
                println!("✓ Got {} articles (of {} total)", response.articles.len(), response.total_results);
                for (i, article) in response.articles.iter().enumerate() {
                    println!("    {}. {} ({})", i + 1, article.title, article.source.name);
                }

                println!("\n[Test 4] Summarizing articles...");
                match summarizer::summarize_news(&llm, &response.articles).await {
                    Ok(summary) => {
                        println!("✓ Summary:");
                        println!("{}", summary);
                    }
                    Err(e) => println!("✗ Summarization failed: {}", e),
                }
            }
            Err(e) => println!("✗ News search failed: {}", e),
        }
    }

    println!("\n{}", "=".repeat(60));
    Ok(())
}
