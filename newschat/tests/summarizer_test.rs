use mockito::Matcher;
use newschat::llm::{summarizer, LlmClient};
use newschat::news::{NewsArticle, NewsSource};
use newschat::Error;

fn chat_completion_body(content: &str) -> String {
    serde_json::json!({
        "model": "gpt-4o-mini",
        "choices": [{
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

fn sample_articles() -> Vec<NewsArticle> {
    vec![NewsArticle {
        url: "https://example.com/summit".to_string(),
        title: "Climate summit opens".to_string(),
        description: "Leaders gather".to_string(),
        content: "Full text".to_string(),
        published_at: "2024-01-01T08:00:00Z".to_string(),
        source: NewsSource { id: Some("s1".to_string()), name: "Src".to_string() },
    }]
}

#[tokio::test]
async fn summarize_extracts_summary_field() {
    let mut server = mockito::Server::new_async().await;

    let content = serde_json::json!({
        "summary": "Quick intro.\n- Climate summit opened on Jan 1 (Src)\nQuick outro."
    })
    .to_string();

    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_completion_body(&content))
        .create_async()
        .await;

    let client = LlmClient::new(server.url(), "fake-api-key", "gpt-4o-mini");
    let summary = summarizer::summarize_news(&client, &sample_articles())
        .await
        .expect("summarize");

    assert!(summary.starts_with("Quick intro."));
    assert!(summary.contains("Climate summit opened"));

    mock.assert_async().await;
}

#[tokio::test]
async fn summarize_empty_list_sends_empty_array() {
    let mut server = mockito::Server::new_async().await;

    // The user turn for an empty article list must be the literal "[]"
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::Regex(r#""content":"\[\]""#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_completion_body(r#"{"summary": "Nothing to report."}"#))
        .create_async()
        .await;

    let client = LlmClient::new(server.url(), "fake-api-key", "gpt-4o-mini");
    let summary = summarizer::summarize_news(&client, &[]).await.expect("summarize");

    assert_eq!(summary, "Nothing to report.");

    mock.assert_async().await;
}

#[tokio::test]
async fn summarize_fails_on_upstream_error() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_status(503)
        .with_body("service unavailable")
        .create_async()
        .await;

    let client = LlmClient::new(server.url(), "fake-api-key", "gpt-4o-mini");
    let err = summarizer::summarize_news(&client, &sample_articles())
        .await
        .expect_err("must fail");

    assert!(matches!(
        err,
        Error::Upstream { status, .. } if status == reqwest::StatusCode::SERVICE_UNAVAILABLE
    ));

    mock.assert_async().await;
}

#[tokio::test]
async fn summarize_fails_on_missing_summary_field() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_completion_body(r#"{"headline": "wrong shape"}"#))
        .create_async()
        .await;

    let client = LlmClient::new(server.url(), "fake-api-key", "gpt-4o-mini");
    let err = summarizer::summarize_news(&client, &sample_articles())
        .await
        .expect_err("must fail");

    assert!(matches!(err, Error::MalformedResponse(_)));
}
