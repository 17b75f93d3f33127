// tests/vision_provider_tests.rs

use httpmock::prelude::*;
use qureplus_ai::{AnalysisService, OpenAIVisionProvider, ProviderConfig};
use qureplus_common::models::ImageUpload;
use serde_json::json;

fn leg_image() -> ImageUpload {
    ImageUpload::new("leg.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0])
}

fn service_for(server: &MockServer) -> AnalysisService {
    let config = ProviderConfig::new("test-key").with_api_base(server.base_url());
    AnalysisService::new(Some(OpenAIVisionProvider::new(config).unwrap()))
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn model_answer_is_passed_through() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key")
                .body_includes("data:image/jpeg;base64,")
                .body_includes("\"temperature\":0.1");
            then.status(200).json_body(completion(
                r#"{"probability": 82, "stage": "Stage 4 – Skin Changes", "reasoning": "Pigmentation around the ankle."}"#,
            ));
        })
        .await;

    let result = service_for(&server).analyze(&leg_image()).await;

    mock.assert_async().await;
    assert!(!result.is_fallback());
    assert_eq!(result.probability, 82.0);
    assert_eq!(result.stage, "Stage 4 – Skin Changes");
    assert_eq!(result.reasoning, "Pigmentation around the ankle.");
}

#[tokio::test]
async fn fenced_answer_is_unwrapped() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(completion(
                "```json\n{\"probability\": 35, \"stage\": \"Stage 1 – Spider Veins\", \"reasoning\": \"Fine surface veins.\"}\n```",
            ));
        })
        .await;

    let result = service_for(&server).analyze(&leg_image()).await;
    assert!(!result.is_fallback());
    assert_eq!(result.stage, "Stage 1 – Spider Veins");
}

#[tokio::test]
async fn out_of_range_probability_is_clamped() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(completion(
                r#"{"probability": 180, "stage": "Stage 5 – Ulcers", "reasoning": "Open wound."}"#,
            ));
        })
        .await;

    let result = service_for(&server).analyze(&leg_image()).await;
    assert!(!result.is_fallback());
    assert_eq!(result.probability, 100.0);
}

#[tokio::test]
async fn missing_reasoning_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .json_body(completion(r#"{"probability": 55, "stage": "Stage 2 – Reticular Veins"}"#));
        })
        .await;

    let result = service_for(&server).analyze(&leg_image()).await;
    assert!(result.is_fallback());
    assert!((15.0..=100.0).contains(&result.probability));
}

#[tokio::test]
async fn string_probability_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(completion(
                r#"{"probability": "55", "stage": "Stage 2 – Reticular Veins", "reasoning": "r"}"#,
            ));
        })
        .await;

    assert!(service_for(&server).analyze(&leg_image()).await.is_fallback());
}

#[tokio::test]
async fn malformed_json_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .json_body(completion("{\"probability\": 55, \"stage\": \"Stage 2\""));
        })
        .await;

    assert!(service_for(&server).analyze(&leg_image()).await.is_fallback());
}

#[tokio::test]
async fn http_error_falls_back_without_retry() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429)
                .json_body(json!({ "error": { "message": "Rate limit reached" } }));
        })
        .await;

    let result = service_for(&server).analyze(&leg_image()).await;

    assert!(result.is_fallback());
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn empty_choices_fall_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({ "choices": [] }));
        })
        .await;

    assert!(service_for(&server).analyze(&leg_image()).await.is_fallback());
}

#[tokio::test]
async fn missing_key_never_touches_the_network() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(500);
        })
        .await;

    let service = AnalysisService::from_config(Some(
        ProviderConfig::new("").with_api_base(server.base_url()),
    ))
    .unwrap();
    let result = service.analyze(&leg_image()).await;

    assert!(result.is_fallback());
    assert_eq!(mock.hits_async().await, 0);
}
