use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vitamins_chat::model::{ChatModel, Embedder, OpenAiClient, PineconeIndex, ProductIndex};
use vitamins_chat::rag::product::ProductId;
use vitamins_chat::web::models::Message;

#[tokio::test]
async fn embed_posts_model_and_input() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "text-embedding-3-small",
            "input": "вітамін C"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{ "object": "embedding", "index": 0, "embedding": [0.25, -0.5, 1.0] }],
            "model": "text-embedding-3-small"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&server.uri(), "sk-test");
    let vector = client.embed("вітамін C").await.unwrap();

    assert_eq!(vector, vec![0.25, -0.5, 1.0]);
}

#[tokio::test]
async fn embed_surfaces_upstream_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit reached"))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&server.uri(), "sk-test");
    let err = client.embed("zinc").await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("429"));
    assert!(message.contains("Rate limit reached"));
}

#[tokio::test]
async fn embed_rejects_empty_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&server.uri(), "sk-test");
    assert!(client.embed("zinc").await.is_err());
}

#[tokio::test]
async fn complete_sends_fixed_decoding_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.7,
            "max_tokens": 800,
            "messages": [
                { "role": "system", "content": "sys" },
                { "role": "user", "content": "hi" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Вітаю!" },
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&format!("{}/", server.uri()), "sk-test");
    let reply = client
        .complete(&[Message::system("sys"), Message::user("hi")])
        .await
        .unwrap();

    assert_eq!(reply, "Вітаю!");
}

#[tokio::test]
async fn complete_fails_without_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        })))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&server.uri(), "sk-test");
    let err = client.complete(&[Message::user("hi")]).await.unwrap_err();
    assert!(err.to_string().contains("Failed to extract content"));
}

#[tokio::test]
async fn search_queries_with_metadata_and_keeps_rank_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(header("api-key", "pc-test"))
        .and(body_partial_json(json!({ "topK": 5, "includeMetadata": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "namespace": "",
            "matches": [
                {
                    "id": "p-1",
                    "score": 0.92,
                    "metadata": {
                        "name": "Vitamin D3 2000 IU",
                        "brand": "Solgar",
                        "price": 420.0,
                        "status": true,
                        "sku": "SOL-D3",
                        "product_id": "1001",
                        "category": "vitamins"
                    }
                },
                { "id": "p-2", "score": 0.61 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let index = PineconeIndex::new(&server.uri(), "pc-test");
    let hits = index.search(&[0.1, 0.2, 0.3], 5).await.unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].record.name.as_deref(), Some("Vitamin D3 2000 IU"));
    assert_eq!(hits[0].record.price, Some(420.0));
    assert_eq!(hits[0].record.product_id, Some(ProductId::Text("1001".to_string())));
    assert!((hits[0].score - 0.92).abs() < 1e-6);
    assert!(hits[1].record.name.is_none());
    assert!((hits[1].score - 0.61).abs() < 1e-6);
}

#[tokio::test]
async fn search_surfaces_upstream_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API Key"))
        .mount(&server)
        .await;

    let index = PineconeIndex::new(&server.uri(), "bad-key");
    let err = index.search(&[0.1], 5).await.unwrap_err();
    assert!(err.to_string().contains("Invalid API Key"));
}

#[tokio::test]
async fn connect_resolves_index_host_by_name() {
    let control = MockServer::start().await;
    let data = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/indexes/vitamins-catalog-v2"))
        .and(header("api-key", "pc-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "vitamins-catalog-v2",
            "dimension": 1536,
            "metric": "cosine",
            "host": data.uri()
        })))
        .expect(1)
        .mount(&control)
        .await;

    let index = PineconeIndex::connect(&control.uri(), "vitamins-catalog-v2", "pc-test")
        .await
        .unwrap();
    assert_eq!(index.host(), data.uri());
}

#[tokio::test]
async fn connect_fails_for_unknown_index() {
    let control = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/indexes/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Index not found"))
        .mount(&control)
        .await;

    let err = PineconeIndex::connect(&control.uri(), "missing", "pc-test")
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Index not found"));
}

#[test]
fn bare_host_defaults_to_https() {
    let index = PineconeIndex::new("vitamins-catalog-v2-abc123.svc.aped-4627-b74a.pinecone.io", "k");
    assert_eq!(index.host(), "https://vitamins-catalog-v2-abc123.svc.aped-4627-b74a.pinecone.io");
}

#[tokio::test]
async fn search_tolerates_mistyped_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "matches": [
                { "id": "p-1", "score": 0.93, "metadata": { "name": "Zinc 25", "sku": 10452.0, "status": "yes" } },
                { "id": "p-2", "score": 0.88, "metadata": { "name": "Iron", "price": "250", "status": 0 } },
                { "id": "p-3", "score": 0.81, "metadata": { "brand": ["Nature's Way"], "product_id": 77 } }
            ]
        })))
        .mount(&server)
        .await;

    let index = PineconeIndex::new(&server.uri(), "pc-test");
    let hits = index.search(&[0.1, 0.2], 5).await.unwrap();

    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].record.sku.as_deref(), Some("10452.0"));
    assert_eq!(hits[0].record.status, Some(true));
    assert_eq!(hits[1].record.price, Some(250.0));
    assert_eq!(hits[1].record.status, Some(false));
    assert!(hits[2].record.brand.is_none());
    assert_eq!(hits[2].record.product_id.as_ref().map(ToString::to_string), Some("77".to_string()));
}

#[test]
fn debug_output_omits_api_keys() {
    let index = PineconeIndex::new("catalog.svc.pinecone.io", "pc-secret");
    let client = OpenAiClient::new("https://api.openai.com/v1", "sk-secret");

    let index_debug = format!("{:?}", index);
    let client_debug = format!("{:?}", client);

    assert!(index_debug.contains("https://catalog.svc.pinecone.io"));
    assert!(!index_debug.contains("pc-secret"));
    assert!(client_debug.contains("api.openai.com"));
    assert!(!client_debug.contains("sk-secret"));
}
