use actix_web::{error::InternalError, web, HttpRequest, HttpResponse, Responder};
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use serde_json::json;
use uuid::Uuid;

use crate::model::Backends;
use crate::rag::{assemble, filter_relevant, format_products, RELEVANCE_THRESHOLD, SYSTEM_PROMPT};
use crate::web::models::{ChatRequest, ChatResponse, ErrorResponse, ProductSummary};
use crate::web::AppState;

/// Nearest neighbours requested from the index per message.
pub const SEARCH_TOP_K: usize = 5;
/// Products returned to the storefront alongside the reply.
pub const RESPONSE_PRODUCTS: usize = 3;

pub const API_VERSION: &str = "1.0";

// Index handler
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Vitamins Chatbot API",
        "version": API_VERSION,
        "endpoints": {
            "/chat": "POST - Send message to chatbot",
            "/health": "GET - Health check"
        }
    }))
}

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "Chatbot API is running"
    }))
}

// Chat API endpoint
pub async fn chat(data: web::Data<AppState>, req: web::Json<ChatRequest>) -> impl Responder {
    let request_id = Uuid::new_v4();
    let req = req.into_inner();

    info!(
        "Chat request {}: {} ({} history turns)",
        request_id,
        req.message,
        req.conversation_history.as_ref().map_or(0, Vec::len)
    );

    match answer(&data.backends, req, request_id).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            error!("Chat request {} failed: {:#}", request_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                detail: format!("{:#}", e),
            })
        }
    }
}

/// Runs one message through retrieval and generation. Every step waits on the
/// previous one and any failure aborts the whole request.
async fn answer(backends: &Backends, req: ChatRequest, request_id: Uuid) -> Result<ChatResponse> {
    let history = req.conversation_history.unwrap_or_default();

    let vector = backends
        .embedder
        .embed(&req.message)
        .await
        .context("embedding request failed")?;

    let hits = backends
        .index
        .search(&vector, SEARCH_TOP_K)
        .await
        .context("product search failed")?;
    let total_hits = hits.len();

    let products = filter_relevant(hits, RELEVANCE_THRESHOLD);
    info!(
        "Chat request {}: {} of {} products above relevance threshold",
        request_id,
        products.len(),
        total_hits
    );
    debug!(
        "Chat request {} product ids: {:?}",
        request_id,
        products
            .iter()
            .map(|p| p.record.product_id.as_ref().map(ToString::to_string))
            .collect::<Vec<_>>()
    );

    let products_context = format_products(&products);
    let messages = assemble(SYSTEM_PROMPT, &products_context, &history, &req.message);

    let response = backends
        .chat
        .complete(&messages)
        .await
        .context("chat completion failed")?;

    Ok(ChatResponse {
        response,
        products: products
            .iter()
            .take(RESPONSE_PRODUCTS)
            .map(|p| ProductSummary::from(&p.record))
            .collect(),
    })
}

/// Rejects request bodies that do not match the chat schema before any
/// upstream call is made.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let detail = err.to_string();
        warn!("Rejected request body: {}", detail);
        InternalError::from_response(
            err,
            HttpResponse::UnprocessableEntity().json(ErrorResponse { detail }),
        )
        .into()
    })
}
