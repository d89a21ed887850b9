use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use pdf_rag::api::{create_router, AppState};
use pdf_rag::domain::{ports::LlmService, DomainError, GenerationParams};
use pdf_rag::infrastructure::{AppConfig, HashingEmbedding, PdfTextExtractor};

const BOUNDARY: &str = "pdf-rag-test-boundary";

/// Answers with the context section of the prompt so tests can see what was retrieved.
struct ContextEchoLlm;

#[async_trait]
impl LlmService for ContextEchoLlm {
    async fn generate(&self, prompt: &str, _: &GenerationParams) -> Result<String, DomainError> {
        let context = prompt
            .split("Context: ")
            .nth(1)
            .and_then(|rest| rest.split("\n\nAnswer: ").next())
            .unwrap_or_default();
        Ok(format!("From the document: {context}"))
    }

    fn model_name(&self) -> &str {
        "context-echo"
    }
}

struct PanickingLlm;

#[async_trait]
impl LlmService for PanickingLlm {
    async fn generate(&self, _: &str, _: &GenerationParams) -> Result<String, DomainError> {
        panic!("provider client misconfigured")
    }

    fn model_name(&self) -> &str {
        "panicking"
    }
}

struct FailingLlm;

#[async_trait]
impl LlmService for FailingLlm {
    async fn generate(&self, _: &str, _: &GenerationParams) -> Result<String, DomainError> {
        Err(DomainError::generation("model unavailable"))
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

fn app_with(llm: Arc<dyn LlmService>) -> Router {
    let state = AppState::with_providers(
        AppConfig::default(),
        Arc::new(PdfTextExtractor::new()),
        Arc::new(HashingEmbedding::default()),
        llm,
    );
    create_router(state)
}

fn app() -> Router {
    app_with(Arc::new(ContextEchoLlm))
}

/// PDF with one Helvetica text line per page; an empty string gives a blank page.
fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 4 + 2 * i)).collect();
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];
    for (i, phrase) in pages.iter().enumerate() {
        let stream = if phrase.is_empty() {
            "q Q".to_string()
        } else {
            format!("BT /F1 12 Tf 100 700 Td ({phrase}) Tj ET")
        };
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R /Resources << /Font << /F1 3 0 R >> >> >>",
            5 + 2 * i
        ));
        objects.push(format!("<< /Length {} >> stream\n{stream}\nendstream", stream.len()));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj {body} endobj\n", i + 1).as_bytes());
    }

    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(format!("{:010} 65535 f \n", 0).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!("trailer << /Size {} /Root 1 0 R >>\nstartxref\n", objects.len() + 1).as_bytes(),
    );
    out.extend_from_slice(format!("{}\n", xref_start).as_bytes());
    out.extend_from_slice(b"%%EOF\n");
    out
}

fn minimal_pdf(phrase: &str) -> Vec<u8> {
    pdf_with_pages(&[phrase])
}

fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload-pdf")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field, filename, content_type, data)))
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = app();

    let (status, body) = send(&app, get_request("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, get_request("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["knowledge_base"], "empty");
}

#[tokio::test]
async fn test_ask_before_upload_is_bad_request() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request("POST", "/ask-llm", json!({ "question": "What is ML?" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "No knowledge base available. Please upload a PDF first."
    );
}

#[tokio::test]
async fn test_knowledge_base_and_search_need_upload() {
    let app = app();

    let (status, body) = send(&app, get_request("/knowledge-base")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());

    let (status, _) = send(&app, json_request("POST", "/search", json!({ "query": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_then_ask() {
    let app = app();
    let pdf = minimal_pdf("Machine learning is a subset of AI");

    let (status, body) = send(
        &app,
        upload_request("file", "notes.pdf", "application/pdf", &pdf),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "PDF processed and knowledge base prepared.");
    assert!(body["text"]
        .as_str()
        .unwrap()
        .contains("Machine learning is a subset of AI"));
    assert!(body["chunks"].as_u64().unwrap() >= 1);

    let (status, body) = send(&app, get_request("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["knowledge_base"], "loaded");

    let (status, body) = send(
        &app,
        json_request("POST", "/ask-llm", json!({ "question": "What is machine learning?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let response = body["response"].as_str().unwrap();
    assert!(response.starts_with("From the document: "));
    assert!(response.contains("Machine learning is a subset of AI"));
}

#[tokio::test]
async fn test_knowledge_base_describes_upload() {
    let app = app();
    let pdf = minimal_pdf("Rust has no garbage collector");

    let (status, upload) = send(
        &app,
        upload_request("file", "rust.pdf", "application/pdf", &pdf),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get_request("/knowledge-base")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["document_id"], upload["document_id"]);
    assert_eq!(body["name"], "rust.pdf");
    assert_eq!(body["content_type"], "application/pdf");
    assert_eq!(body["size_bytes"].as_u64().unwrap(), pdf.len() as u64);
    assert_eq!(body["chunks"], upload["chunks"]);
    assert_eq!(body["embedding_model"], "hashing");
    assert_eq!(body["generation_model"], "context-echo");
}

#[tokio::test]
async fn test_search_returns_ranked_chunks() {
    let app = app();
    let pdf = minimal_pdf("Paris is the capital of France");
    let (status, _) = send(
        &app,
        upload_request("file", "geo.pdf", "application/pdf", &pdf),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        json_request("POST", "/search", json!({ "query": "capital of France", "limit": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let hits = body.as_array().unwrap();
    assert!(!hits.is_empty());
    assert!(hits[0]["content"]
        .as_str()
        .unwrap()
        .contains("Paris is the capital of France"));
    let distances: Vec<f64> = hits.iter().map(|h| h["distance"].as_f64().unwrap()).collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_non_pdf_upload_is_rejected_and_keeps_knowledge_base() {
    let app = app();
    let pdf = minimal_pdf("The original document");
    let (status, first) = send(
        &app,
        upload_request("file", "first.pdf", "application/pdf", &pdf),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        upload_request("file", "notes.txt", "text/plain", b"plain text"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Only PDF files are accepted.");

    let (_, current) = send(&app, get_request("/knowledge-base")).await;
    assert_eq!(current["document_id"], first["document_id"]);
}

#[tokio::test]
async fn test_corrupt_pdf_is_server_error() {
    let app = app();

    let (status, body) = send(
        &app,
        upload_request("file", "broken.pdf", "application/pdf", b"not a pdf at all"),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Error processing PDF"));

    let (_, body) = send(&app, get_request("/ready")).await;
    assert_eq!(body["knowledge_base"], "empty");
}

#[tokio::test]
async fn test_missing_file_field() {
    let app = app();

    let (status, body) = send(
        &app,
        upload_request("document", "notes.pdf", "application/pdf", &minimal_pdf("x")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Missing form field 'file'");
}

#[tokio::test]
async fn test_empty_question_is_bad_request() {
    let app = app();
    let pdf = minimal_pdf("Some content");
    send(&app, upload_request("file", "a.pdf", "application/pdf", &pdf)).await;

    let (status, body) = send(
        &app,
        json_request("POST", "/ask-llm", json!({ "question": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_generation_failure_is_server_error() {
    let app = app_with(Arc::new(FailingLlm));
    let pdf = minimal_pdf("Some content");
    let (status, _) = send(&app, upload_request("file", "a.pdf", "application/pdf", &pdf)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        json_request("POST", "/ask-llm", json!({ "question": "anything?" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Error generating answer"));
    assert!(detail.contains("model unavailable"));
}

#[tokio::test]
async fn test_malformed_ask_body_has_detail() {
    let app = app();

    let (status, body) = send(&app, json_request("POST", "/ask-llm", json!({ "q": 1 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("missing field `question`"));

    let request = Request::builder()
        .method("POST")
        .uri("/ask-llm")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_malformed_search_body_has_detail() {
    let app = app();

    let (status, body) = send(&app, json_request("POST", "/search", json!({ "limit": 2 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_upload_without_multipart_has_detail() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request("POST", "/upload-pdf", json!({ "file": "notes.pdf" })),
    )
    .await;
    assert!(status.is_client_error(), "got {status}");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_handler_panic_returns_detail() {
    let app = app_with(Arc::new(PanickingLlm));
    let (status, _) = send(
        &app,
        upload_request("file", "a.pdf", "application/pdf", &minimal_pdf("Some content")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        json_request("POST", "/ask-llm", json!({ "question": "anything?" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Internal server error");

    let (status, _) = send(&app, get_request("/health")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_multi_page_upload_keeps_page_order() {
    let app = app();
    let pdf = pdf_with_pages(&["Chapter one opens here", "Chapter two follows"]);

    let (status, body) = send(
        &app,
        upload_request("file", "book.pdf", "application/pdf", &pdf),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let text = body["text"].as_str().unwrap();
    let first = text.find("Chapter one opens here").unwrap();
    let second = text.find("Chapter two follows").unwrap();
    assert!(first < second, "got {text:?}");
}

#[tokio::test]
async fn test_blank_pdf_builds_empty_knowledge_base() {
    let app = app();

    let (status, body) = send(
        &app,
        upload_request("file", "blank.pdf", "application/pdf", &pdf_with_pages(&["", ""])),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["text"], "");
    assert_eq!(body["chunks"], 0);

    let (status, body) = send(&app, get_request("/knowledge-base")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chunks"], 0);

    let (status, body) = send(
        &app,
        json_request("POST", "/ask-llm", json!({ "question": "Anything in there?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["response"], "From the document: ");
}
