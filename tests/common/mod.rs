use actix_web::dev::{Server, ServerHandle};
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A throwaway HTTP server bound to an ephemeral local port.
pub struct MockServer {
    pub url: String,
    handle: ServerHandle,
}

impl MockServer {
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

fn local_listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

fn launch(server: Server, port: u16) -> MockServer {
    let handle = server.handle();
    actix_web::rt::spawn(server);
    MockServer {
        url: format!("http://127.0.0.1:{}", port),
        handle,
    }
}

/// What the mock message source answers on `GET /messages`.
#[derive(Clone)]
pub struct SourceReply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl SourceReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }
}

async fn serve_messages(reply: web::Data<SourceReply>) -> HttpResponse {
    if !reply.delay.is_zero() {
        actix_web::rt::time::sleep(reply.delay).await;
    }
    let status = StatusCode::from_u16(reply.status).unwrap();
    HttpResponse::build(status)
        .content_type("application/json")
        .body(reply.body.clone())
}

pub fn start_message_source(reply: SourceReply) -> MockServer {
    let reply = web::Data::new(reply);
    let (listener, port) = local_listener();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(reply.clone())
            .route("/messages", web::get().to(serve_messages))
    })
    .workers(1)
    .disable_signals()
    .listen(listener)
    .unwrap()
    .run();
    launch(server, port)
}

/// Requests seen by the mock completion service.
#[derive(Default)]
pub struct CompletionLog {
    pub requests: Mutex<Vec<Value>>,
    pub auth_headers: Mutex<Vec<String>>,
}

impl CompletionLog {
    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[derive(Clone)]
pub struct CompletionReply {
    pub status: u16,
    pub body: Value,
}

impl CompletionReply {
    pub fn answer(content: &str) -> Self {
        Self {
            status: 200,
            body: json!({
                "id": "chatcmpl-test",
                "object": "chat.completion",
                "model": "gpt-4o-mini",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": content},
                    "finish_reason": "stop"
                }]
            }),
        }
    }
}

async fn serve_completion(
    req: HttpRequest,
    body: web::Json<Value>,
    reply: web::Data<CompletionReply>,
    log: web::Data<CompletionLog>,
) -> HttpResponse {
    let auth = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    log.auth_headers.lock().unwrap().push(auth);
    log.requests.lock().unwrap().push(body.into_inner());
    let status = StatusCode::from_u16(reply.status).unwrap();
    HttpResponse::build(status).json(&reply.body)
}

pub fn start_completion_service(reply: CompletionReply) -> (MockServer, Arc<CompletionLog>) {
    let log = Arc::new(CompletionLog::default());
    let log_data = web::Data::from(log.clone());
    let reply = web::Data::new(reply);
    let (listener, port) = local_listener();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(reply.clone())
            .app_data(log_data.clone())
            .route("/v1/chat/completions", web::post().to(serve_completion))
    })
    .workers(1)
    .disable_signals()
    .listen(listener)
    .unwrap()
    .run();
    (launch(server, port), log)
}
