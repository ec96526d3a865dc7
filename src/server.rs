use crate::io_struct::{AskQuery, AskResponse, HealthResponse};
use crate::qa_state::{QaConfig, QaState};
use actix_web::{HttpRequest, HttpResponse, HttpServer, error, get, web};
use std::io::Write;

pub const SERVICE_NAME: &str = "Aurora QA API";

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
    })
}

#[get("/ask")]
pub async fn ask(query: web::Query<AskQuery>, app_state: web::Data<QaState>) -> HttpResponse {
    let question = query.into_inner().question;
    if question.trim().is_empty() {
        return HttpResponse::BadRequest().json(AskResponse::error("question must not be empty"));
    }
    log::info!("Received question: {}", question);
    HttpResponse::Ok().json(app_state.ask(&question).await)
}

// Rejected query strings still get a JSON body.
pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Invalid query string: {}", err);
    let body = AskResponse::error(format!("Invalid query: {}", err));
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Register routes and extractor config; shared by `startup` and tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(health)
        .service(ask);
}

pub fn init_logging(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .parse_default_env()
        .try_init();
}

pub async fn startup(config: QaConfig, qa_state: QaState) -> std::io::Result<()> {
    let app_state = web::Data::new(qa_state);

    log::info!("Starting server at {}:{}", config.host, config.port);
    log::info!("Message source: {}", config.messages_url);

    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(app_state.clone())
            .configure(configure)
    })
    .bind((config.host, config.port))?
    .run()
    .await
}
