use std::path::Path;

use actix_cors::Cors;
use actix_web::{delete, dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod state;

pub use state::AppState;

use crate::domain::error::AppError;
use crate::infrastructure::config::AppConfig;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Map a domain error onto an HTTP response with a structured body
fn error_response(error: &AppError) -> HttpResponse {
    let body = ErrorResponse::new(error.to_string());
    match error {
        AppError::NotFound(_) => HttpResponse::NotFound().json(body),
        AppError::ValidationError(_) | AppError::ParseError(_) => {
            HttpResponse::BadRequest().json(body)
        }
        AppError::IoError(_) | AppError::Internal(_) => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn validation_failure(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(format!("Invalid request: {}", errors)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ImportRequest {
    /// Path of the file to import
    #[validate(length(min = 1))]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct DescribeRequest {
    /// Restrict the summary to these variables; all columns when omitted
    #[serde(default)]
    pub variables: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AnalysisRequest {
    #[validate(length(min = 1))]
    pub analysis_type: String,

    #[validate(length(min = 1))]
    pub variables: Vec<String>,

    /// Free-text study objective; carried for interpretation services,
    /// unused by the local engine
    #[serde(default)]
    pub objective: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReliabilityRequest {
    #[validate(length(min = 2))]
    pub variables: Vec<String>,

    #[serde(default)]
    pub scale_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
    pub cleared: bool,
}

#[post("/analysis/import")]
async fn import_dataset(
    data: web::Data<AppState>,
    req: web::Json<ImportRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failure(errors);
    }

    tracing::info!(path = %req.path, "Import requested");

    match data.import_use_case.execute(Path::new(&req.path)) {
        Ok(dataset) => {
            let summary = crate::application::ImportSummary::from_dataset(&dataset);
            data.session.lock().unwrap().replace(dataset);
            HttpResponse::Ok().json(summary)
        }
        Err(e) => {
            tracing::error!(path = %req.path, error = %e, "Import failed");
            error_response(&e)
        }
    }
}

#[get("/analysis/dataset")]
async fn current_dataset(data: web::Data<AppState>) -> impl Responder {
    let session = data.session.lock().unwrap();
    match session.require_current() {
        Ok(dataset) => HttpResponse::Ok().json(dataset.meta()),
        Err(e) => error_response(&e),
    }
}

#[delete("/analysis/dataset")]
async fn clear_dataset(data: web::Data<AppState>) -> impl Responder {
    let cleared = data.session.lock().unwrap().clear();
    HttpResponse::Ok().json(ClearResponse {
        success: true,
        cleared,
    })
}

#[post("/analysis/quality-check")]
async fn quality_check(data: web::Data<AppState>) -> impl Responder {
    let session = data.session.lock().unwrap();
    match session.require_current() {
        Ok(dataset) => HttpResponse::Ok().json(data.quality_use_case.run(dataset)),
        Err(e) => error_response(&e),
    }
}

#[get("/analysis/dictionary")]
async fn data_dictionary(data: web::Data<AppState>) -> impl Responder {
    let session = data.session.lock().unwrap();
    match session.require_current() {
        Ok(dataset) => HttpResponse::Ok().json(data.quality_use_case.data_dictionary(dataset)),
        Err(e) => error_response(&e),
    }
}

#[post("/analysis/describe")]
async fn describe(data: web::Data<AppState>, req: web::Json<DescribeRequest>) -> impl Responder {
    let session = data.session.lock().unwrap();
    match session.require_current() {
        Ok(dataset) => {
            let stats = data
                .descriptives_use_case
                .run(dataset, req.variables.as_deref());
            HttpResponse::Ok().json(stats)
        }
        Err(e) => error_response(&e),
    }
}

#[post("/analysis/run")]
async fn run_analysis(data: web::Data<AppState>, req: web::Json<AnalysisRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failure(errors);
    }

    if let Some(objective) = &req.objective {
        tracing::debug!(objective = %objective, "Analysis objective supplied");
    }

    let session = data.session.lock().unwrap();
    match session.require_current() {
        Ok(dataset) => {
            let result =
                data.analysis_use_case
                    .run(dataset, &req.analysis_type, &req.variables);
            HttpResponse::Ok().json(result)
        }
        Err(e) => error_response(&e),
    }
}

#[post("/analysis/reliability")]
async fn reliability(
    data: web::Data<AppState>,
    req: web::Json<ReliabilityRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failure(errors);
    }

    let session = data.session.lock().unwrap();
    match session.require_current() {
        Ok(dataset) => {
            let report =
                data.reliability_use_case
                    .run(dataset, &req.variables, req.scale_name.as_deref());
            HttpResponse::Ok().json(report)
        }
        Err(e) => error_response(&e),
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Every route of the analysis API, mounted under /api
fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .service(import_dataset)
        .service(current_dataset)
        .service(clear_dataset)
        .service(quality_check)
        .service(data_dictionary)
        .service(describe)
        .service(run_analysis)
        .service(reliability)
        .service(health)
}

pub fn start_server(config: &AppConfig, state: AppState) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new().wrap(cors).app_data(state.clone()).service(api_scope())
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
