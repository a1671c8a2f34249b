//! Participant service
//!
//! In-memory CRUD over a shared registry. Nothing is persisted; restarting the
//! process empties the list.

use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, ResponseError, web};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::{Registry, RegistryError};

/// Registry shared across server workers
pub type SharedRegistry = web::Data<Mutex<Registry>>;

pub fn shared_registry() -> SharedRegistry {
    web::Data::new(Mutex::new(Registry::new()))
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Name is required")]
    NameRequired,
    #[error("participant registry is unavailable")]
    RegistryPoisoned,
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NameRequired => ApiError::NameRequired,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NameRequired => StatusCode::BAD_REQUEST,
            ApiError::RegistryPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

// Request/Response types

#[derive(Debug, Deserialize)]
struct AddParticipantRequest {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

// API Handlers

/// GET /participants
async fn list_participants(registry: SharedRegistry) -> Result<HttpResponse, ApiError> {
    let registry = registry.lock().map_err(|_| ApiError::RegistryPoisoned)?;
    Ok(HttpResponse::Ok().json(registry.list()))
}

/// POST /participants
/// Append a name and return the full list
async fn add_participant(
    registry: SharedRegistry,
    req: web::Json<AddParticipantRequest>,
) -> Result<HttpResponse, ApiError> {
    let name = req.name.as_deref().ok_or(ApiError::NameRequired)?;
    let mut registry = registry.lock().map_err(|_| ApiError::RegistryPoisoned)?;
    let names = registry.add(name)?;
    log::info!("Added participant {:?} ({} total)", name.trim(), names.len());
    Ok(HttpResponse::Ok().json(names))
}

/// DELETE /participants
async fn clear_participants(registry: SharedRegistry) -> Result<HttpResponse, ApiError> {
    let mut registry = registry.lock().map_err(|_| ApiError::RegistryPoisoned)?;
    registry.clear();
    log::info!("All participants removed");
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "All participants removed",
    }))
}

/// GET /health
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "race-to-the-bottom"
    }))
}

fn participants_resource(path: &str) -> actix_web::Resource {
    web::resource(path)
        .route(web::get().to(list_participants))
        .route(web::post().to(add_participant))
        .route(web::delete().to(clear_participants))
}

/// Register routes. The registry itself is supplied as app data by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Unreadable bodies count as a missing name
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected participant body: {}", err);
        ApiError::NameRequired.into()
    });

    cfg.app_data(json_config)
        .route("/health", web::get().to(health))
        .service(participants_resource("/participants"))
        .service(participants_resource("/api/participants"));
}

/// Allow any origin, like the browser client expects
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(86400)
}
