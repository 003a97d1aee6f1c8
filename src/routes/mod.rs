//! HTTP handlers and the helpers they share.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, http::header};
use serde_json::json;
use tera::{Context, Tera};

use crate::services::ServiceError;

pub mod characters;
pub mod main;

/// Renders `template` into an HTML response with the given status.
pub fn render_template_with_status(
    tera: &Tera,
    template: &str,
    context: &Context,
    status: StatusCode,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_template_with_status(tera, template, context, StatusCode::OK)
}

/// Permanent (308) redirect.
pub fn redirect_permanent(location: &str) -> HttpResponse {
    HttpResponse::PermanentRedirect()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Maps a service failure onto a JSON error response.
pub fn service_error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::Form(message) => HttpResponse::BadRequest().json(json!({ "error": message })),
        ServiceError::Internal(message) => {
            log::error!("{message}");
            HttpResponse::InternalServerError().json(json!({ "error": "internal error" }))
        }
    }
}
