#[cfg(feature = "server")]
use std::sync::Arc;
#[cfg(feature = "server")]
use std::time::Duration;

#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::{App, HttpResponse, HttpServer, error, middleware, web};
#[cfg(feature = "server")]
use serde_json::json;
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::routes::characters::{show_character, show_characters, transition_characters};
#[cfg(feature = "server")]
use crate::routes::main::index;
#[cfg(feature = "server")]
use crate::upstream::{CharacterReader, HttpCharacterReader};

pub mod domain;
pub mod models;
pub mod pagination;
pub mod state;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod upstream;

/// Registers every route of the application.
#[cfg(feature = "server")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Malformed transition bodies answer with the same JSON shape as
    // validation failures.
    let form_config = web::FormConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({ "error": message })),
        )
        .into()
    });

    cfg.app_data(form_config)
        .service(index)
        .service(show_characters)
        .service(transition_characters)
        .service(show_character);
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let reader = HttpCharacterReader::new(
        &server_config.upstream_url,
        Duration::from_secs(server_config.upstream_timeout_secs),
    )
    .map_err(|e| std::io::Error::other(format!("Failed to build upstream client: {e}")))?;
    let reader: Arc<dyn CharacterReader> = Arc::new(reader);
    let reader = web::Data::from(reader);

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    log::info!(
        "Serving characters from {} on {}:{}",
        server_config.upstream_url,
        server_config.address,
        server_config.port
    );

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", &server_config.assets_dir))
            .configure(configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(reader.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
