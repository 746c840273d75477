//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, JwtConfig, OpenLibraryConfig, ServerConfig, SettingsError};

use state_builders::{build_http_state, build_token_verifier};
#[cfg(test)]
use state_builders::build_fixture_ports;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use book_reviews::domain::ports::TokenVerifier;
use book_reviews::inbound::http::configure_api;
use book_reviews::inbound::http::health::{HealthState, live, ready};
use book_reviews::inbound::http::state::HttpState;
use book_reviews::inbound::http::validation::{json_config, query_config};
use book_reviews::middleware::JsonOnly;
use book_reviews::Trace;
#[cfg(debug_assertions)]
use book_reviews::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    token_verifier: web::Data<dyn TokenVerifier>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        token_verifier,
    } = deps;

    let api = web::scope("/api").wrap(JsonOnly).configure(configure_api);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(token_verifier)
        .app_data(json_config())
        .app_data(query_config())
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.wrap(Trace)
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails or the
/// OpenLibrary client cannot be built.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)
        .map_err(|err| std::io::Error::other(format!("build OpenLibrary client: {err}")))?;
    let http_state = web::Data::new(http_state);
    let token_verifier = web::Data::from(build_token_verifier(&config.jwt));
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            token_verifier: token_verifier.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
