//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use param_echo::Trace;
#[cfg(debug_assertions)]
use param_echo::doc::ApiDoc;
use param_echo::inbound::http::configure;
use param_echo::inbound::http::health::{HealthState, live, ready};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    json_limit: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(web::PayloadConfig::new(json_limit))
        .wrap(Trace)
        .service(ready)
        .service(live);

    // Swagger must be registered before `configure` installs the fallback.
    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app.configure(configure)
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        json_limit,
    } = config;

    let server = HttpServer::new(move || build_app(server_health_state.clone(), json_limit))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, json_limit, "server listening");
    health_state.mark_ready();
    Ok(server)
}
