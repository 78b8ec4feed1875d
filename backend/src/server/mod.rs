//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use std::time::Duration;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use state_builders::build_http_state;
use users_api::Trace;
#[cfg(debug_assertions)]
use users_api::doc::ApiDoc;
use users_api::inbound::http::health::{HealthState, live, ready};
use users_api::inbound::http::state::HttpState;
use users_api::inbound::http::users::{batch_create, create_user, list_users};

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
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
        .app_data(http_state)
        .wrap(Trace)
        .service(list_users)
        .service(create_user)
        .service(batch_create)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Spawn the deferred housekeeping task.
///
/// The task only logs; it never blocks startup or request handling.
fn spawn_housekeeping(delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        info!(target: "housekeeping", "cleanup started");
    });
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// Readiness is flagged once the listener is bound, and the housekeeping
/// task is scheduled.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        bind_addr,
        db_pool: _,
        action_log_delay: _,
        cleanup_delay,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(actix_web::middleware::Condition::from_option(
            prometheus.clone(),
        ));

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    spawn_housekeeping(cleanup_delay);
    Ok(server)
}
