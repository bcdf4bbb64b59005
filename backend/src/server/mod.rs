//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};

#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::analyses::{get_analysis, list_analyses, submit_analysis};
use backend::inbound::http::health::{live, ready, HealthState};
use backend::inbound::http::journal::{create_journal_entry, list_journal_entries};
use backend::inbound::http::knowledge::list_knowledge_articles;
use backend::inbound::http::routines::get_routines;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::subscription::{get_subscription, update_subscription};
use backend::inbound::http::users::{current_user, login, logout, register};
use backend::Trace;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .app_data(http_state)
        .service(register)
        .service(login)
        .service(logout)
        .service(current_user)
        .service(submit_analysis)
        .service(list_analyses)
        .service(get_analysis)
        .service(get_routines)
        .service(get_subscription)
        .service(update_subscription)
        .service(create_journal_entry)
        .service(list_journal_entries)
        .service(list_knowledge_articles);

    let app = App::new()
        .app_data(health_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Build and start the HTTP server from the given configuration.
///
/// The returned [`Server`] future runs until stopped; the health state is
/// marked ready once the listener is bound.
pub fn run(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();

    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    Ok(server.run())
}
