use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use quiz_engine::{
    app_state::AppState, auth::JwtService, config::Config, graphql::create_schema, handlers,
    middleware::RequestIdMiddleware,
};

fn build_cors(allowed_origin: Option<&str>) -> Cors {
    let cors = match allowed_origin {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default().allow_any_origin(),
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers(vec![header::HeaderName::from_static(
            quiz_engine::middleware::REQUEST_ID_HEADER,
        )])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();

    if config.is_production() {
        if let Err(err) = config.validate_for_production() {
            log::error!("Refusing to start: {}", err);
            return Err(std::io::Error::other(err.to_string()));
        }
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let jwt_service = web::Data::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_expiration_hours,
    ));

    let app_state = AppState::new(config).await.map_err(|err| {
        log::error!("Failed to initialize application state: {}", err);
        std::io::Error::other(err.to_string())
    })?;
    let schema = web::Data::new(create_schema(app_state.clone()));
    let state = web::Data::new(app_state);

    log::info!("Starting HTTP server on {}:{}", host, port);
    log::info!("GraphiQL playground: http://{}:{}/graphiql", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(schema.clone())
            .app_data(jwt_service.clone())
            .wrap(build_cors(state.config.cors_allowed_origin.as_deref()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
