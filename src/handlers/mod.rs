pub mod graphql_handler;
pub mod health_handler;
pub mod period_handler;
pub mod session_handler;

use actix_web::web;

use crate::auth::AuthMiddleware;

pub use graphql_handler::{graphiql, graphql};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use period_handler::{get_period, list_periods, question_bank_schema};
pub use session_handler::{
    finalize_session, get_report, get_score, get_session, list_sessions, select_answer,
    start_session,
};

/// Registers every route. Expects `AppState`, `JwtService` and the GraphQL
/// `Schema` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_live)
        .service(health_check_ready)
        .service(graphiql)
        .service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .service(list_periods)
                .service(get_period)
                .service(question_bank_schema)
                .service(start_session)
                .service(list_sessions)
                .service(get_session)
                .service(select_answer)
                .service(finalize_session)
                .service(get_score)
                .service(get_report)
                .service(graphql),
        );
}
