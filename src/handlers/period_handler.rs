use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    content::raw_bank_schema,
    errors::AppError,
    models::dto::response::{PeriodForTaking, PeriodSummary},
};

#[get("/periods")]
async fn list_periods(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let periods: Vec<PeriodSummary> = state
        .session_service
        .bank()
        .periods()
        .map(PeriodSummary::from)
        .collect();
    Ok(HttpResponse::Ok().json(periods))
}

#[get("/periods/{key}")]
async fn get_period(
    state: web::Data<AppState>,
    key: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let period = state.session_service.bank().get_period(&key)?;
    Ok(HttpResponse::Ok().json(PeriodForTaking::from(period)))
}

/// JSON Schema of the question bank content file.
#[get("/question-bank/schema")]
async fn question_bank_schema(_auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(raw_bank_schema())
}
