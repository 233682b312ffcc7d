use actix_web::{get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{PaginationParams, SelectAnswerRequest, StartSessionRequest},
        response::{PaginatedSessions, PaginationMetadata, ScoreDto, SessionDto},
    },
};

#[post("/sessions")]
async fn start_session(
    state: web::Data<AppState>,
    request: web::Json<StartSessionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let session = state
        .session_service
        .start_session(auth.user_id(), &request.period_key)
        .await?;
    Ok(HttpResponse::Created().json(SessionDto::from(session)))
}

#[get("/sessions")]
async fn list_sessions(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    params.validate()?;
    let query = params.to_query();

    let (sessions, total) = state
        .session_service
        .list_sessions(auth.user_id(), &query)
        .await?;

    Ok(HttpResponse::Ok().json(PaginatedSessions {
        items: sessions.iter().map(SessionDto::from).collect(),
        pagination: PaginationMetadata::new(query.offset, query.limit, total),
    }))
}

#[get("/sessions/{id}")]
async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let session = state.session_service.get_session(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(SessionDto::from(session)))
}

#[put("/sessions/{id}/answers/{index}")]
async fn select_answer(
    state: web::Data<AppState>,
    path: web::Path<(String, usize)>,
    request: web::Json<SelectAnswerRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (id, index) = path.into_inner();
    let request = request.into_inner();
    request.validate()?;

    let session = state
        .session_service
        .select_answer(auth.user_id(), &id, index, &request.option)
        .await?;
    Ok(HttpResponse::Ok().json(SessionDto::from(session)))
}

#[post("/sessions/{id}/finalize")]
async fn finalize_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let session = state.session_service.finalize(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(SessionDto::from(session)))
}

#[get("/sessions/{id}/score")]
async fn get_score(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state.session_service.score(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(ScoreDto::from(result)))
}

#[get("/sessions/{id}/report")]
async fn get_report(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let report = state.session_service.report(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(report))
}
