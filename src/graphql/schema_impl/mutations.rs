use async_graphql::{Context, Object, ResultExt, ID};
use validator::Validate;

use crate::{
    errors::AppError,
    graphql::helpers::{parse_index, state_and_claims},
    models::dto::{
        request::{SelectAnswerInput, StartSessionRequest},
        response::SessionDto,
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn start_session(
        &self,
        ctx: &Context<'_>,
        input: StartSessionRequest,
    ) -> async_graphql::Result<SessionDto> {
        let (state, claims) = state_and_claims(ctx)?;
        input.validate().map_err(AppError::from).extend()?;

        state
            .session_service
            .start_session(claims.user_id(), &input.period_key)
            .await
            .map(SessionDto::from)
            .extend()
    }

    async fn select_answer(
        &self,
        ctx: &Context<'_>,
        input: SelectAnswerInput,
    ) -> async_graphql::Result<SessionDto> {
        let (state, claims) = state_and_claims(ctx)?;
        let index = parse_index(input.question_index).extend()?;
        input.validate().map_err(AppError::from).extend()?;

        state
            .session_service
            .select_answer(claims.user_id(), &input.session_id, index, &input.option)
            .await
            .map(SessionDto::from)
            .extend()
    }

    async fn finalize_session(
        &self,
        ctx: &Context<'_>,
        session_id: ID,
    ) -> async_graphql::Result<SessionDto> {
        let (state, claims) = state_and_claims(ctx)?;

        state
            .session_service
            .finalize(claims.user_id(), &session_id)
            .await
            .map(SessionDto::from)
            .extend()
    }
}
