use async_graphql::{Context, Object, ResultExt, ID};

use crate::{
    graphql::helpers::state_and_claims,
    models::{
        domain::ReportView,
        dto::{
            request::PaginationParams,
            response::{
                PaginatedSessions, PaginationMetadata, PeriodForTaking, PeriodSummary, ScoreDto,
                SessionDto,
            },
        },
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Periods of the question bank in authored order.
    async fn periods(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<PeriodSummary>> {
        let (state, _claims) = state_and_claims(ctx)?;

        Ok(state
            .session_service
            .bank()
            .periods()
            .map(PeriodSummary::from)
            .collect())
    }

    /// A period's questions without their correct options.
    async fn period(&self, ctx: &Context<'_>, key: String) -> async_graphql::Result<PeriodForTaking> {
        let (state, _claims) = state_and_claims(ctx)?;

        state
            .session_service
            .bank()
            .get_period(&key)
            .map(PeriodForTaking::from)
            .extend()
    }

    async fn session(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<SessionDto> {
        let (state, claims) = state_and_claims(ctx)?;

        state
            .session_service
            .get_session(claims.user_id(), &id)
            .await
            .map(SessionDto::from)
            .extend()
    }

    async fn sessions(
        &self,
        ctx: &Context<'_>,
        offset: Option<i64>,
        limit: Option<i64>,
        period_key: Option<String>,
    ) -> async_graphql::Result<PaginatedSessions> {
        let (state, claims) = state_and_claims(ctx)?;

        let params = PaginationParams {
            offset,
            limit,
            period_key,
        };
        let query = params.to_query();

        let (sessions, total) = state
            .session_service
            .list_sessions(claims.user_id(), &query)
            .await
            .extend()?;

        Ok(PaginatedSessions {
            items: sessions.iter().map(SessionDto::from).collect(),
            pagination: PaginationMetadata::new(query.offset, query.limit, total),
        })
    }

    async fn score(&self, ctx: &Context<'_>, session_id: ID) -> async_graphql::Result<ScoreDto> {
        let (state, claims) = state_and_claims(ctx)?;

        state
            .session_service
            .score(claims.user_id(), &session_id)
            .await
            .map(ScoreDto::from)
            .extend()
    }

    async fn report(&self, ctx: &Context<'_>, session_id: ID) -> async_graphql::Result<ReportView> {
        let (state, claims) = state_and_claims(ctx)?;

        state
            .session_service
            .report(claims.user_id(), &session_id)
            .await
            .extend()
    }
}
