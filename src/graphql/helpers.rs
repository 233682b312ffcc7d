use async_graphql::{Context, ErrorExtensions};

use crate::{
    app_state::AppState,
    auth::Claims,
    errors::{AppError, AppResult},
};

/// Resolves the shared state and the caller's claims for a resolver.
///
/// Over HTTP the claims come from `AuthMiddleware`; a request executed
/// without them is answered with an `UNAUTHORIZED` error.
pub fn state_and_claims<'a>(ctx: &Context<'a>) -> async_graphql::Result<(&'a AppState, Claims)> {
    let state = ctx.data::<AppState>()?;
    let claims = ctx.data::<Claims>().cloned().map_err(|_| {
        AppError::Unauthorized("Authentication required".to_string()).extend()
    })?;
    Ok((state, claims))
}

/// Converts a GraphQL question index into a slot index.
pub fn parse_index(index: i32) -> AppResult<usize> {
    usize::try_from(index)
        .map_err(|_| AppError::InvalidOption(format!("Question index {} is out of range", index)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index(2).unwrap(), 2);
        assert!(matches!(parse_index(-1), Err(AppError::InvalidOption(_))));
    }
}
