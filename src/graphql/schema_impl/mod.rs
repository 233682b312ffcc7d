pub mod mutations;
pub mod queries;

use async_graphql::{EmptySubscription, Schema as GraphQLSchema};

use crate::app_state::AppState;

pub use mutations::MutationRoot;
pub use queries::QueryRoot;

pub type Schema = GraphQLSchema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the quiz schema over shared state. Callers attach `Claims` per request.
pub fn create_schema(state: AppState) -> Schema {
    GraphQLSchema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdl_exposes_session_operations() {
        let sdl = create_schema(AppState::test_state()).sdl();

        for field in ["startSession", "selectAnswer", "finalizeSession", "report"] {
            assert!(sdl.contains(field), "missing {field}");
        }
    }
}
