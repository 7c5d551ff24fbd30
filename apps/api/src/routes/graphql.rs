//! GraphQL HTTP route handlers
//!
//! - `POST /graphql` - Execute a query or mutation
//! - `GET /graphql/playground` - GraphQL Playground (when enabled)

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::graphql::{Executor, Outcome};

/// Create the GraphQL router
pub fn graphql_router(executor: Executor, playground: bool) -> Router {
    let mut router = Router::new().route("/", post(graphql_handler));
    if playground {
        router = router.route("/playground", get(graphql_playground));
    }
    router.with_state(executor)
}

async fn graphql_handler(State(executor): State<Executor>, req: GraphQLRequest) -> Response {
    match executor.execute(req.into_inner()).await {
        Outcome::Executed(response) => GraphQLResponse::from(response).into_response(),
        // rejected documents are answered with `errors` only
        rejected => Json(rejected).into_response(),
    }
}

async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
