//! Request execution pipeline
//!
//! For every request: parse the document, run the depth guard, build a
//! fresh loader registry, then execute. Documents that fail to parse or are
//! nested too deeply never reach the schema; their response carries
//! `errors` and no `data` member at all.

use async_graphql::parser::parse_query;
use async_graphql::{Request, Response, ServerError};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::GraphQLConfig;
use crate::repositories::SharedStore;

use super::depth;
use super::loaders::{LoaderSettings, Loaders};
use super::schema::{build_schema, QuillSchema};

/// Result of handing one request to the [`Executor`]
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// The document ran; `data` is present even when it is null
    Executed(Response),
    /// The document was refused before execution
    Rejected { errors: Vec<ServerError> },
}

impl Outcome {
    /// Errors of the response, whichever way it ended
    pub fn errors(&self) -> &[ServerError] {
        match self {
            Outcome::Executed(response) => &response.errors,
            Outcome::Rejected { errors } => errors,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected { .. })
    }
}

/// Executes GraphQL requests against the store
#[derive(Clone)]
pub struct Executor {
    schema: QuillSchema,
    store: SharedStore,
    max_depth: usize,
    loader_settings: LoaderSettings,
}

impl Executor {
    /// Create an executor with explicit limits
    pub fn new(store: SharedStore, max_depth: usize, loader_settings: LoaderSettings) -> Self {
        Self {
            schema: build_schema(store.clone()),
            store,
            max_depth,
            loader_settings,
        }
    }

    /// Create an executor from the GraphQL configuration
    pub fn from_config(store: SharedStore, config: &GraphQLConfig) -> Self {
        Self::new(store, config.max_depth, config.loader_settings())
    }

    pub fn schema(&self) -> &QuillSchema {
        &self.schema
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Execute one request
    pub async fn execute(&self, request: Request) -> Outcome {
        let document = match parse_query(&request.query) {
            Ok(document) => document,
            Err(err) => {
                debug!(error = %err, "Rejected unparsable query");
                return Outcome::Rejected {
                    errors: vec![err.into()],
                };
            }
        };

        let violations = depth::validate(&document, self.max_depth);
        if !violations.is_empty() {
            warn!(
                operation = request.operation_name.as_deref().unwrap_or("<anonymous>"),
                max_depth = self.max_depth,
                violations = violations.len(),
                "Rejected over-nested query"
            );
            return Outcome::Rejected {
                errors: violations.into_iter().map(ServerError::from).collect(),
            };
        }

        debug!(
            operation = request.operation_name.as_deref().unwrap_or("<anonymous>"),
            "Executing GraphQL request"
        );
        let loaders = Loaders::new(self.store.clone(), self.loader_settings);
        Outcome::Executed(self.schema.execute(request.data(loaders)).await)
    }
}
