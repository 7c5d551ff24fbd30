//! Test helper functions for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use async_graphql::{Request, Variables};
use serde_json::Value;

use quill_api::graphql::depth::DEFAULT_MAX_DEPTH;
use quill_api::{Executor, LoaderSettings, MemoryStore};

/// Executor over `store` with default limits
pub fn executor(store: &Arc<MemoryStore>) -> Executor {
    Executor::new(store.clone(), DEFAULT_MAX_DEPTH, LoaderSettings::default())
}

/// Execute `query` and return the response serialized as JSON
pub async fn run(executor: &Executor, query: &str) -> Value {
    run_with(executor, query, Value::Null).await
}

/// Execute `query` with `variables` and return the response as JSON
pub async fn run_with(executor: &Executor, query: &str, variables: Value) -> Value {
    let request = Request::new(query).variables(Variables::from_json(variables));
    let response = executor.execute(request).await;
    serde_json::to_value(&response).unwrap()
}

/// `extensions.code` of every error in a JSON response
pub fn error_codes(response: &Value) -> Vec<String> {
    response["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["extensions"]["code"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Assert that a response carries no errors
pub fn assert_no_errors(response: &Value) {
    assert!(
        response.get("errors").is_none(),
        "unexpected errors: {}",
        response["errors"]
    );
}
