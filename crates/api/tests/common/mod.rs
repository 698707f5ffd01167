#![allow(dead_code)]

use std::sync::Arc;

use api::auth::{find_by_id, AuthConfig, Viewer};
use api::schema::{build_schema, AppSchema};
use api::state::WorkforceState;
use async_graphql::{Request, Response, Schema, Variables};
use serde_json::Value;

pub type SuiteSchema = Schema<
    api::schema::QueryRoot,
    api::schema::MutationRoot,
    async_graphql::EmptySubscription,
>;

pub struct TestContext {
    pub schema: SuiteSchema,
}

impl TestContext {
    /// Schema over the demo fixtures, the same dataset the server boots with.
    pub fn seeded() -> Self {
        let state = Arc::new(WorkforceState::seed_demo());
        let auth = Arc::new(AuthConfig {
            jwt_secret: "test-secret".into(),
            session_ttl_minutes: 15,
        });
        let AppSchema(schema) = build_schema(state, auth);
        Self { schema }
    }
}

/// Directory users by fixture id: "1" employee, "2" manager, "3" HR.
pub fn viewer(id: &str) -> Viewer {
    Viewer::of(find_by_id(id).expect("directory user"))
}

pub fn employee() -> Viewer {
    viewer("1")
}

pub fn manager() -> Viewer {
    viewer("2")
}

pub fn hr() -> Viewer {
    viewer("3")
}

pub async fn exec(
    schema: &SuiteSchema,
    as_viewer: Option<Viewer>,
    query: &str,
    vars: Value,
) -> Response {
    let mut request = Request::new(query).variables(Variables::from_json(vars));
    if let Some(viewer) = as_viewer {
        request = request.data(viewer);
    }
    schema.execute(request).await
}

/// Asserts the response failed with the given error code extension.
pub fn assert_error_code(resp: &Response, code: &str) {
    assert!(
        !resp.errors.is_empty(),
        "expected an error with code {}, got none",
        code
    );
    let found = resp
        .errors
        .iter()
        .any(|err| format!("{:?}", err.extensions).contains(code));
    assert!(
        found,
        "expected error code {}, got {:?}",
        code, resp.errors
    );
}

pub fn data(resp: Response) -> Value {
    assert!(resp.errors.is_empty(), "unexpected errors: {:?}", resp.errors);
    resp.data.into_json().expect("response data as json")
}
