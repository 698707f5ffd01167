//! GraphQL surface of the suite.
//!
//! One query/mutation namespace per screen, mirroring the dashboard the
//! service backs. Every resolver reads the [`Viewer`] injected by the HTTP
//! layer; role checks happen here, at the boundary, never inside the stores.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_graphql::{Context, EmptySubscription, Error, ErrorExtensions, Object, Schema};
use entity::user::Role;
use entity::{StatusMachine, TransitionError};

use crate::auth::{AuthConfig, Viewer};
use crate::state::{Record, RecordStore, StoreError, WorkforceState};

pub mod announcements;
pub mod auth_ops;
pub mod dashboard;
pub mod expenses;
pub mod payroll;
pub mod projects;
pub mod schedule_ops;
pub mod substitutes;
pub mod tasks;
pub mod time_off;
pub mod timesheets;

pub struct AppSchema(pub Schema<QueryRoot, MutationRoot, EmptySubscription>);

pub fn build_schema(state: Arc<WorkforceState>, auth: Arc<AuthConfig>) -> AppSchema {
    let schema = Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .data(auth)
        .finish();
    AppSchema(schema)
}

pub struct QueryRoot;
pub struct MutationRoot;

#[Object]
impl QueryRoot {
    async fn me(&self, ctx: &Context<'_>) -> async_graphql::Result<auth_ops::MePayload> {
        auth_ops::me(ctx)
    }

    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<auth_ops::UserNode>> {
        auth_ops::users(ctx)
    }

    async fn timesheets(&self) -> timesheets::TimesheetQuery {
        timesheets::TimesheetQuery
    }

    async fn expenses(&self) -> expenses::ExpenseQuery {
        expenses::ExpenseQuery
    }

    #[graphql(name = "timeOff")]
    async fn time_off(&self) -> time_off::TimeOffQuery {
        time_off::TimeOffQuery
    }

    async fn payroll(&self) -> payroll::PayrollQuery {
        payroll::PayrollQuery
    }

    async fn projects(&self) -> projects::ProjectQuery {
        projects::ProjectQuery
    }

    async fn tasks(&self) -> tasks::TaskQuery {
        tasks::TaskQuery
    }

    async fn substitutes(&self) -> substitutes::SubstituteQuery {
        substitutes::SubstituteQuery
    }

    async fn announcements(&self) -> announcements::AnnouncementQuery {
        announcements::AnnouncementQuery
    }

    async fn dashboard(&self) -> dashboard::DashboardQuery {
        dashboard::DashboardQuery
    }

    async fn schedule(&self) -> schedule_ops::ScheduleQuery {
        schedule_ops::ScheduleQuery
    }
}

#[Object]
impl MutationRoot {
    async fn auth(&self) -> auth_ops::AuthMutation {
        auth_ops::AuthMutation
    }

    async fn timesheets(&self) -> timesheets::TimesheetMutation {
        timesheets::TimesheetMutation
    }

    async fn expenses(&self) -> expenses::ExpenseMutation {
        expenses::ExpenseMutation
    }

    #[graphql(name = "timeOff")]
    async fn time_off(&self) -> time_off::TimeOffMutation {
        time_off::TimeOffMutation
    }

    async fn payroll(&self) -> payroll::PayrollMutation {
        payroll::PayrollMutation
    }

    async fn projects(&self) -> projects::ProjectMutation {
        projects::ProjectMutation
    }

    async fn tasks(&self) -> tasks::TaskMutation {
        tasks::TaskMutation
    }

    async fn substitutes(&self) -> substitutes::SubstituteMutation {
        substitutes::SubstituteMutation
    }

    async fn announcements(&self) -> announcements::AnnouncementMutation {
        announcements::AnnouncementMutation
    }

    async fn schedule(&self) -> schedule_ops::ScheduleMutation {
        schedule_ops::ScheduleMutation
    }
}

fn state(ctx: &Context<'_>) -> async_graphql::Result<Arc<WorkforceState>> {
    ctx.data::<Arc<WorkforceState>>()
        .cloned()
        .map_err(|_| error_with_code("INTERNAL", "Missing application state"))
}

fn auth_config(ctx: &Context<'_>) -> async_graphql::Result<Arc<AuthConfig>> {
    ctx.data::<Arc<AuthConfig>>()
        .cloned()
        .map_err(|_| error_with_code("INTERNAL", "Missing auth configuration"))
}

fn viewer(ctx: &Context<'_>) -> async_graphql::Result<Viewer> {
    ctx.data::<Viewer>()
        .cloned()
        .map_err(|_| error_with_code("UNAUTHENTICATED", "Login required"))
}

fn require_role(ctx: &Context<'_>, role: Role) -> async_graphql::Result<Viewer> {
    let current = viewer(ctx)?;
    if current.has_role(role) {
        Ok(current)
    } else {
        Err(error_with_code("FORBIDDEN", "Insufficient permissions"))
    }
}

fn read_store<'a, T: Record>(
    lock: &'a RwLock<RecordStore<T>>,
) -> async_graphql::Result<RwLockReadGuard<'a, RecordStore<T>>> {
    lock.read()
        .map_err(|_| error_with_code("INTERNAL", "State lock poisoned"))
}

fn write_store<'a, T: Record>(
    lock: &'a RwLock<RecordStore<T>>,
) -> async_graphql::Result<RwLockWriteGuard<'a, RecordStore<T>>> {
    lock.write()
        .map_err(|_| error_with_code("INTERNAL", "State lock poisoned"))
}

fn error_with_code(code: &'static str, message: impl Into<String>) -> Error {
    Error::new(message).extend_with(|_, e| e.set("code", code))
}

fn validation_error(message: impl Into<String>) -> Error {
    error_with_code("VALIDATION", message)
}

fn not_found(message: impl Into<String>) -> Error {
    error_with_code("NOT_FOUND", message)
}

fn store_error(err: StoreError) -> Error {
    match err {
        StoreError::DuplicateId(id) => {
            error_with_code("CONFLICT", format!("Record id {} already exists", id))
        }
    }
}

/// Validates a status move against the record's transition table.
fn transition<S: StatusMachine>(current: S, next: S) -> async_graphql::Result<S> {
    current.transition(next).map_err(transition_error)
}

fn transition_error(err: TransitionError) -> Error {
    validation_error(format!(
        "Illegal status transition {} -> {}",
        err.from, err.to
    ))
}

/// Required free-text field: must be non-empty after trimming.
fn required_text(field: &str, value: &str) -> async_graphql::Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(validation_error(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Optional free-text field with the screen's fallback label.
fn text_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => fallback.to_string(),
    }
}
