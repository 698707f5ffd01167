use async_graphql::{Context, Enum, InputObject, Object, SimpleObject, ID};
use chrono::NaiveDate;
use entity::time_off::{Kind, Status, TimeOffRequest};
use entity::user::Role;

use crate::auth::Viewer;
use crate::state::new_record_id;
use crate::summary::{time_off_summary, TimeOffSummary};

use super::{
    error_with_code, not_found, read_store, require_role, required_text, state, store_error,
    transition, validation_error, viewer, write_store,
};

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum TimeOffKind {
    Vacation,
    Sick,
    Personal,
}

impl From<Kind> for TimeOffKind {
    fn from(value: Kind) -> Self {
        match value {
            Kind::Vacation => TimeOffKind::Vacation,
            Kind::Sick => TimeOffKind::Sick,
            Kind::Personal => TimeOffKind::Personal,
        }
    }
}

impl From<TimeOffKind> for Kind {
    fn from(value: TimeOffKind) -> Self {
        match value {
            TimeOffKind::Vacation => Kind::Vacation,
            TimeOffKind::Sick => Kind::Sick,
            TimeOffKind::Personal => Kind::Personal,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum TimeOffStatus {
    Pending,
    Approved,
    Rejected,
}

impl From<Status> for TimeOffStatus {
    fn from(value: Status) -> Self {
        match value {
            Status::Pending => TimeOffStatus::Pending,
            Status::Approved => TimeOffStatus::Approved,
            Status::Rejected => TimeOffStatus::Rejected,
        }
    }
}

impl From<TimeOffStatus> for Status {
    fn from(value: TimeOffStatus) -> Self {
        match value {
            TimeOffStatus::Pending => Status::Pending,
            TimeOffStatus::Approved => Status::Approved,
            TimeOffStatus::Rejected => Status::Rejected,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "TimeOffRequest")]
pub struct TimeOffRequestNode {
    pub id: ID,
    #[graphql(name = "employeeId")]
    pub employee_id: ID,
    #[graphql(name = "employeeName")]
    pub employee_name: String,
    pub kind: TimeOffKind,
    #[graphql(name = "startDate")]
    pub start_date: NaiveDate,
    #[graphql(name = "endDate")]
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: TimeOffStatus,
    pub days: i64,
}

impl From<&TimeOffRequest> for TimeOffRequestNode {
    fn from(request: &TimeOffRequest) -> Self {
        Self {
            id: ID::from(request.id.clone()),
            employee_id: ID::from(request.employee_id.clone()),
            employee_name: request.employee_name.clone(),
            kind: request.kind.into(),
            start_date: request.start_date,
            end_date: request.end_date,
            reason: request.reason.clone(),
            status: request.status.into(),
            days: request.days(),
        }
    }
}

#[derive(InputObject, Clone)]
pub struct NewTimeOffInput {
    pub kind: Option<TimeOffKind>,
    #[graphql(name = "startDate")]
    pub start_date: NaiveDate,
    #[graphql(name = "endDate")]
    pub end_date: NaiveDate,
    pub reason: String,
}

/// Employees see their own requests; Manager and HR see everyone's.
pub fn visible_requests(viewer: &Viewer, requests: &[TimeOffRequest]) -> Vec<TimeOffRequest> {
    requests
        .iter()
        .filter(|request| viewer.role != Role::Employee || request.employee_id == viewer.id)
        .cloned()
        .collect()
}

pub struct TimeOffQuery;

#[Object]
impl TimeOffQuery {
    async fn requests(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<TimeOffRequestNode>> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        let store = read_store(&state.time_off)?;
        Ok(visible_requests(&current, &store.snapshot())
            .iter()
            .map(TimeOffRequestNode::from)
            .collect())
    }

    async fn summary(&self, ctx: &Context<'_>) -> async_graphql::Result<TimeOffSummary> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        let store = read_store(&state.time_off)?;
        Ok(time_off_summary(&visible_requests(
            &current,
            &store.snapshot(),
        )))
    }
}

pub struct TimeOffMutation;

#[Object]
impl TimeOffMutation {
    /// Files a request for the viewer; every request starts pending.
    #[graphql(name = "submitRequest")]
    async fn submit_request(
        &self,
        ctx: &Context<'_>,
        input: NewTimeOffInput,
    ) -> async_graphql::Result<TimeOffRequestNode> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        let reason = required_text("reason", &input.reason)?;
        if input.end_date < input.start_date {
            return Err(validation_error("endDate must be on or after startDate"));
        }
        let request = TimeOffRequest {
            id: new_record_id(),
            employee_id: current.id.clone(),
            employee_name: current.name.clone(),
            kind: input.kind.unwrap_or(TimeOffKind::Vacation).into(),
            start_date: input.start_date,
            end_date: input.end_date,
            reason,
            status: Status::Pending,
        };
        let node = TimeOffRequestNode::from(&request);
        write_store(&state.time_off)?
            .add(request)
            .map_err(store_error)?;
        Ok(node)
    }

    /// Approval decision; managers only, pending requests only.
    #[graphql(name = "setRequestStatus")]
    async fn set_request_status(
        &self,
        ctx: &Context<'_>,
        id: ID,
        status: TimeOffStatus,
    ) -> async_graphql::Result<TimeOffRequestNode> {
        require_role(ctx, Role::Manager)?;
        let state = state(ctx)?;
        let mut store = write_store(&state.time_off)?;
        let existing = store
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| not_found("Time-off request not found"))?;
        let next = transition(existing.status, status.into())?;
        store.update(id.as_str(), |request| request.status = next);
        let updated = store
            .get(id.as_str())
            .ok_or_else(|| not_found("Time-off request not found"))?;
        Ok(TimeOffRequestNode::from(updated))
    }

    /// Withdraws a request: the owner may pull a pending one, managers may
    /// remove any.
    #[graphql(name = "deleteRequest")]
    async fn delete_request(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        let mut store = write_store(&state.time_off)?;
        if let Some(existing) = store.get(id.as_str()).cloned() {
            let owns_pending =
                existing.employee_id == current.id && existing.status == Status::Pending;
            if !current.has_role(Role::Manager) && !owns_pending {
                return Err(error_with_code("FORBIDDEN", "Insufficient permissions"));
            }
        }
        Ok(store.remove(id.as_str()))
    }
}
