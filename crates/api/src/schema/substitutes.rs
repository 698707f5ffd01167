use async_graphql::{Context, Enum, InputObject, Object, SimpleObject, ID};
use chrono::NaiveDate;
use entity::substitute::{Status, SubstituteRequest};
use entity::user::Role;

use crate::state::new_record_id;

use super::{
    not_found, read_store, require_role, required_text, state, store_error, transition,
    write_store,
};

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum SubstituteStatus {
    Open,
    Assigned,
}

impl From<Status> for SubstituteStatus {
    fn from(value: Status) -> Self {
        match value {
            Status::Open => SubstituteStatus::Open,
            Status::Assigned => SubstituteStatus::Assigned,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "SubstituteRequest")]
pub struct SubstituteRequestNode {
    pub id: ID,
    #[graphql(name = "employeeName")]
    pub employee_name: String,
    #[graphql(name = "absenceDate")]
    pub absence_date: NaiveDate,
    pub duration: String,
    pub reason: String,
    #[graphql(name = "substituteName")]
    pub substitute_name: Option<String>,
    pub status: SubstituteStatus,
}

impl From<&SubstituteRequest> for SubstituteRequestNode {
    fn from(request: &SubstituteRequest) -> Self {
        Self {
            id: ID::from(request.id.clone()),
            employee_name: request.employee_name.clone(),
            absence_date: request.absence_date,
            duration: request.duration.clone(),
            reason: request.reason.clone(),
            substitute_name: request.substitute_name.clone(),
            status: request.status.into(),
        }
    }
}

#[derive(InputObject, Clone)]
pub struct NewSubstituteInput {
    #[graphql(name = "employeeName")]
    pub employee_name: String,
    #[graphql(name = "absenceDate")]
    pub absence_date: NaiveDate,
    pub duration: String,
    pub reason: String,
    /// Naming a substitute up front opens the request already assigned.
    #[graphql(name = "substituteName")]
    pub substitute_name: Option<String>,
}

pub struct SubstituteQuery;

#[Object]
impl SubstituteQuery {
    async fn requests(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Vec<SubstituteRequestNode>> {
        require_role(ctx, Role::Manager)?;
        let state = state(ctx)?;
        let store = read_store(&state.substitutes)?;
        Ok(store.iter().map(SubstituteRequestNode::from).collect())
    }
}

pub struct SubstituteMutation;

#[Object]
impl SubstituteMutation {
    #[graphql(name = "createRequest")]
    async fn create_request(
        &self,
        ctx: &Context<'_>,
        input: NewSubstituteInput,
    ) -> async_graphql::Result<SubstituteRequestNode> {
        require_role(ctx, Role::Manager)?;
        let state = state(ctx)?;
        let employee_name = required_text("employeeName", &input.employee_name)?;
        let duration = required_text("duration", &input.duration)?;
        let reason = required_text("reason", &input.reason)?;
        let substitute_name = input
            .substitute_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        let status = if substitute_name.is_some() {
            Status::Assigned
        } else {
            Status::Open
        };
        let request = SubstituteRequest {
            id: new_record_id(),
            employee_name,
            absence_date: input.absence_date,
            duration,
            reason,
            substitute_name,
            status,
        };
        let node = SubstituteRequestNode::from(&request);
        write_store(&state.substitutes)?
            .add(request)
            .map_err(store_error)?;
        Ok(node)
    }

    /// Fills an open request with a substitute.
    #[graphql(name = "assignSubstitute")]
    async fn assign_substitute(
        &self,
        ctx: &Context<'_>,
        id: ID,
        #[graphql(name = "substituteName")] substitute_name: String,
    ) -> async_graphql::Result<SubstituteRequestNode> {
        require_role(ctx, Role::Manager)?;
        let state = state(ctx)?;
        let substitute_name = required_text("substituteName", &substitute_name)?;
        let mut store = write_store(&state.substitutes)?;
        let existing = store
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| not_found("Substitute request not found"))?;
        let status = transition(existing.status, Status::Assigned)?;
        store.update(id.as_str(), |request| {
            request.substitute_name = Some(substitute_name.clone());
            request.status = status;
        });
        let updated = store
            .get(id.as_str())
            .ok_or_else(|| not_found("Substitute request not found"))?;
        Ok(SubstituteRequestNode::from(updated))
    }

    #[graphql(name = "deleteRequest")]
    async fn delete_request(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        require_role(ctx, Role::Manager)?;
        let state = state(ctx)?;
        let removed = write_store(&state.substitutes)?.remove(id.as_str());
        Ok(removed)
    }
}
