use async_graphql::{Context, Enum, InputObject, Object, SimpleObject, ID};
use chrono::{NaiveDate, Utc};
use entity::timesheet::{Status, TimesheetEntry};

use crate::state::new_record_id;
use crate::summary::{timesheet_summary, TimesheetSummary};

use super::{
    not_found, read_store, state, store_error, text_or, transition, viewer, write_store,
};

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum TimesheetStatus {
    Draft,
    Submitted,
    Approved,
}

impl From<Status> for TimesheetStatus {
    fn from(value: Status) -> Self {
        match value {
            Status::Draft => TimesheetStatus::Draft,
            Status::Submitted => TimesheetStatus::Submitted,
            Status::Approved => TimesheetStatus::Approved,
        }
    }
}

impl From<TimesheetStatus> for Status {
    fn from(value: TimesheetStatus) -> Self {
        match value {
            TimesheetStatus::Draft => Status::Draft,
            TimesheetStatus::Submitted => Status::Submitted,
            TimesheetStatus::Approved => Status::Approved,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "TimesheetEntry")]
pub struct TimesheetEntryNode {
    pub id: ID,
    pub date: NaiveDate,
    pub project: String,
    pub hours: f64,
    pub description: String,
    pub status: TimesheetStatus,
}

impl From<&TimesheetEntry> for TimesheetEntryNode {
    fn from(entry: &TimesheetEntry) -> Self {
        Self {
            id: ID::from(entry.id.clone()),
            date: entry.date,
            project: entry.project.clone(),
            hours: entry.hours,
            description: entry.description.clone(),
            status: entry.status.into(),
        }
    }
}

#[derive(InputObject, Clone)]
pub struct NewTimesheetInput {
    pub project: Option<String>,
    pub description: Option<String>,
    pub hours: Option<f64>,
    pub date: Option<NaiveDate>,
    pub status: Option<TimesheetStatus>,
}

#[derive(InputObject, Clone)]
pub struct UpdateTimesheetInput {
    pub id: ID,
    pub project: Option<String>,
    pub description: Option<String>,
    pub hours: Option<f64>,
    pub status: Option<TimesheetStatus>,
}

pub struct TimesheetQuery;

#[Object]
impl TimesheetQuery {
    async fn entries(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<TimesheetEntryNode>> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let store = read_store(&state.timesheets)?;
        Ok(store.iter().map(TimesheetEntryNode::from).collect())
    }

    async fn summary(&self, ctx: &Context<'_>) -> async_graphql::Result<TimesheetSummary> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let store = read_store(&state.timesheets)?;
        Ok(timesheet_summary(&store.snapshot()))
    }
}

pub struct TimesheetMutation;

#[Object]
impl TimesheetMutation {
    /// New entry from the timesheet form. Blank fields fall back to the
    /// screen's placeholder values; a missing date means "today".
    #[graphql(name = "createEntry")]
    async fn create_entry(
        &self,
        ctx: &Context<'_>,
        input: NewTimesheetInput,
    ) -> async_graphql::Result<TimesheetEntryNode> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let hours = match input.hours {
            Some(hours) if hours > 0.0 => hours,
            _ => 1.0,
        };
        let entry = TimesheetEntry {
            id: new_record_id(),
            date: input.date.unwrap_or_else(|| Utc::now().date_naive()),
            project: text_or(input.project, "Untitled Project"),
            description: text_or(input.description, "No description"),
            hours,
            status: input.status.unwrap_or(TimesheetStatus::Draft).into(),
        };
        let node = TimesheetEntryNode::from(&entry);
        write_store(&state.timesheets)?
            .add(entry)
            .map_err(store_error)?;
        Ok(node)
    }

    /// Patch update keyed by id; only fields present in the input change.
    /// Status moves go through the timesheet transition table.
    #[graphql(name = "updateEntry")]
    async fn update_entry(
        &self,
        ctx: &Context<'_>,
        input: UpdateTimesheetInput,
    ) -> async_graphql::Result<TimesheetEntryNode> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let mut store = write_store(&state.timesheets)?;
        let current = store
            .get(input.id.as_str())
            .cloned()
            .ok_or_else(|| not_found("Timesheet entry not found"))?;
        let status = match input.status {
            Some(next) => transition(current.status, next.into())?,
            None => current.status,
        };
        store.update(input.id.as_str(), |entry| {
            if let Some(project) = &input.project {
                entry.project = project.clone();
            }
            if let Some(description) = &input.description {
                entry.description = description.clone();
            }
            if let Some(hours) = input.hours {
                entry.hours = hours;
            }
            entry.status = status;
        });
        let updated = store
            .get(input.id.as_str())
            .ok_or_else(|| not_found("Timesheet entry not found"))?;
        Ok(TimesheetEntryNode::from(updated))
    }

    #[graphql(name = "deleteEntry")]
    async fn delete_entry(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let removed = write_store(&state.timesheets)?.remove(id.as_str());
        Ok(removed)
    }
}
