use async_graphql::{Context, InputObject, Object, SimpleObject, ID};
use chrono::NaiveDateTime;

use crate::schedule::{expand_selection, task_event, ScheduleEvent};
use crate::schema::tasks::visible_tasks;

use super::{not_found, read_store, required_text, state, store_error, viewer, write_store};

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "ScheduleEvent")]
pub struct ScheduleEventNode {
    pub id: ID,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

impl From<&ScheduleEvent> for ScheduleEventNode {
    fn from(event: &ScheduleEvent) -> Self {
        Self {
            id: ID::from(event.id.clone()),
            title: event.title.clone(),
            start: event.start,
            end: event.end,
        }
    }
}

/// A widget-initiated selection, in the calendar's own descriptor shape.
#[derive(InputObject, Clone)]
pub struct ScheduleSelectionInput {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

#[derive(InputObject, Clone)]
pub struct UpdateScheduleEventInput {
    pub id: ID,
    pub title: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

pub struct ScheduleQuery;

#[Object]
impl ScheduleQuery {
    /// Everything the calendar widget renders: stored events plus the
    /// viewer's visible tasks projected onto their due dates.
    async fn events(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "includeTasks", default = true)] include_tasks: bool,
    ) -> async_graphql::Result<Vec<ScheduleEventNode>> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        let mut events: Vec<ScheduleEventNode> = read_store(&state.schedule)?
            .iter()
            .map(ScheduleEventNode::from)
            .collect();
        if include_tasks {
            let tasks = read_store(&state.tasks)?;
            events.extend(
                visible_tasks(&current, &tasks.snapshot())
                    .iter()
                    .map(|task| ScheduleEventNode::from(&task_event(task))),
            );
        }
        Ok(events)
    }
}

pub struct ScheduleMutation;

#[Object]
impl ScheduleMutation {
    /// Stores a widget selection. A multi-day selection lands as one block
    /// per day, so this returns every event that was created.
    #[graphql(name = "createEvents")]
    async fn create_events(
        &self,
        ctx: &Context<'_>,
        input: ScheduleSelectionInput,
    ) -> async_graphql::Result<Vec<ScheduleEventNode>> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let title = required_text("title", &input.title)?;
        let events = expand_selection(&title, input.start, input.end);
        let nodes: Vec<ScheduleEventNode> = events.iter().map(ScheduleEventNode::from).collect();
        let mut store = write_store(&state.schedule)?;
        for event in events {
            store.add(event).map_err(store_error)?;
        }
        Ok(nodes)
    }

    #[graphql(name = "updateEvent")]
    async fn update_event(
        &self,
        ctx: &Context<'_>,
        input: UpdateScheduleEventInput,
    ) -> async_graphql::Result<ScheduleEventNode> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let mut store = write_store(&state.schedule)?;
        if store.get(input.id.as_str()).is_none() {
            return Err(not_found("Schedule event not found"));
        }
        store.update(input.id.as_str(), |event| {
            if let Some(title) = &input.title {
                event.title = title.clone();
            }
            if let Some(start) = input.start {
                event.start = start;
            }
            if let Some(end) = input.end {
                event.end = Some(end);
            }
        });
        let updated = store
            .get(input.id.as_str())
            .ok_or_else(|| not_found("Schedule event not found"))?;
        Ok(ScheduleEventNode::from(updated))
    }

    #[graphql(name = "deleteEvent")]
    async fn delete_event(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let removed = write_store(&state.schedule)?.remove(id.as_str());
        Ok(removed)
    }
}
