use async_graphql::{Context, Enum, InputObject, Object, SimpleObject, ID};
use chrono::{NaiveDate, Utc};
use entity::task::{Milestone, Priority, Status, Task};
use entity::user::Role;
use tracing::info_span;

use crate::auth::Viewer;
use crate::state::new_record_id;
use crate::summary::{task_summary, TaskSummary};

use super::{
    error_with_code, not_found, read_store, require_role, required_text, state, store_error,
    transition, viewer, write_store,
};

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl From<Status> for TaskStatus {
    fn from(value: Status) -> Self {
        match value {
            Status::Pending => TaskStatus::Pending,
            Status::InProgress => TaskStatus::InProgress,
            Status::Completed => TaskStatus::Completed,
        }
    }
}

impl From<TaskStatus> for Status {
    fn from(value: TaskStatus) -> Self {
        match value {
            TaskStatus::Pending => Status::Pending,
            TaskStatus::InProgress => Status::InProgress,
            TaskStatus::Completed => Status::Completed,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl From<Priority> for TaskPriority {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Low => TaskPriority::Low,
            Priority::Medium => TaskPriority::Medium,
            Priority::High => TaskPriority::High,
        }
    }
}

impl From<TaskPriority> for Priority {
    fn from(value: TaskPriority) -> Self {
        match value {
            TaskPriority::Low => Priority::Low,
            TaskPriority::Medium => Priority::Medium,
            TaskPriority::High => Priority::High,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Task")]
pub struct TaskNode {
    pub id: ID,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[graphql(name = "assignedTo")]
    pub assigned_to: ID,
    #[graphql(name = "assignedBy")]
    pub assigned_by: ID,
    #[graphql(name = "dueDate")]
    pub due_date: NaiveDate,
}

impl From<&Task> for TaskNode {
    fn from(task: &Task) -> Self {
        Self {
            id: ID::from(task.id.clone()),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.into(),
            priority: task.priority.into(),
            assigned_to: ID::from(task.assigned_to.clone()),
            assigned_by: ID::from(task.assigned_by.clone()),
            due_date: task.due_date,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Milestone")]
pub struct MilestoneNode {
    pub id: ID,
    pub text: String,
    pub date: NaiveDate,
}

impl From<&Milestone> for MilestoneNode {
    fn from(milestone: &Milestone) -> Self {
        Self {
            id: ID::from(milestone.id.clone()),
            text: milestone.text.clone(),
            date: milestone.date,
        }
    }
}

#[derive(InputObject, Clone)]
pub struct NewTaskInput {
    pub title: String,
    pub description: String,
    #[graphql(name = "assignedTo")]
    pub assigned_to: ID,
    pub priority: Option<TaskPriority>,
    #[graphql(name = "dueDate")]
    pub due_date: NaiveDate,
}

#[derive(InputObject, Clone)]
pub struct UpdateTaskInput {
    pub id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[graphql(name = "assignedTo")]
    pub assigned_to: Option<ID>,
    #[graphql(name = "dueDate")]
    pub due_date: Option<NaiveDate>,
}

/// Employees see only their own tasks; Manager and HR see the whole board.
pub fn visible_tasks(viewer: &Viewer, tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| viewer.role != Role::Employee || task.assigned_to == viewer.id)
        .cloned()
        .collect()
}

fn can_touch(viewer: &Viewer, task: &Task) -> bool {
    viewer.has_role(Role::Manager) || task.assigned_to == viewer.id
}

pub struct TaskQuery;

#[Object]
impl TaskQuery {
    async fn tasks(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<TaskNode>> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        let store = read_store(&state.tasks)?;
        let visible = visible_tasks(&current, &store.snapshot());
        let span = info_span!(
            "workforce.tasks.list",
            role = current.role.as_str(),
            visible = visible.len()
        );
        let _guard = span.enter();
        Ok(visible.iter().map(TaskNode::from).collect())
    }

    async fn task(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<TaskNode>> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        let store = read_store(&state.tasks)?;
        Ok(store
            .get(id.as_str())
            .filter(|task| current.role != Role::Employee || task.assigned_to == current.id)
            .map(TaskNode::from))
    }

    /// Timeline milestones for one task, oldest first.
    async fn milestones(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "taskId")] task_id: ID,
    ) -> async_graphql::Result<Vec<MilestoneNode>> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        {
            let store = read_store(&state.tasks)?;
            let task = store
                .get(task_id.as_str())
                .ok_or_else(|| not_found("Task not found"))?;
            if current.role == Role::Employee && task.assigned_to != current.id {
                return Err(error_with_code("FORBIDDEN", "Insufficient permissions"));
            }
        }
        let milestones = state
            .milestones
            .read()
            .map_err(|_| error_with_code("INTERNAL", "State lock poisoned"))?;
        Ok(milestones
            .get(task_id.as_str())
            .map(|list| list.iter().map(MilestoneNode::from).collect())
            .unwrap_or_default())
    }

    /// Aggregates over the viewer's visible tasks.
    async fn summary(&self, ctx: &Context<'_>) -> async_graphql::Result<TaskSummary> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        let store = read_store(&state.tasks)?;
        Ok(task_summary(&visible_tasks(&current, &store.snapshot())))
    }
}

pub struct TaskMutation;

#[Object]
impl TaskMutation {
    /// Managers hand tasks out; the creator is recorded as the assigner.
    #[graphql(name = "createTask")]
    async fn create_task(
        &self,
        ctx: &Context<'_>,
        input: NewTaskInput,
    ) -> async_graphql::Result<TaskNode> {
        let current = require_role(ctx, Role::Manager)?;
        let state = state(ctx)?;
        let title = required_text("title", &input.title)?;
        let description = required_text("description", &input.description)?;
        let priority = input.priority.unwrap_or(TaskPriority::Low);
        let span = info_span!(
            "workforce.tasks.create",
            priority = Priority::from(priority).as_str()
        );
        let _guard = span.enter();
        let task = Task {
            id: new_record_id(),
            title,
            description,
            status: Status::Pending,
            priority: priority.into(),
            assigned_to: input.assigned_to.to_string(),
            assigned_by: current.id.clone(),
            due_date: input.due_date,
        };
        let node = TaskNode::from(&task);
        write_store(&state.tasks)?.add(task).map_err(store_error)?;
        Ok(node)
    }

    #[graphql(name = "updateTask")]
    async fn update_task(
        &self,
        ctx: &Context<'_>,
        input: UpdateTaskInput,
    ) -> async_graphql::Result<TaskNode> {
        require_role(ctx, Role::Manager)?;
        let state = state(ctx)?;
        let mut store = write_store(&state.tasks)?;
        let existing = store
            .get(input.id.as_str())
            .cloned()
            .ok_or_else(|| not_found("Task not found"))?;
        let status = match input.status {
            Some(next) => transition(existing.status, next.into())?,
            None => existing.status,
        };
        store.update(input.id.as_str(), |task| {
            if let Some(title) = &input.title {
                task.title = title.clone();
            }
            if let Some(description) = &input.description {
                task.description = description.clone();
            }
            if let Some(priority) = input.priority {
                task.priority = priority.into();
            }
            if let Some(assigned_to) = &input.assigned_to {
                task.assigned_to = assigned_to.to_string();
            }
            if let Some(due_date) = input.due_date {
                task.due_date = due_date;
            }
            task.status = status;
        });
        let updated = store
            .get(input.id.as_str())
            .ok_or_else(|| not_found("Task not found"))?;
        Ok(TaskNode::from(updated))
    }

    /// The row action shown while a task is not yet completed. Assignees may
    /// complete their own tasks.
    #[graphql(name = "markTaskCompleted")]
    async fn mark_task_completed(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<TaskNode> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        let mut store = write_store(&state.tasks)?;
        let existing = store
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| not_found("Task not found"))?;
        if !can_touch(&current, &existing) {
            return Err(error_with_code("FORBIDDEN", "Insufficient permissions"));
        }
        let status = transition(existing.status, Status::Completed)?;
        store.update(id.as_str(), |task| task.status = status);
        let updated = store
            .get(id.as_str())
            .ok_or_else(|| not_found("Task not found"))?;
        Ok(TaskNode::from(updated))
    }

    /// Removing a task drops its milestones with it.
    #[graphql(name = "deleteTask")]
    async fn delete_task(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        require_role(ctx, Role::Manager)?;
        let state = state(ctx)?;
        let removed = write_store(&state.tasks)?.remove(id.as_str());
        if removed {
            state
                .milestones
                .write()
                .map_err(|_| error_with_code("INTERNAL", "State lock poisoned"))?
                .remove(id.as_str());
        }
        Ok(removed)
    }

    #[graphql(name = "addMilestone")]
    async fn add_milestone(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "taskId")] task_id: ID,
        text: String,
        date: Option<NaiveDate>,
    ) -> async_graphql::Result<MilestoneNode> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        let text = required_text("text", &text)?;
        {
            let store = read_store(&state.tasks)?;
            let task = store
                .get(task_id.as_str())
                .ok_or_else(|| not_found("Task not found"))?;
            if !can_touch(&current, task) {
                return Err(error_with_code("FORBIDDEN", "Insufficient permissions"));
            }
        }
        let milestone = Milestone {
            id: new_record_id(),
            text,
            date: date.unwrap_or_else(|| Utc::now().date_naive()),
        };
        let node = MilestoneNode::from(&milestone);
        state
            .milestones
            .write()
            .map_err(|_| error_with_code("INTERNAL", "State lock poisoned"))?
            .entry(task_id.to_string())
            .or_default()
            .push(milestone);
        Ok(node)
    }
}
