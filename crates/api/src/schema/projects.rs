use async_graphql::{Context, Enum, InputObject, Object, SimpleObject, ID};
use chrono::NaiveDate;
use entity::project::{Project, Status};
use entity::user::Role;

use crate::state::new_record_id;
use crate::summary::{project_summary, ProjectSummary};

use super::{
    not_found, read_store, require_role, required_text, state, store_error, transition, viewer,
    write_store,
};

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Completed,
}

impl From<Status> for ProjectStatus {
    fn from(value: Status) -> Self {
        match value {
            Status::Planning => ProjectStatus::Planning,
            Status::InProgress => ProjectStatus::InProgress,
            Status::Completed => ProjectStatus::Completed,
        }
    }
}

impl From<ProjectStatus> for Status {
    fn from(value: ProjectStatus) -> Self {
        match value {
            ProjectStatus::Planning => Status::Planning,
            ProjectStatus::InProgress => Status::InProgress,
            ProjectStatus::Completed => Status::Completed,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Project")]
pub struct ProjectNode {
    pub id: ID,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub progress: i32,
    pub manager: ID,
    #[graphql(name = "startDate")]
    pub start_date: NaiveDate,
    #[graphql(name = "endDate")]
    pub end_date: NaiveDate,
    #[graphql(name = "assignedTo")]
    pub assigned_to: Vec<ID>,
}

impl From<&Project> for ProjectNode {
    fn from(project: &Project) -> Self {
        Self {
            id: ID::from(project.id.clone()),
            name: project.name.clone(),
            description: project.description.clone(),
            status: project.status.into(),
            progress: project.progress,
            manager: ID::from(project.manager.clone()),
            start_date: project.start_date,
            end_date: project.end_date,
            assigned_to: project
                .assigned_to
                .iter()
                .map(|id| ID::from(id.clone()))
                .collect(),
        }
    }
}

#[derive(InputObject, Clone)]
pub struct NewProjectInput {
    pub name: String,
    pub description: String,
    pub status: Option<ProjectStatus>,
    /// Percent complete. The form hints at 0-100 but the value is stored as
    /// entered.
    pub progress: Option<i32>,
    #[graphql(name = "startDate")]
    pub start_date: NaiveDate,
    #[graphql(name = "endDate")]
    pub end_date: NaiveDate,
    #[graphql(name = "assignedTo")]
    pub assigned_to: Option<Vec<ID>>,
}

#[derive(InputObject, Clone)]
pub struct UpdateProjectInput {
    pub id: ID,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub progress: Option<i32>,
    #[graphql(name = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[graphql(name = "endDate")]
    pub end_date: Option<NaiveDate>,
    #[graphql(name = "assignedTo")]
    pub assigned_to: Option<Vec<ID>>,
}

pub struct ProjectQuery;

#[Object]
impl ProjectQuery {
    async fn projects(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<ProjectNode>> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let store = read_store(&state.projects)?;
        Ok(store.iter().map(ProjectNode::from).collect())
    }

    async fn project(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<ProjectNode>> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let store = read_store(&state.projects)?;
        Ok(store.get(id.as_str()).map(ProjectNode::from))
    }

    async fn summary(&self, ctx: &Context<'_>) -> async_graphql::Result<ProjectSummary> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let store = read_store(&state.projects)?;
        Ok(project_summary(&store.snapshot()))
    }
}

pub struct ProjectMutation;

#[Object]
impl ProjectMutation {
    /// Managers set up projects; the creator becomes the project's manager.
    #[graphql(name = "createProject")]
    async fn create_project(
        &self,
        ctx: &Context<'_>,
        input: NewProjectInput,
    ) -> async_graphql::Result<ProjectNode> {
        let current = require_role(ctx, Role::Manager)?;
        let state = state(ctx)?;
        let name = required_text("name", &input.name)?;
        let description = required_text("description", &input.description)?;
        let project = Project {
            id: new_record_id(),
            name,
            description,
            status: input.status.unwrap_or(ProjectStatus::Planning).into(),
            progress: input.progress.unwrap_or(0),
            manager: current.id.clone(),
            start_date: input.start_date,
            end_date: input.end_date,
            assigned_to: input
                .assigned_to
                .unwrap_or_default()
                .into_iter()
                .map(|id| id.to_string())
                .collect(),
        };
        let node = ProjectNode::from(&project);
        write_store(&state.projects)?
            .add(project)
            .map_err(store_error)?;
        Ok(node)
    }

    #[graphql(name = "updateProject")]
    async fn update_project(
        &self,
        ctx: &Context<'_>,
        input: UpdateProjectInput,
    ) -> async_graphql::Result<ProjectNode> {
        require_role(ctx, Role::Manager)?;
        let state = state(ctx)?;
        let mut store = write_store(&state.projects)?;
        let existing = store
            .get(input.id.as_str())
            .cloned()
            .ok_or_else(|| not_found("Project not found"))?;
        let status = match input.status {
            Some(next) => transition(existing.status, next.into())?,
            None => existing.status,
        };
        store.update(input.id.as_str(), |project| {
            if let Some(name) = &input.name {
                project.name = name.clone();
            }
            if let Some(description) = &input.description {
                project.description = description.clone();
            }
            if let Some(progress) = input.progress {
                project.progress = progress;
            }
            if let Some(start_date) = input.start_date {
                project.start_date = start_date;
            }
            if let Some(end_date) = input.end_date {
                project.end_date = end_date;
            }
            if let Some(assigned_to) = &input.assigned_to {
                project.assigned_to = assigned_to.iter().map(|id| id.to_string()).collect();
            }
            project.status = status;
        });
        let updated = store
            .get(input.id.as_str())
            .ok_or_else(|| not_found("Project not found"))?;
        Ok(ProjectNode::from(updated))
    }

    #[graphql(name = "deleteProject")]
    async fn delete_project(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        require_role(ctx, Role::Manager)?;
        let state = state(ctx)?;
        let removed = write_store(&state.projects)?.remove(id.as_str());
        Ok(removed)
    }
}
