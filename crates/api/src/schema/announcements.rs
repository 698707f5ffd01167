use async_graphql::{Context, Enum, InputObject, Object, SimpleObject, ID};
use chrono::{NaiveDate, Utc};
use entity::announcement::{Announcement, Status};

use crate::state::new_record_id;
use crate::summary::{announcement_summary, AnnouncementSummary};

use super::{
    not_found, read_store, required_text, state, store_error, transition, viewer, write_store,
};

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum AnnouncementStatus {
    Draft,
    Published,
}

impl From<Status> for AnnouncementStatus {
    fn from(value: Status) -> Self {
        match value {
            Status::Draft => AnnouncementStatus::Draft,
            Status::Published => AnnouncementStatus::Published,
        }
    }
}

impl From<AnnouncementStatus> for Status {
    fn from(value: AnnouncementStatus) -> Self {
        match value {
            AnnouncementStatus::Draft => Status::Draft,
            AnnouncementStatus::Published => Status::Published,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Announcement")]
pub struct AnnouncementNode {
    pub id: ID,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub status: AnnouncementStatus,
}

impl From<&Announcement> for AnnouncementNode {
    fn from(announcement: &Announcement) -> Self {
        Self {
            id: ID::from(announcement.id.clone()),
            title: announcement.title.clone(),
            description: announcement.description.clone(),
            date: announcement.date,
            status: announcement.status.into(),
        }
    }
}

#[derive(InputObject, Clone)]
pub struct NewAnnouncementInput {
    pub title: String,
    pub description: String,
    pub status: Option<AnnouncementStatus>,
}

#[derive(InputObject, Clone)]
pub struct UpdateAnnouncementInput {
    pub id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<AnnouncementStatus>,
}

pub struct AnnouncementQuery;

#[Object]
impl AnnouncementQuery {
    async fn announcements(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Vec<AnnouncementNode>> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let store = read_store(&state.announcements)?;
        Ok(store.iter().map(AnnouncementNode::from).collect())
    }

    async fn summary(&self, ctx: &Context<'_>) -> async_graphql::Result<AnnouncementSummary> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let store = read_store(&state.announcements)?;
        Ok(announcement_summary(&store.snapshot()))
    }
}

pub struct AnnouncementMutation;

#[Object]
impl AnnouncementMutation {
    /// New announcements are dated the day they are written.
    #[graphql(name = "createAnnouncement")]
    async fn create_announcement(
        &self,
        ctx: &Context<'_>,
        input: NewAnnouncementInput,
    ) -> async_graphql::Result<AnnouncementNode> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let title = required_text("title", &input.title)?;
        let description = required_text("description", &input.description)?;
        let announcement = Announcement {
            id: new_record_id(),
            title,
            description,
            date: Utc::now().date_naive(),
            status: input.status.unwrap_or(AnnouncementStatus::Draft).into(),
        };
        let node = AnnouncementNode::from(&announcement);
        write_store(&state.announcements)?
            .add(announcement)
            .map_err(store_error)?;
        Ok(node)
    }

    #[graphql(name = "updateAnnouncement")]
    async fn update_announcement(
        &self,
        ctx: &Context<'_>,
        input: UpdateAnnouncementInput,
    ) -> async_graphql::Result<AnnouncementNode> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let mut store = write_store(&state.announcements)?;
        let existing = store
            .get(input.id.as_str())
            .cloned()
            .ok_or_else(|| not_found("Announcement not found"))?;
        let status = match input.status {
            Some(next) => transition(existing.status, next.into())?,
            None => existing.status,
        };
        store.update(input.id.as_str(), |announcement| {
            if let Some(title) = &input.title {
                announcement.title = title.clone();
            }
            if let Some(description) = &input.description {
                announcement.description = description.clone();
            }
            announcement.status = status;
        });
        let updated = store
            .get(input.id.as_str())
            .ok_or_else(|| not_found("Announcement not found"))?;
        Ok(AnnouncementNode::from(updated))
    }

    #[graphql(name = "publishAnnouncement")]
    async fn publish_announcement(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<AnnouncementNode> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let mut store = write_store(&state.announcements)?;
        let existing = store
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| not_found("Announcement not found"))?;
        let status = transition(existing.status, Status::Published)?;
        store.update(id.as_str(), |announcement| announcement.status = status);
        let updated = store
            .get(id.as_str())
            .ok_or_else(|| not_found("Announcement not found"))?;
        Ok(AnnouncementNode::from(updated))
    }

    #[graphql(name = "deleteAnnouncement")]
    async fn delete_announcement(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        viewer(ctx)?;
        let state = state(ctx)?;
        let removed = write_store(&state.announcements)?.remove(id.as_str());
        Ok(removed)
    }
}
