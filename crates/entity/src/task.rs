use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::StatusMachine;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    /// User id of the assignee; matched against the viewer id when an
    /// Employee lists tasks.
    pub assigned_to: String,
    /// User id of whoever handed the task out.
    pub assigned_by: String,
    pub due_date: NaiveDate,
}

/// Timeline milestones are stored apart from their task, keyed by task id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub text: String,
    pub date: NaiveDate,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Pending,
    InProgress,
    Completed,
}

impl StatusMachine for Status {
    fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }

    fn successors(self) -> &'static [Self] {
        match self {
            // "Mark completed" is offered straight from pending in the table.
            Status::Pending => &[Status::InProgress, Status::Completed],
            Status::InProgress => &[Status::Completed],
            Status::Completed => &[],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}
