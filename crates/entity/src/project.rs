use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::StatusMachine;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: Status,
    /// Percent complete as reported by the manager. The source UI hinted at
    /// a 0-100 range but never enforced it; neither do we.
    pub progress: i32,
    pub manager: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// User ids of assigned members.
    pub assigned_to: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Planning,
    InProgress,
    Completed,
}

impl StatusMachine for Status {
    fn as_str(self) -> &'static str {
        match self {
            Status::Planning => "planning",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }

    fn successors(self) -> &'static [Self] {
        match self {
            Status::Planning => &[Status::InProgress],
            Status::InProgress => &[Status::Completed],
            Status::Completed => &[],
        }
    }
}
