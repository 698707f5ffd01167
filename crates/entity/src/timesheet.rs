use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::StatusMachine;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    pub id: String,
    pub date: NaiveDate,
    /// Free-text project label; not linked to a [`crate::project::Project`].
    pub project: String,
    pub hours: f64,
    pub description: String,
    pub status: Status,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Draft,
    Submitted,
    Approved,
}

impl StatusMachine for Status {
    fn as_str(self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Submitted => "submitted",
            Status::Approved => "approved",
        }
    }

    fn successors(self) -> &'static [Self] {
        match self {
            Status::Draft => &[Status::Submitted],
            // A submitted sheet can be approved or pulled back for rework.
            Status::Submitted => &[Status::Approved, Status::Draft],
            Status::Approved => &[],
        }
    }
}
