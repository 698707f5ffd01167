use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::StatusMachine;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub status: Status,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Draft,
    Published,
}

impl StatusMachine for Status {
    fn as_str(self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Published => "published",
        }
    }

    fn successors(self) -> &'static [Self] {
        match self {
            Status::Draft => &[Status::Published],
            Status::Published => &[],
        }
    }
}
