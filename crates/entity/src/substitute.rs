use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::StatusMachine;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubstituteRequest {
    pub id: String,
    pub employee_name: String,
    pub absence_date: NaiveDate,
    /// Free text such as "2 days" or "1 day (morning)".
    pub duration: String,
    pub reason: String,
    pub substitute_name: Option<String>,
    pub status: Status,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Open,
    Assigned,
}

impl StatusMachine for Status {
    fn as_str(self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::Assigned => "assigned",
        }
    }

    fn successors(self) -> &'static [Self] {
        match self {
            Status::Open => &[Status::Assigned],
            Status::Assigned => &[],
        }
    }
}
