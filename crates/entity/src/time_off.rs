use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::StatusMachine;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeOffRequest {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub kind: Kind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: Status,
}

impl TimeOffRequest {
    /// Inclusive span of the request in days.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Vacation,
    Sick,
    Personal,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Vacation => "vacation",
            Kind::Sick => "sick",
            Kind::Personal => "personal",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Approved,
    Rejected,
}

impl StatusMachine for Status {
    fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
        }
    }

    fn successors(self) -> &'static [Self] {
        match self {
            Status::Pending => &[Status::Approved, Status::Rejected],
            Status::Approved => &[],
            Status::Rejected => &[],
        }
    }
}
