use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::StatusMachine;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub status: Status,
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
