use serde::{Deserialize, Serialize};

use crate::StatusMachine;

/// One payroll line per employee per cycle.
///
/// `gross_pay` and `net_pay` are entered by HR, not derived from
/// `salary`/`hours_worked`/`deductions`; the service stores what it is given.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayrollEntry {
    pub id: String,
    pub employee_name: String,
    pub position: String,
    pub salary: f64,
    pub hours_worked: f64,
    pub overtime: f64,
    pub gross_pay: f64,
    pub deductions: f64,
    pub net_pay: f64,
    pub status: Status,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Approved,
    Processed,
}

impl StatusMachine for Status {
    fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Processed => "processed",
        }
    }

    fn successors(self) -> &'static [Self] {
        match self {
            Status::Pending => &[Status::Approved],
            Status::Approved => &[Status::Processed],
            Status::Processed => &[],
        }
    }
}
