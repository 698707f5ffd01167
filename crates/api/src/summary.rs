//! Derived summary numbers.
//!
//! Every screen shows a handful of aggregates over its collection. These are
//! pure functions of a store snapshot, recomputed per query; the collections
//! are small enough that nothing is cached or maintained incrementally.

use async_graphql::SimpleObject;
use entity::announcement::{self, Announcement};
use entity::expense::{self, Expense};
use entity::payroll::{self, PayrollEntry};
use entity::project::{self, Project};
use entity::task::{self, Task};
use entity::time_off::{self, TimeOffRequest};
use entity::timesheet::{self, TimesheetEntry};

/// Yearly time-off allowance shown on the time-off screen.
pub const TIME_OFF_ALLOWANCE_DAYS: i64 = 25;

#[derive(Clone, Debug, PartialEq, SimpleObject)]
pub struct TimesheetSummary {
    #[graphql(name = "totalHours")]
    pub total_hours: f64,
    pub draft: i32,
    pub submitted: i32,
    pub approved: i32,
}

pub fn timesheet_summary(entries: &[TimesheetEntry]) -> TimesheetSummary {
    TimesheetSummary {
        total_hours: entries.iter().map(|entry| entry.hours).sum(),
        draft: count(entries, |e| e.status == timesheet::Status::Draft),
        submitted: count(entries, |e| e.status == timesheet::Status::Submitted),
        approved: count(entries, |e| e.status == timesheet::Status::Approved),
    }
}

#[derive(Clone, Debug, PartialEq, SimpleObject)]
pub struct ExpenseSummary {
    #[graphql(name = "totalAmount")]
    pub total_amount: f64,
    pub pending: i32,
    pub approved: i32,
    pub rejected: i32,
}

pub fn expense_summary(expenses: &[Expense]) -> ExpenseSummary {
    ExpenseSummary {
        total_amount: expenses.iter().map(|exp| exp.amount).sum(),
        pending: count(expenses, |e| e.status == expense::Status::Pending),
        approved: count(expenses, |e| e.status == expense::Status::Approved),
        rejected: count(expenses, |e| e.status == expense::Status::Rejected),
    }
}

#[derive(Clone, Debug, PartialEq, SimpleObject)]
pub struct TimeOffSummary {
    pub pending: i32,
    pub approved: i32,
    pub rejected: i32,
    #[graphql(name = "allowanceDays")]
    pub allowance_days: i64,
    /// Days consumed by approved requests, span-inclusive.
    #[graphql(name = "usedDays")]
    pub used_days: i64,
    #[graphql(name = "remainingDays")]
    pub remaining_days: i64,
}

pub fn time_off_summary(requests: &[TimeOffRequest]) -> TimeOffSummary {
    let used_days: i64 = requests
        .iter()
        .filter(|req| req.status == time_off::Status::Approved)
        .map(|req| req.days())
        .sum();
    TimeOffSummary {
        pending: count(requests, |r| r.status == time_off::Status::Pending),
        approved: count(requests, |r| r.status == time_off::Status::Approved),
        rejected: count(requests, |r| r.status == time_off::Status::Rejected),
        allowance_days: TIME_OFF_ALLOWANCE_DAYS,
        used_days,
        remaining_days: TIME_OFF_ALLOWANCE_DAYS - used_days,
    }
}

#[derive(Clone, Debug, PartialEq, SimpleObject)]
pub struct PayrollSummary {
    #[graphql(name = "totalNetPay")]
    pub total_net_pay: f64,
    #[graphql(name = "employeeCount")]
    pub employee_count: i32,
    pub pending: i32,
    pub approved: i32,
    pub processed: i32,
}

pub fn payroll_summary(entries: &[PayrollEntry]) -> PayrollSummary {
    PayrollSummary {
        total_net_pay: entries.iter().map(|entry| entry.net_pay).sum(),
        employee_count: entries.len() as i32,
        pending: count(entries, |e| e.status == payroll::Status::Pending),
        approved: count(entries, |e| e.status == payroll::Status::Approved),
        processed: count(entries, |e| e.status == payroll::Status::Processed),
    }
}

#[derive(Clone, Debug, PartialEq, SimpleObject)]
pub struct ProjectSummary {
    pub planning: i32,
    #[graphql(name = "inProgress")]
    pub in_progress: i32,
    pub completed: i32,
    #[graphql(name = "averageProgress")]
    pub average_progress: f64,
}

pub fn project_summary(projects: &[Project]) -> ProjectSummary {
    let average_progress = if projects.is_empty() {
        0.0
    } else {
        projects.iter().map(|p| f64::from(p.progress)).sum::<f64>() / projects.len() as f64
    };
    ProjectSummary {
        planning: count(projects, |p| p.status == project::Status::Planning),
        in_progress: count(projects, |p| p.status == project::Status::InProgress),
        completed: count(projects, |p| p.status == project::Status::Completed),
        average_progress,
    }
}

#[derive(Clone, Debug, PartialEq, SimpleObject)]
pub struct TaskSummary {
    pub pending: i32,
    #[graphql(name = "inProgress")]
    pub in_progress: i32,
    pub completed: i32,
    #[graphql(name = "highPriority")]
    pub high_priority: i32,
}

pub fn task_summary(tasks: &[Task]) -> TaskSummary {
    TaskSummary {
        pending: count(tasks, |t| t.status == task::Status::Pending),
        in_progress: count(tasks, |t| t.status == task::Status::InProgress),
        completed: count(tasks, |t| t.status == task::Status::Completed),
        high_priority: count(tasks, |t| t.priority == task::Priority::High),
    }
}

#[derive(Clone, Debug, PartialEq, SimpleObject)]
pub struct AnnouncementSummary {
    pub draft: i32,
    pub published: i32,
}

pub fn announcement_summary(announcements: &[Announcement]) -> AnnouncementSummary {
    AnnouncementSummary {
        draft: count(announcements, |a| a.status == announcement::Status::Draft),
        published: count(announcements, |a| a.status == announcement::Status::Published),
    }
}

fn count<T>(items: &[T], pred: impl Fn(&T) -> bool) -> i32 {
    items.iter().filter(|item| pred(item)).count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{demo_expenses, demo_time_off, demo_timesheets};

    #[test]
    fn status_counts_partition_the_collection() {
        let entries = demo_timesheets();
        let summary = timesheet_summary(&entries);
        assert_eq!(
            summary.draft + summary.submitted + summary.approved,
            entries.len() as i32
        );
        assert_eq!(summary.total_hours, 22.0);
    }

    #[test]
    fn expense_totals_match_the_arithmetic_sum() {
        let summary = expense_summary(&demo_expenses());
        assert_eq!(summary.total_amount, 975.50);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.approved, 1);
        assert_eq!(summary.rejected, 0);
    }

    #[test]
    fn empty_collections_summarize_to_zero() {
        let summary = expense_summary(&[]);
        assert_eq!(summary.total_amount, 0.0);
        assert_eq!(summary.pending + summary.approved + summary.rejected, 0);
    }

    #[test]
    fn used_days_count_inclusive_spans_of_approved_requests() {
        let summary = time_off_summary(&demo_time_off());
        // Only the one-day sick request is approved.
        assert_eq!(summary.used_days, 1);
        assert_eq!(summary.remaining_days, TIME_OFF_ALLOWANCE_DAYS - 1);
        assert_eq!(summary.pending, 1);
    }
}
