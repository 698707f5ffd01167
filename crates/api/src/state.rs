//! In-memory record stores.
//!
//! Each screen of the suite owns one ordered collection of records. The
//! collections live for the lifetime of the process and are reseeded from the
//! demo fixtures on restart; nothing is persisted.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;
use entity::announcement::{self, Announcement};
use entity::expense::{self, Expense};
use entity::payroll::{self, PayrollEntry};
use entity::project::{self, Project};
use entity::substitute::{self, SubstituteRequest};
use entity::task::{self, Milestone, Task};
use entity::time_off::{self, TimeOffRequest};
use entity::timesheet::{self, TimesheetEntry};
use thiserror::Error;
use uuid::Uuid;

use crate::schedule::ScheduleEvent;

/// Anything a [`RecordStore`] can hold.
pub trait Record: Clone {
    fn id(&self) -> &str;
}

impl Record for TimesheetEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Expense {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for TimeOffRequest {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for PayrollEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for SubstituteRequest {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Announcement {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for ScheduleEvent {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("a record with id {0} already exists")]
    DuplicateId(String),
}

/// Fresh identifier for records created through the API. Fixture records
/// keep their short numeric ids.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Ordered in-memory collection with id-addressed mutation.
///
/// `update` and `remove` are no-ops when the id is absent; callers that need
/// to surface not-found do so at the API boundary.
#[derive(Debug)]
pub struct RecordStore<T> {
    records: Vec<T>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> RecordStore<T> {
    pub fn seeded(records: Vec<T>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    /// Cloned view of the collection, newest first; this is what export
    /// collaborators receive.
    pub fn snapshot(&self) -> Vec<T> {
        self.records.clone()
    }

    /// Front insertion, so the newest record renders first.
    pub fn add(&mut self, record: T) -> Result<(), StoreError> {
        if self.get(record.id()).is_some() {
            return Err(StoreError::DuplicateId(record.id().to_string()));
        }
        self.records.insert(0, record);
        Ok(())
    }

    /// Applies `patch` to the matching record in place. Returns whether a
    /// record matched; order and length are never changed.
    pub fn update(&mut self, id: &str, patch: impl FnOnce(&mut T)) -> bool {
        match self.records.iter_mut().find(|record| record.id() == id) {
            Some(record) => {
                patch(record);
                true
            }
            None => false,
        }
    }

    /// Removes the matching record. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        self.records.len() != before
    }
}

/// All collections of the suite. Each sits behind its own lock and is only
/// ever touched by its own screen's resolvers; locks are never held across
/// await points.
#[derive(Debug)]
pub struct WorkforceState {
    pub timesheets: RwLock<RecordStore<TimesheetEntry>>,
    pub expenses: RwLock<RecordStore<Expense>>,
    pub time_off: RwLock<RecordStore<TimeOffRequest>>,
    pub payroll: RwLock<RecordStore<PayrollEntry>>,
    pub projects: RwLock<RecordStore<Project>>,
    pub tasks: RwLock<RecordStore<Task>>,
    /// Timeline milestones, stored apart from their tasks and keyed by task
    /// id. Removing a task drops its milestones with it.
    pub milestones: RwLock<HashMap<String, Vec<Milestone>>>,
    pub substitutes: RwLock<RecordStore<SubstituteRequest>>,
    pub announcements: RwLock<RecordStore<Announcement>>,
    pub schedule: RwLock<RecordStore<ScheduleEvent>>,
}

impl WorkforceState {
    pub fn empty() -> Self {
        Self {
            timesheets: RwLock::new(RecordStore::default()),
            expenses: RwLock::new(RecordStore::default()),
            time_off: RwLock::new(RecordStore::default()),
            payroll: RwLock::new(RecordStore::default()),
            projects: RwLock::new(RecordStore::default()),
            tasks: RwLock::new(RecordStore::default()),
            milestones: RwLock::new(HashMap::new()),
            substitutes: RwLock::new(RecordStore::default()),
            announcements: RwLock::new(RecordStore::default()),
            schedule: RwLock::new(RecordStore::default()),
        }
    }

    /// The demo dataset every fresh process starts from.
    pub fn seed_demo() -> Self {
        Self {
            timesheets: RwLock::new(RecordStore::seeded(demo_timesheets())),
            expenses: RwLock::new(RecordStore::seeded(demo_expenses())),
            time_off: RwLock::new(RecordStore::seeded(demo_time_off())),
            payroll: RwLock::new(RecordStore::seeded(demo_payroll())),
            projects: RwLock::new(RecordStore::seeded(demo_projects())),
            tasks: RwLock::new(RecordStore::seeded(demo_tasks())),
            milestones: RwLock::new(HashMap::new()),
            substitutes: RwLock::new(RecordStore::seeded(demo_substitutes())),
            announcements: RwLock::new(RecordStore::seeded(demo_announcements())),
            schedule: RwLock::new(RecordStore::default()),
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

pub fn demo_timesheets() -> Vec<TimesheetEntry> {
    vec![
        TimesheetEntry {
            id: "1".into(),
            date: date(2024, 1, 10),
            project: "Mobile App Redesign".into(),
            hours: 8.0,
            description: "UI mockup design and review".into(),
            status: timesheet::Status::Approved,
        },
        TimesheetEntry {
            id: "2".into(),
            date: date(2024, 1, 11),
            project: "Customer Portal Enhancement".into(),
            hours: 6.5,
            description: "Backend API development".into(),
            status: timesheet::Status::Submitted,
        },
        TimesheetEntry {
            id: "3".into(),
            date: date(2024, 1, 12),
            project: "Mobile App Redesign".into(),
            hours: 7.5,
            description: "Component implementation".into(),
            status: timesheet::Status::Draft,
        },
    ]
}

pub fn demo_expenses() -> Vec<Expense> {
    vec![
        Expense {
            id: "1".into(),
            employee_id: "1".into(),
            employee_name: "John Smith".into(),
            category: "Travel".into(),
            amount: 850.00,
            date: date(2024, 1, 5),
            description: "Client meeting travel expenses".into(),
            status: expense::Status::Pending,
        },
        Expense {
            id: "2".into(),
            employee_id: "1".into(),
            employee_name: "John Smith".into(),
            category: "Office Supplies".into(),
            amount: 125.50,
            date: date(2024, 1, 3),
            description: "Laptop accessories and stationery".into(),
            status: expense::Status::Approved,
        },
    ]
}

pub fn demo_time_off() -> Vec<TimeOffRequest> {
    vec![
        TimeOffRequest {
            id: "1".into(),
            employee_id: "1".into(),
            employee_name: "John Smith".into(),
            kind: time_off::Kind::Vacation,
            start_date: date(2024, 2, 15),
            end_date: date(2024, 2, 19),
            reason: "Family vacation".into(),
            status: time_off::Status::Pending,
        },
        TimeOffRequest {
            id: "2".into(),
            employee_id: "1".into(),
            employee_name: "John Smith".into(),
            kind: time_off::Kind::Sick,
            start_date: date(2024, 1, 8),
            end_date: date(2024, 1, 8),
            reason: "Medical appointment".into(),
            status: time_off::Status::Approved,
        },
    ]
}

pub fn demo_payroll() -> Vec<PayrollEntry> {
    vec![
        PayrollEntry {
            id: "1".into(),
            employee_name: "John Smith".into(),
            position: "Software Developer".into(),
            salary: 75000.0,
            hours_worked: 168.0,
            overtime: 8.0,
            gross_pay: 6250.0,
            deductions: 1250.0,
            net_pay: 5000.0,
            status: payroll::Status::Processed,
        },
        PayrollEntry {
            id: "2".into(),
            employee_name: "Sarah Johnson".into(),
            position: "Project Manager".into(),
            salary: 85000.0,
            hours_worked: 160.0,
            overtime: 0.0,
            gross_pay: 7083.0,
            deductions: 1417.0,
            net_pay: 5666.0,
            status: payroll::Status::Approved,
        },
        PayrollEntry {
            id: "3".into(),
            employee_name: "Mike Wilson".into(),
            position: "HR Specialist".into(),
            salary: 60000.0,
            hours_worked: 160.0,
            overtime: 4.0,
            gross_pay: 5000.0,
            deductions: 1000.0,
            net_pay: 4000.0,
            status: payroll::Status::Pending,
        },
    ]
}

pub fn demo_projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".into(),
            name: "Mobile App Redesign".into(),
            description: "Complete redesign of mobile application interface".into(),
            status: project::Status::InProgress,
            progress: 65,
            manager: "2".into(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 3, 31),
            assigned_to: vec!["1".into(), "2".into()],
        },
        Project {
            id: "2".into(),
            name: "Customer Portal Enhancement".into(),
            description: "Add new features to customer self-service portal".into(),
            status: project::Status::Planning,
            progress: 15,
            manager: "2".into(),
            start_date: date(2024, 2, 1),
            end_date: date(2024, 5, 30),
            assigned_to: vec!["1".into()],
        },
    ]
}

pub fn demo_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "1".into(),
            title: "Complete Q4 Report".into(),
            description: "Prepare comprehensive quarterly business report".into(),
            status: task::Status::InProgress,
            priority: task::Priority::High,
            assigned_to: "1".into(),
            assigned_by: "2".into(),
            due_date: date(2024, 1, 15),
        },
        Task {
            id: "2".into(),
            title: "Update Client Database".into(),
            description: "Refresh client contact information and preferences".into(),
            status: task::Status::Pending,
            priority: task::Priority::Medium,
            assigned_to: "1".into(),
            assigned_by: "2".into(),
            due_date: date(2024, 1, 20),
        },
        Task {
            id: "3".into(),
            title: "Team Performance Review".into(),
            description: "Conduct annual performance evaluations".into(),
            status: task::Status::Completed,
            priority: task::Priority::High,
            assigned_to: "2".into(),
            assigned_by: "3".into(),
            due_date: date(2024, 1, 10),
        },
    ]
}

pub fn demo_substitutes() -> Vec<SubstituteRequest> {
    vec![
        SubstituteRequest {
            id: "1".into(),
            employee_name: "John Smith".into(),
            absence_date: date(2025, 9, 28),
            duration: "2 days".into(),
            reason: "Medical Leave".into(),
            substitute_name: Some("Alice Brown".into()),
            status: substitute::Status::Assigned,
        },
        SubstituteRequest {
            id: "2".into(),
            employee_name: "Fiona Clark".into(),
            absence_date: date(2025, 9, 30),
            duration: "1 day".into(),
            reason: "Personal Work".into(),
            substitute_name: None,
            status: substitute::Status::Open,
        },
    ]
}

pub fn demo_announcements() -> Vec<Announcement> {
    vec![
        Announcement {
            id: "1".into(),
            title: "Office Renovation".into(),
            description: "The 3rd floor will be renovated from 1st Feb.".into(),
            date: date(2024, 1, 25),
            status: announcement::Status::Published,
        },
        Announcement {
            id: "2".into(),
            title: "Holiday Notice".into(),
            description: "Office will remain closed on 15th Feb.".into(),
            date: date(2024, 1, 28),
            status: announcement::Status::Draft,
        },
        Announcement {
            id: "3".into(),
            title: "Team Lunch".into(),
            description: "Monthly team lunch on 5th Feb.".into(),
            date: date(2024, 1, 30),
            status: announcement::Status::Published,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_prepends_and_rejects_duplicate_ids() {
        let mut store = RecordStore::seeded(demo_expenses());
        let len_before = store.len();
        let mut extra = demo_expenses().remove(0);
        extra.id = new_record_id();
        store.add(extra.clone()).unwrap();
        assert_eq!(store.len(), len_before + 1);
        assert_eq!(store.snapshot()[0].id, extra.id);

        assert_eq!(
            store.add(extra.clone()),
            Err(StoreError::DuplicateId(extra.id.clone()))
        );
        assert_eq!(store.len(), len_before + 1);
    }

    #[test]
    fn update_touches_only_the_target_and_keeps_order() {
        let mut store = RecordStore::seeded(demo_timesheets());
        let before = store.snapshot();
        assert!(store.update("2", |entry| {
            entry.hours = 8.0;
            entry.status = timesheet::Status::Approved;
        }));
        let after = store.snapshot();
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].hours, 8.0);
        assert_eq!(after[1].status, timesheet::Status::Approved);
        assert_eq!(after[1].project, before[1].project);
        assert_eq!(after[1].date, before[1].date);
    }

    #[test]
    fn update_missing_id_is_a_no_op() {
        let mut store = RecordStore::seeded(demo_timesheets());
        let before = store.snapshot();
        assert!(!store.update("missing", |entry| entry.hours = 0.0));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn remove_drops_exactly_one_record() {
        let mut store = RecordStore::seeded(demo_tasks());
        assert!(store.remove("2"));
        assert_eq!(store.len(), 2);
        assert!(store.get("2").is_none());

        let before = store.snapshot();
        assert!(!store.remove("2"));
        assert_eq!(store.snapshot(), before);
    }
}
