//! Calendar descriptor translation.
//!
//! The scheduling screens hand `{id, title, start, end}` descriptors to an
//! external calendar widget and receive user-initiated create/update events
//! back in the same shape. This module owns the translation: projecting
//! records into descriptors and normalizing widget selections into stored
//! events. The widget itself is out of scope.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use entity::task::Task;
use serde::{Deserialize, Serialize};

use crate::state::new_record_id;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

/// Projects a task onto the calendar as a one-day block on its due date.
pub fn task_event(task: &Task) -> ScheduleEvent {
    let start = task.due_date.and_time(NaiveTime::MIN);
    ScheduleEvent {
        id: format!("task-{}", task.id),
        title: task.title.clone(),
        start,
        end: Some(start + Duration::days(1)),
    }
}

/// Normalizes a widget selection into the events to store.
///
/// A selection inside one day yields a single event. A selection spanning
/// days is split into one block per day, each keeping the selection's
/// time-of-day window, matching how the source calendar filled multi-day
/// drags.
pub fn expand_selection(
    title: &str,
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
) -> Vec<ScheduleEvent> {
    let end = end.unwrap_or(start);
    if start.date() == end.date() {
        return vec![ScheduleEvent {
            id: new_record_id(),
            title: title.to_string(),
            start,
            end: Some(end),
        }];
    }

    let start_time = start.time();
    let end_time = end.time();
    let mut events = Vec::new();
    let mut day = start.date();
    while day <= end.date() {
        events.push(ScheduleEvent {
            id: new_record_id(),
            title: title.to_string(),
            start: day.and_time(start_time),
            end: Some(day.and_time(end_time)),
        });
        day = day + Duration::days(1);
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn single_day_selection_stays_one_event() {
        let events = expand_selection("Standup", at(2025, 9, 26, 10, 0), Some(at(2025, 9, 26, 10, 30)));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Standup");
        assert_eq!(events[0].end, Some(at(2025, 9, 26, 10, 30)));
    }

    #[test]
    fn multi_day_selection_splits_per_day_keeping_the_time_window() {
        let events = expand_selection("Workshop", at(2025, 9, 26, 9, 0), Some(at(2025, 9, 28, 12, 0)));
        assert_eq!(events.len(), 3);
        for (offset, event) in events.iter().enumerate() {
            assert_eq!(event.start, at(2025, 9, 26 + offset as u32, 9, 0));
            assert_eq!(event.end, Some(at(2025, 9, 26 + offset as u32, 12, 0)));
        }
        // Each split block gets its own identifier.
        assert_ne!(events[0].id, events[1].id);
    }

    #[test]
    fn missing_end_defaults_to_the_start_instant() {
        let events = expand_selection("Check-in", at(2025, 9, 26, 14, 0), None);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].end, Some(at(2025, 9, 26, 14, 0)));
    }

    #[test]
    fn tasks_project_to_due_date_blocks() {
        let task = crate::state::demo_tasks().remove(0);
        let event = task_event(&task);
        assert_eq!(event.id, "task-1");
        assert_eq!(event.start.date(), task.due_date);
    }
}
