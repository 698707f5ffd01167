mod common;

use common::{assert_error_code, data, employee, exec, manager, TestContext};
use serde_json::json;

const EVENTS: &str = r#"
    query Events($includeTasks: Boolean!) {
        schedule { events(includeTasks: $includeTasks) { id title start end } }
    }
"#;

#[tokio::test]
async fn task_due_dates_appear_on_the_calendar_per_viewer() {
    let ctx = TestContext::seeded();

    // The employee's two tasks project onto their due dates.
    let payload = data(
        exec(
            &ctx.schema,
            Some(employee()),
            EVENTS,
            json!({ "includeTasks": true }),
        )
        .await,
    );
    let events = payload["schedule"]["events"].as_array().unwrap().clone();
    assert_eq!(events.len(), 2);
    assert!(events.iter().any(|event| event["id"] == "task-1"));

    // Managers see the whole board.
    let payload = data(
        exec(
            &ctx.schema,
            Some(manager()),
            EVENTS,
            json!({ "includeTasks": true }),
        )
        .await,
    );
    assert_eq!(payload["schedule"]["events"].as_array().unwrap().len(), 3);

    // Without task projection the calendar starts empty.
    let payload = data(
        exec(
            &ctx.schema,
            Some(employee()),
            EVENTS,
            json!({ "includeTasks": false }),
        )
        .await,
    );
    assert!(payload["schedule"]["events"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn a_multi_day_selection_lands_as_daily_blocks() {
    let ctx = TestContext::seeded();
    let create = r#"
        mutation Create($input: ScheduleSelectionInput!) {
            schedule { createEvents(input: $input) { id title start end } }
        }
    "#;
    let resp = exec(
        &ctx.schema,
        Some(employee()),
        create,
        json!({ "input": {
            "title": "Sprint workshop",
            "start": "2025-09-26T09:00:00",
            "end": "2025-09-28T12:00:00"
        } }),
    )
    .await;
    let payload = data(resp);
    let created = payload["schedule"]["createEvents"].as_array().unwrap().clone();
    assert_eq!(created.len(), 3);
    assert_eq!(created[0]["start"], "2025-09-26T09:00:00");
    assert_eq!(created[0]["end"], "2025-09-26T12:00:00");
    assert_eq!(created[2]["start"], "2025-09-28T09:00:00");

    let payload = data(
        exec(
            &ctx.schema,
            Some(employee()),
            EVENTS,
            json!({ "includeTasks": false }),
        )
        .await,
    );
    assert_eq!(payload["schedule"]["events"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn widget_updates_move_the_stored_event() {
    let ctx = TestContext::seeded();
    let create = r#"
        mutation Create($input: ScheduleSelectionInput!) {
            schedule { createEvents(input: $input) { id } }
        }
    "#;
    let payload = data(
        exec(
            &ctx.schema,
            Some(employee()),
            create,
            json!({ "input": { "title": "1:1", "start": "2025-09-26T10:00:00" } }),
        )
        .await,
    );
    let id = payload["schedule"]["createEvents"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let update = r#"
        mutation Update($input: UpdateScheduleEventInput!) {
            schedule { updateEvent(input: $input) { id title start } }
        }
    "#;
    let resp = exec(
        &ctx.schema,
        Some(employee()),
        update,
        json!({ "input": { "id": id, "start": "2025-09-26T11:00:00" } }),
    )
    .await;
    let payload = data(resp);
    assert_eq!(
        payload["schedule"]["updateEvent"]["start"],
        "2025-09-26T11:00:00"
    );
    assert_eq!(payload["schedule"]["updateEvent"]["title"], "1:1");

    let resp = exec(
        &ctx.schema,
        Some(employee()),
        update,
        json!({ "input": { "id": "missing", "title": "nope" } }),
    )
    .await;
    assert_error_code(&resp, "NOT_FOUND");
}

#[tokio::test]
async fn an_untitled_selection_is_rejected() {
    let ctx = TestContext::seeded();
    let create = r#"
        mutation Create($input: ScheduleSelectionInput!) {
            schedule { createEvents(input: $input) { id } }
        }
    "#;
    let resp = exec(
        &ctx.schema,
        Some(employee()),
        create,
        json!({ "input": { "title": " ", "start": "2025-09-26T10:00:00" } }),
    )
    .await;
    assert_error_code(&resp, "VALIDATION");
}
