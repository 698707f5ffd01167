mod common;

use common::{assert_error_code, data, employee, exec, TestContext};
use serde_json::json;

const ENTRIES: &str = r#"
    query { timesheets { entries { id date project hours description status } } }
"#;

#[tokio::test]
async fn editing_one_entry_leaves_the_others_untouched() {
    let ctx = TestContext::seeded();
    let before = data(exec(&ctx.schema, Some(employee()), ENTRIES, json!({})).await);
    let before = before["timesheets"]["entries"].as_array().unwrap().clone();
    assert_eq!(before.len(), 3);

    let update = r#"
        mutation Update($input: UpdateTimesheetInput!) {
            timesheets { updateEntry(input: $input) { id hours status } }
        }
    "#;
    let resp = exec(
        &ctx.schema,
        Some(employee()),
        update,
        json!({ "input": { "id": "2", "hours": 8.0, "status": "APPROVED" } }),
    )
    .await;
    let updated = data(resp);
    assert_eq!(updated["timesheets"]["updateEntry"]["hours"], 8.0);
    assert_eq!(updated["timesheets"]["updateEntry"]["status"], "APPROVED");

    let after = data(exec(&ctx.schema, Some(employee()), ENTRIES, json!({})).await);
    let after = after["timesheets"]["entries"].as_array().unwrap().clone();
    assert_eq!(after.len(), 3);
    // Order is preserved and the neighbours are byte-for-byte identical.
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
    assert_eq!(after[1]["id"], "2");
    assert_eq!(after[1]["hours"], 8.0);
    assert_eq!(after[1]["status"], "APPROVED");
    assert_eq!(after[1]["project"], before[1]["project"]);
    assert_eq!(after[1]["date"], before[1]["date"]);
    assert_eq!(after[1]["description"], before[1]["description"]);
}

#[tokio::test]
async fn blank_form_fields_fall_back_to_placeholders() {
    let ctx = TestContext::seeded();
    let create = r#"
        mutation Create($input: NewTimesheetInput!) {
            timesheets { createEntry(input: $input) { id project description hours status } }
        }
    "#;
    let resp = exec(
        &ctx.schema,
        Some(employee()),
        create,
        json!({ "input": { "project": "  ", "hours": 0.0 } }),
    )
    .await;
    let payload = data(resp);
    let entry = &payload["timesheets"]["createEntry"];
    assert_eq!(entry["project"], "Untitled Project");
    assert_eq!(entry["description"], "No description");
    assert_eq!(entry["hours"], 1.0);
    assert_eq!(entry["status"], "DRAFT");

    let after = data(exec(&ctx.schema, Some(employee()), ENTRIES, json!({})).await);
    let after = after["timesheets"]["entries"].as_array().unwrap().clone();
    // Newest entry renders first.
    assert_eq!(after.len(), 4);
    assert_eq!(after[0]["id"], entry["id"]);
}

#[tokio::test]
async fn approved_entries_cannot_move_backwards() {
    let ctx = TestContext::seeded();
    let update = r#"
        mutation Update($input: UpdateTimesheetInput!) {
            timesheets { updateEntry(input: $input) { id status } }
        }
    "#;
    // Entry "1" is approved; approval is terminal.
    let resp = exec(
        &ctx.schema,
        Some(employee()),
        update,
        json!({ "input": { "id": "1", "status": "SUBMITTED" } }),
    )
    .await;
    assert_error_code(&resp, "VALIDATION");

    // A submitted sheet may be pulled back to draft.
    let resp = exec(
        &ctx.schema,
        Some(employee()),
        update,
        json!({ "input": { "id": "2", "status": "DRAFT" } }),
    )
    .await;
    assert_eq!(data(resp)["timesheets"]["updateEntry"]["status"], "DRAFT");
}

#[tokio::test]
async fn updating_a_missing_entry_reports_not_found() {
    let ctx = TestContext::seeded();
    let update = r#"
        mutation Update($input: UpdateTimesheetInput!) {
            timesheets { updateEntry(input: $input) { id } }
        }
    "#;
    let resp = exec(
        &ctx.schema,
        Some(employee()),
        update,
        json!({ "input": { "id": "missing", "hours": 2.0 } }),
    )
    .await;
    assert_error_code(&resp, "NOT_FOUND");
}

#[tokio::test]
async fn delete_reports_whether_anything_was_removed() {
    let ctx = TestContext::seeded();
    let delete = r#"
        mutation Delete($id: ID!) { timesheets { deleteEntry(id: $id) } }
    "#;
    let resp = exec(&ctx.schema, Some(employee()), delete, json!({ "id": "3" })).await;
    assert_eq!(data(resp)["timesheets"]["deleteEntry"], true);

    let resp = exec(&ctx.schema, Some(employee()), delete, json!({ "id": "3" })).await;
    assert_eq!(data(resp)["timesheets"]["deleteEntry"], false);

    let after = data(exec(&ctx.schema, Some(employee()), ENTRIES, json!({})).await);
    assert_eq!(after["timesheets"]["entries"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn summary_tracks_hours_and_status_counts() {
    let ctx = TestContext::seeded();
    let summary = r#"
        query { timesheets { summary { totalHours draft submitted approved } } }
    "#;
    let payload = data(exec(&ctx.schema, Some(employee()), summary, json!({})).await);
    let summary = &payload["timesheets"]["summary"];
    assert_eq!(summary["totalHours"], 22.0);
    assert_eq!(summary["draft"], 1);
    assert_eq!(summary["submitted"], 1);
    assert_eq!(summary["approved"], 1);
}
