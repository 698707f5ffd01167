mod common;

use common::{assert_error_code, data, employee, exec, hr, manager, TestContext};
use serde_json::json;

const PROJECTS: &str = r#"
    query { projects { projects { id name status progress assignedTo manager } } }
"#;

#[tokio::test]
async fn every_role_sees_the_project_board() {
    let ctx = TestContext::seeded();
    for viewer in [employee(), manager(), hr()] {
        let payload = data(exec(&ctx.schema, Some(viewer), PROJECTS, json!({})).await);
        assert_eq!(payload["projects"]["projects"].as_array().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn only_managers_set_up_projects() {
    let ctx = TestContext::seeded();
    let create = r#"
        mutation Create($input: NewProjectInput!) {
            projects { createProject(input: $input) { id name status progress manager } }
        }
    "#;
    let input = json!({
        "input": {
            "name": "Data Warehouse Migration",
            "description": "Move reporting to the new warehouse",
            "startDate": "2024-03-01",
            "endDate": "2024-06-30",
            "assignedTo": ["1"]
        }
    });

    let resp = exec(&ctx.schema, Some(employee()), create, input.clone()).await;
    assert_error_code(&resp, "FORBIDDEN");

    let resp = exec(&ctx.schema, Some(manager()), create, input).await;
    let payload = data(resp);
    let created = &payload["projects"]["createProject"];
    assert_eq!(created["status"], "PLANNING");
    assert_eq!(created["progress"], 0);
    assert_eq!(created["manager"], "2");
}

#[tokio::test]
async fn progress_is_stored_as_entered() {
    let ctx = TestContext::seeded();
    let update = r#"
        mutation Update($input: UpdateProjectInput!) {
            projects { updateProject(input: $input) { id progress } }
        }
    "#;
    // The form hints at 0-100 but the value is not clamped.
    let resp = exec(
        &ctx.schema,
        Some(manager()),
        update,
        json!({ "input": { "id": "1", "progress": 140 } }),
    )
    .await;
    assert_eq!(data(resp)["projects"]["updateProject"]["progress"], 140);
}

#[tokio::test]
async fn project_status_walks_planning_in_progress_completed() {
    let ctx = TestContext::seeded();
    let update = r#"
        mutation Update($input: UpdateProjectInput!) {
            projects { updateProject(input: $input) { id status } }
        }
    "#;

    // "2" is still planning; it cannot jump straight to completed.
    let resp = exec(
        &ctx.schema,
        Some(manager()),
        update,
        json!({ "input": { "id": "2", "status": "COMPLETED" } }),
    )
    .await;
    assert_error_code(&resp, "VALIDATION");

    let resp = exec(
        &ctx.schema,
        Some(manager()),
        update,
        json!({ "input": { "id": "2", "status": "IN_PROGRESS" } }),
    )
    .await;
    assert_eq!(
        data(resp)["projects"]["updateProject"]["status"],
        "IN_PROGRESS"
    );
}

#[tokio::test]
async fn summary_averages_reported_progress() {
    let ctx = TestContext::seeded();
    let summary = r#"
        query { projects { summary { planning inProgress completed averageProgress } } }
    "#;
    let payload = data(exec(&ctx.schema, Some(manager()), summary, json!({})).await);
    let summary = &payload["projects"]["summary"];
    assert_eq!(summary["planning"], 1);
    assert_eq!(summary["inProgress"], 1);
    assert_eq!(summary["completed"], 0);
    assert_eq!(summary["averageProgress"], 40.0);
}

#[tokio::test]
async fn dashboard_kpis_hide_company_figures_from_employees() {
    let ctx = TestContext::seeded();
    let kpis = r#"
        query { dashboard { kpis { activeProjects completedTasks totalEmployees monthlyBudget } } }
    "#;

    let payload = data(exec(&ctx.schema, Some(employee()), kpis, json!({})).await);
    let employee_kpis = &payload["dashboard"]["kpis"];
    assert_eq!(employee_kpis["activeProjects"], 12);
    assert!(employee_kpis["totalEmployees"].is_null());
    assert!(employee_kpis["monthlyBudget"].is_null());

    let payload = data(exec(&ctx.schema, Some(hr()), kpis, json!({})).await);
    let hr_kpis = &payload["dashboard"]["kpis"];
    assert_eq!(hr_kpis["totalEmployees"], 150);
    assert_eq!(hr_kpis["monthlyBudget"], 125000);
}
