mod common;

use common::{assert_error_code, data, employee, exec, hr, manager, TestContext};
use serde_json::json;

const ENTRIES: &str = r#"
    query { payroll { entries { id employeeName position netPay status } } }
"#;

#[tokio::test]
async fn payroll_is_visible_to_hr_only() {
    let ctx = TestContext::seeded();

    let resp = exec(&ctx.schema, Some(employee()), ENTRIES, json!({})).await;
    assert_error_code(&resp, "FORBIDDEN");

    let resp = exec(&ctx.schema, Some(manager()), ENTRIES, json!({})).await;
    assert_error_code(&resp, "FORBIDDEN");

    let payload = data(exec(&ctx.schema, Some(hr()), ENTRIES, json!({})).await);
    assert_eq!(payload["payroll"]["entries"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn summary_totals_the_net_pay_column() {
    let ctx = TestContext::seeded();
    let summary = r#"
        query { payroll { summary { totalNetPay employeeCount pending approved processed } } }
    "#;
    let payload = data(exec(&ctx.schema, Some(hr()), summary, json!({})).await);
    let summary = &payload["payroll"]["summary"];
    assert_eq!(summary["totalNetPay"], 14666.0);
    assert_eq!(summary["employeeCount"], 3);
    assert_eq!(summary["pending"], 1);
    assert_eq!(summary["approved"], 1);
    assert_eq!(summary["processed"], 1);
}

#[tokio::test]
async fn new_entries_require_name_and_position() {
    let ctx = TestContext::seeded();
    let create = r#"
        mutation Create($input: NewPayrollInput!) {
            payroll { createEntry(input: $input) { id employeeName salary netPay status } }
        }
    "#;

    let resp = exec(
        &ctx.schema,
        Some(hr()),
        create,
        json!({ "input": { "employeeName": "", "position": "Analyst" } }),
    )
    .await;
    assert_error_code(&resp, "VALIDATION");

    let resp = exec(
        &ctx.schema,
        Some(hr()),
        create,
        json!({ "input": { "employeeName": "Dana Cruz", "position": "Analyst", "netPay": 3200.0 } }),
    )
    .await;
    let payload = data(resp);
    let created = &payload["payroll"]["createEntry"];
    assert_eq!(created["employeeName"], "Dana Cruz");
    // Unentered figures default to zero; nothing is derived.
    assert_eq!(created["salary"], 0.0);
    assert_eq!(created["netPay"], 3200.0);
    assert_eq!(created["status"], "PENDING");
}

#[tokio::test]
async fn pay_runs_move_pending_approved_processed() {
    let ctx = TestContext::seeded();
    let update = r#"
        mutation Update($input: UpdatePayrollInput!) {
            payroll { updateEntry(input: $input) { id status } }
        }
    "#;

    // Entry "3" is pending; it must pass through approved before processing.
    let resp = exec(
        &ctx.schema,
        Some(hr()),
        update,
        json!({ "input": { "id": "3", "status": "PROCESSED" } }),
    )
    .await;
    assert_error_code(&resp, "VALIDATION");

    let resp = exec(
        &ctx.schema,
        Some(hr()),
        update,
        json!({ "input": { "id": "3", "status": "APPROVED" } }),
    )
    .await;
    assert_eq!(data(resp)["payroll"]["updateEntry"]["status"], "APPROVED");

    let resp = exec(
        &ctx.schema,
        Some(hr()),
        update,
        json!({ "input": { "id": "3", "status": "PROCESSED" } }),
    )
    .await;
    assert_eq!(data(resp)["payroll"]["updateEntry"]["status"], "PROCESSED");
}

#[tokio::test]
async fn hand_entered_pay_figures_are_stored_verbatim() {
    let ctx = TestContext::seeded();
    let update = r#"
        mutation Update($input: UpdatePayrollInput!) {
            payroll { updateEntry(input: $input) { id grossPay deductions netPay } }
        }
    "#;
    // Net pay deliberately disagrees with gross minus deductions.
    let resp = exec(
        &ctx.schema,
        Some(hr()),
        update,
        json!({ "input": { "id": "1", "grossPay": 7000.0, "deductions": 1000.0, "netPay": 5500.0 } }),
    )
    .await;
    let payload = data(resp);
    let updated = &payload["payroll"]["updateEntry"];
    assert_eq!(updated["grossPay"], 7000.0);
    assert_eq!(updated["netPay"], 5500.0);
}

#[tokio::test]
async fn report_renders_every_entry_for_export() {
    let ctx = TestContext::seeded();
    let report = r#"query { payroll { report } }"#;
    let payload = data(exec(&ctx.schema, Some(hr()), report, json!({})).await);
    let text = payload["payroll"]["report"].as_str().unwrap();
    assert!(text.contains("John Smith"));
    assert!(text.contains("Sarah Johnson"));
    assert!(text.contains("Mike Wilson"));
    assert!(text.contains("Total net pay: 14666.00"));
}
