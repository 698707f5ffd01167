mod common;

use common::{assert_error_code, data, employee, exec, manager, TestContext};
use serde_json::json;

const ENTRIES: &str = r#"
    query { expenses { entries { id employeeId category amount status } } }
"#;

const SUMMARY: &str = r#"
    query { expenses { summary { totalAmount pending approved rejected } } }
"#;

#[tokio::test]
async fn filing_an_expense_extends_the_fixture_totals() {
    let ctx = TestContext::seeded();
    let create = r#"
        mutation Create($input: NewExpenseInput!) {
            expenses { createExpense(input: $input) { id category amount status } }
        }
    "#;
    let resp = exec(
        &ctx.schema,
        Some(employee()),
        create,
        json!({ "input": { "category": "Travel", "amount": 42.0, "description": "Taxi" } }),
    )
    .await;
    let payload = data(resp);
    let created = &payload["expenses"]["createExpense"];
    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["amount"], 42.0);

    let entries = data(exec(&ctx.schema, Some(employee()), ENTRIES, json!({})).await);
    assert_eq!(entries["expenses"]["entries"].as_array().unwrap().len(), 3);

    // 850.00 + 125.50 + 42.00, with the new entry joining the pending pile.
    let summary = data(exec(&ctx.schema, Some(employee()), SUMMARY, json!({})).await);
    assert_eq!(summary["expenses"]["summary"]["totalAmount"], 1017.5);
    assert_eq!(summary["expenses"]["summary"]["pending"], 2);
    assert_eq!(summary["expenses"]["summary"]["approved"], 1);
}

#[tokio::test]
async fn an_empty_description_is_rejected_and_nothing_is_stored() {
    let ctx = TestContext::seeded();
    let create = r#"
        mutation Create($input: NewExpenseInput!) {
            expenses { createExpense(input: $input) { id } }
        }
    "#;
    let resp = exec(
        &ctx.schema,
        Some(employee()),
        create,
        json!({ "input": { "amount": 10.0, "description": "   " } }),
    )
    .await;
    assert_error_code(&resp, "VALIDATION");

    let entries = data(exec(&ctx.schema, Some(employee()), ENTRIES, json!({})).await);
    assert_eq!(entries["expenses"]["entries"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn approval_is_a_manager_decision_out_of_pending_only() {
    let ctx = TestContext::seeded();
    let set_status = r#"
        mutation Set($id: ID!, $status: ExpenseStatus!) {
            expenses { setExpenseStatus(id: $id, status: $status) { id status } }
        }
    "#;

    let resp = exec(
        &ctx.schema,
        Some(employee()),
        set_status,
        json!({ "id": "1", "status": "APPROVED" }),
    )
    .await;
    assert_error_code(&resp, "FORBIDDEN");

    let resp = exec(
        &ctx.schema,
        Some(manager()),
        set_status,
        json!({ "id": "1", "status": "APPROVED" }),
    )
    .await;
    assert_eq!(
        data(resp)["expenses"]["setExpenseStatus"]["status"],
        "APPROVED"
    );

    // Expense "2" is already approved; decisions are terminal.
    let resp = exec(
        &ctx.schema,
        Some(manager()),
        set_status,
        json!({ "id": "2", "status": "REJECTED" }),
    )
    .await;
    assert_error_code(&resp, "VALIDATION");
}

#[tokio::test]
async fn owners_edit_fields_but_not_status() {
    let ctx = TestContext::seeded();
    let update = r#"
        mutation Update($input: UpdateExpenseInput!) {
            expenses { updateExpense(input: $input) { id amount description status } }
        }
    "#;
    let resp = exec(
        &ctx.schema,
        Some(employee()),
        update,
        json!({ "input": { "id": "1", "amount": 900.0, "description": "Client meeting travel, updated" } }),
    )
    .await;
    let payload = data(resp);
    let updated = &payload["expenses"]["updateExpense"];
    assert_eq!(updated["amount"], 900.0);
    // Status is untouched by field edits.
    assert_eq!(updated["status"], "PENDING");
}

#[tokio::test]
async fn deleting_twice_removes_exactly_once() {
    let ctx = TestContext::seeded();
    let delete = r#"
        mutation Delete($id: ID!) { expenses { deleteExpense(id: $id) } }
    "#;
    let resp = exec(&ctx.schema, Some(employee()), delete, json!({ "id": "2" })).await;
    assert_eq!(data(resp)["expenses"]["deleteExpense"], true);
    let resp = exec(&ctx.schema, Some(employee()), delete, json!({ "id": "2" })).await;
    assert_eq!(data(resp)["expenses"]["deleteExpense"], false);

    let summary = data(exec(&ctx.schema, Some(employee()), SUMMARY, json!({})).await);
    assert_eq!(summary["expenses"]["summary"]["totalAmount"], 850.0);
}
