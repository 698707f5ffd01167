use async_graphql::{Context, Enum, InputObject, Object, SimpleObject, ID};
use chrono::{NaiveDate, Utc};
use entity::expense::{Expense, Status};
use entity::user::Role;

use crate::auth::Viewer;
use crate::state::new_record_id;
use crate::summary::{expense_summary, ExpenseSummary};

use super::{
    error_with_code, not_found, read_store, required_text, state, store_error, text_or,
    transition, viewer, write_store,
};

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Rejected,
}

impl From<Status> for ExpenseStatus {
    fn from(value: Status) -> Self {
        match value {
            Status::Pending => ExpenseStatus::Pending,
            Status::Approved => ExpenseStatus::Approved,
            Status::Rejected => ExpenseStatus::Rejected,
        }
    }
}

impl From<ExpenseStatus> for Status {
    fn from(value: ExpenseStatus) -> Self {
        match value {
            ExpenseStatus::Pending => Status::Pending,
            ExpenseStatus::Approved => Status::Approved,
            ExpenseStatus::Rejected => Status::Rejected,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Expense")]
pub struct ExpenseNode {
    pub id: ID,
    #[graphql(name = "employeeId")]
    pub employee_id: ID,
    #[graphql(name = "employeeName")]
    pub employee_name: String,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub status: ExpenseStatus,
}

impl From<&Expense> for ExpenseNode {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ID::from(expense.id.clone()),
            employee_id: ID::from(expense.employee_id.clone()),
            employee_name: expense.employee_name.clone(),
            category: expense.category.clone(),
            amount: expense.amount,
            date: expense.date,
            description: expense.description.clone(),
            status: expense.status.into(),
        }
    }
}

#[derive(InputObject, Clone)]
pub struct NewExpenseInput {
    pub category: Option<String>,
    pub amount: f64,
    pub description: String,
    pub date: Option<NaiveDate>,
}

#[derive(InputObject, Clone)]
pub struct UpdateExpenseInput {
    pub id: ID,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
}

/// Employees see their own expenses; Manager and HR see the whole list.
pub fn visible_expenses(viewer: &Viewer, expenses: &[Expense]) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| viewer.role != Role::Employee || expense.employee_id == viewer.id)
        .cloned()
        .collect()
}

pub struct ExpenseQuery;

#[Object]
impl ExpenseQuery {
    async fn entries(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<ExpenseNode>> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        let store = read_store(&state.expenses)?;
        Ok(visible_expenses(&current, &store.snapshot())
            .iter()
            .map(ExpenseNode::from)
            .collect())
    }

    /// Aggregates over the viewer's visible expenses.
    async fn summary(&self, ctx: &Context<'_>) -> async_graphql::Result<ExpenseSummary> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        let store = read_store(&state.expenses)?;
        Ok(expense_summary(&visible_expenses(&current, &store.snapshot())))
    }
}

pub struct ExpenseMutation;

#[Object]
impl ExpenseMutation {
    /// Files an expense for the viewer. New expenses always start pending.
    #[graphql(name = "createExpense")]
    async fn create_expense(
        &self,
        ctx: &Context<'_>,
        input: NewExpenseInput,
    ) -> async_graphql::Result<ExpenseNode> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        let description = required_text("description", &input.description)?;
        let expense = Expense {
            id: new_record_id(),
            employee_id: current.id.clone(),
            employee_name: current.name.clone(),
            category: text_or(input.category, "Travel"),
            amount: input.amount,
            date: input.date.unwrap_or_else(|| Utc::now().date_naive()),
            description,
            status: Status::Pending,
        };
        let node = ExpenseNode::from(&expense);
        write_store(&state.expenses)?
            .add(expense)
            .map_err(store_error)?;
        Ok(node)
    }

    /// Field edits by the owner or a manager; status is changed through
    /// `setExpenseStatus` only.
    #[graphql(name = "updateExpense")]
    async fn update_expense(
        &self,
        ctx: &Context<'_>,
        input: UpdateExpenseInput,
    ) -> async_graphql::Result<ExpenseNode> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        let mut store = write_store(&state.expenses)?;
        let existing = store
            .get(input.id.as_str())
            .cloned()
            .ok_or_else(|| not_found("Expense not found"))?;
        ensure_owner_or_manager(&current, &existing)?;
        store.update(input.id.as_str(), |expense| {
            if let Some(category) = &input.category {
                expense.category = category.clone();
            }
            if let Some(amount) = input.amount {
                expense.amount = amount;
            }
            if let Some(description) = &input.description {
                expense.description = description.clone();
            }
        });
        let updated = store
            .get(input.id.as_str())
            .ok_or_else(|| not_found("Expense not found"))?;
        Ok(ExpenseNode::from(updated))
    }

    /// Approval decision; managers only, and only out of the pending state.
    #[graphql(name = "setExpenseStatus")]
    async fn set_expense_status(
        &self,
        ctx: &Context<'_>,
        id: ID,
        status: ExpenseStatus,
    ) -> async_graphql::Result<ExpenseNode> {
        super::require_role(ctx, Role::Manager)?;
        let state = state(ctx)?;
        let mut store = write_store(&state.expenses)?;
        let existing = store
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| not_found("Expense not found"))?;
        let next = transition(existing.status, status.into())?;
        store.update(id.as_str(), |expense| expense.status = next);
        let updated = store
            .get(id.as_str())
            .ok_or_else(|| not_found("Expense not found"))?;
        Ok(ExpenseNode::from(updated))
    }

    #[graphql(name = "deleteExpense")]
    async fn delete_expense(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        let current = viewer(ctx)?;
        let state = state(ctx)?;
        let mut store = write_store(&state.expenses)?;
        if let Some(existing) = store.get(id.as_str()).cloned() {
            ensure_owner_or_manager(&current, &existing)?;
        }
        Ok(store.remove(id.as_str()))
    }
}

fn ensure_owner_or_manager(viewer: &Viewer, expense: &Expense) -> async_graphql::Result<()> {
    if viewer.has_role(Role::Manager) || expense.employee_id == viewer.id {
        Ok(())
    } else {
        Err(error_with_code("FORBIDDEN", "Insufficient permissions"))
    }
}
