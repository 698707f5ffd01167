use async_graphql::{Context, Enum, InputObject, Object, SimpleObject, ID};
use entity::payroll::{PayrollEntry, Status};
use entity::user::Role;
use tracing::info_span;

use crate::report::render_payroll_report;
use crate::state::new_record_id;
use crate::summary::{payroll_summary, PayrollSummary};

use super::{
    not_found, read_store, require_role, required_text, state, store_error, transition,
    write_store,
};

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum PayrollStatus {
    Pending,
    Approved,
    Processed,
}

impl From<Status> for PayrollStatus {
    fn from(value: Status) -> Self {
        match value {
            Status::Pending => PayrollStatus::Pending,
            Status::Approved => PayrollStatus::Approved,
            Status::Processed => PayrollStatus::Processed,
        }
    }
}

impl From<PayrollStatus> for Status {
    fn from(value: PayrollStatus) -> Self {
        match value {
            PayrollStatus::Pending => Status::Pending,
            PayrollStatus::Approved => Status::Approved,
            PayrollStatus::Processed => Status::Processed,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "PayrollEntry")]
pub struct PayrollEntryNode {
    pub id: ID,
    #[graphql(name = "employeeName")]
    pub employee_name: String,
    pub position: String,
    pub salary: f64,
    #[graphql(name = "hoursWorked")]
    pub hours_worked: f64,
    pub overtime: f64,
    #[graphql(name = "grossPay")]
    pub gross_pay: f64,
    pub deductions: f64,
    #[graphql(name = "netPay")]
    pub net_pay: f64,
    pub status: PayrollStatus,
}

impl From<&PayrollEntry> for PayrollEntryNode {
    fn from(entry: &PayrollEntry) -> Self {
        Self {
            id: ID::from(entry.id.clone()),
            employee_name: entry.employee_name.clone(),
            position: entry.position.clone(),
            salary: entry.salary,
            hours_worked: entry.hours_worked,
            overtime: entry.overtime,
            gross_pay: entry.gross_pay,
            deductions: entry.deductions,
            net_pay: entry.net_pay,
            status: entry.status.into(),
        }
    }
}

/// Pay figures are entered as given; gross and net are never derived from
/// salary or hours.
#[derive(InputObject, Clone)]
pub struct NewPayrollInput {
    #[graphql(name = "employeeName")]
    pub employee_name: String,
    pub position: String,
    pub salary: Option<f64>,
    #[graphql(name = "hoursWorked")]
    pub hours_worked: Option<f64>,
    pub overtime: Option<f64>,
    #[graphql(name = "grossPay")]
    pub gross_pay: Option<f64>,
    pub deductions: Option<f64>,
    #[graphql(name = "netPay")]
    pub net_pay: Option<f64>,
}

#[derive(InputObject, Clone)]
pub struct UpdatePayrollInput {
    pub id: ID,
    #[graphql(name = "employeeName")]
    pub employee_name: Option<String>,
    pub position: Option<String>,
    pub salary: Option<f64>,
    #[graphql(name = "hoursWorked")]
    pub hours_worked: Option<f64>,
    pub overtime: Option<f64>,
    #[graphql(name = "grossPay")]
    pub gross_pay: Option<f64>,
    pub deductions: Option<f64>,
    #[graphql(name = "netPay")]
    pub net_pay: Option<f64>,
    pub status: Option<PayrollStatus>,
}

pub struct PayrollQuery;

#[Object]
impl PayrollQuery {
    async fn entries(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<PayrollEntryNode>> {
        require_role(ctx, Role::Hr)?;
        let state = state(ctx)?;
        let store = read_store(&state.payroll)?;
        Ok(store.iter().map(PayrollEntryNode::from).collect())
    }

    async fn summary(&self, ctx: &Context<'_>) -> async_graphql::Result<PayrollSummary> {
        require_role(ctx, Role::Hr)?;
        let state = state(ctx)?;
        let store = read_store(&state.payroll)?;
        Ok(payroll_summary(&store.snapshot()))
    }

    /// Plain-text table of the current entries, handed to the export
    /// collaborator as-is.
    async fn report(&self, ctx: &Context<'_>) -> async_graphql::Result<String> {
        require_role(ctx, Role::Hr)?;
        let state = state(ctx)?;
        let store = read_store(&state.payroll)?;
        let entries = store.snapshot();
        let span = info_span!("workforce.payroll.report", entries = entries.len());
        let _guard = span.enter();
        Ok(render_payroll_report(&entries))
    }
}

pub struct PayrollMutation;

#[Object]
impl PayrollMutation {
    #[graphql(name = "createEntry")]
    async fn create_entry(
        &self,
        ctx: &Context<'_>,
        input: NewPayrollInput,
    ) -> async_graphql::Result<PayrollEntryNode> {
        require_role(ctx, Role::Hr)?;
        let state = state(ctx)?;
        let employee_name = required_text("employeeName", &input.employee_name)?;
        let position = required_text("position", &input.position)?;
        let entry = PayrollEntry {
            id: new_record_id(),
            employee_name,
            position,
            salary: input.salary.unwrap_or(0.0),
            hours_worked: input.hours_worked.unwrap_or(0.0),
            overtime: input.overtime.unwrap_or(0.0),
            gross_pay: input.gross_pay.unwrap_or(0.0),
            deductions: input.deductions.unwrap_or(0.0),
            net_pay: input.net_pay.unwrap_or(0.0),
            status: Status::Pending,
        };
        let node = PayrollEntryNode::from(&entry);
        write_store(&state.payroll)?
            .add(entry)
            .map_err(store_error)?;
        Ok(node)
    }

    #[graphql(name = "updateEntry")]
    async fn update_entry(
        &self,
        ctx: &Context<'_>,
        input: UpdatePayrollInput,
    ) -> async_graphql::Result<PayrollEntryNode> {
        require_role(ctx, Role::Hr)?;
        let state = state(ctx)?;
        let mut store = write_store(&state.payroll)?;
        let existing = store
            .get(input.id.as_str())
            .cloned()
            .ok_or_else(|| not_found("Payroll entry not found"))?;
        let status = match input.status {
            Some(next) => transition(existing.status, next.into())?,
            None => existing.status,
        };
        store.update(input.id.as_str(), |entry| {
            if let Some(employee_name) = &input.employee_name {
                entry.employee_name = employee_name.clone();
            }
            if let Some(position) = &input.position {
                entry.position = position.clone();
            }
            if let Some(salary) = input.salary {
                entry.salary = salary;
            }
            if let Some(hours_worked) = input.hours_worked {
                entry.hours_worked = hours_worked;
            }
            if let Some(overtime) = input.overtime {
                entry.overtime = overtime;
            }
            if let Some(gross_pay) = input.gross_pay {
                entry.gross_pay = gross_pay;
            }
            if let Some(deductions) = input.deductions {
                entry.deductions = deductions;
            }
            if let Some(net_pay) = input.net_pay {
                entry.net_pay = net_pay;
            }
            entry.status = status;
        });
        let updated = store
            .get(input.id.as_str())
            .ok_or_else(|| not_found("Payroll entry not found"))?;
        Ok(PayrollEntryNode::from(updated))
    }

    #[graphql(name = "deleteEntry")]
    async fn delete_entry(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        require_role(ctx, Role::Hr)?;
        let state = state(ctx)?;
        let removed = write_store(&state.payroll)?.remove(id.as_str());
        Ok(removed)
    }
}
