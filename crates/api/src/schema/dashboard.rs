use async_graphql::{Context, Object, SimpleObject};
use entity::user::Role;

use super::viewer;

/// Headline numbers for the landing screen. These are the demo figures the
/// dashboard has always shown; they are fixtures, not live aggregates.
#[derive(Clone, Debug, SimpleObject)]
pub struct DashboardKpis {
    #[graphql(name = "activeProjects")]
    pub active_projects: i32,
    #[graphql(name = "completedTasks")]
    pub completed_tasks: i32,
    #[graphql(name = "pendingTimeOff")]
    pub pending_time_off: i32,
    #[graphql(name = "expensesPending")]
    pub expenses_pending: i32,
    /// Only populated for Manager and HR viewers.
    #[graphql(name = "totalEmployees")]
    pub total_employees: Option<i32>,
    /// Only populated for Manager and HR viewers.
    #[graphql(name = "monthlyBudget")]
    pub monthly_budget: Option<i32>,
}

pub fn demo_kpis(role: Role) -> DashboardKpis {
    let managerial = role.level() >= Role::Manager.level();
    DashboardKpis {
        active_projects: 12,
        completed_tasks: 245,
        pending_time_off: 8,
        expenses_pending: 15,
        total_employees: managerial.then_some(150),
        monthly_budget: managerial.then_some(125_000),
    }
}

pub struct DashboardQuery;

#[Object]
impl DashboardQuery {
    async fn kpis(&self, ctx: &Context<'_>) -> async_graphql::Result<DashboardKpis> {
        let current = viewer(ctx)?;
        Ok(demo_kpis(current.role))
    }
}
