//! Tabular payroll report.
//!
//! The payroll screen offers a downloadable report of the current entries.
//! Rendering the document is the export collaborator's job; the core's
//! obligation is a snapshot formatted as a plain-text table.

use entity::payroll::PayrollEntry;
use entity::StatusMachine;

use crate::summary::payroll_summary;

pub fn render_payroll_report(entries: &[PayrollEntry]) -> String {
    let mut out = String::from(
        "Payroll Report\n\
         Employee              Position              Gross      Deductions Net        Status\n",
    );
    for entry in entries {
        out.push_str(&format!(
            "{:<21} {:<21} {:<10.2} {:<10.2} {:<10.2} {}\n",
            entry.employee_name,
            entry.position,
            entry.gross_pay,
            entry.deductions,
            entry.net_pay,
            entry.status.as_str(),
        ));
    }
    let summary = payroll_summary(entries);
    out.push_str(&format!(
        "Total net pay: {:.2} across {} employees ({} pending)\n",
        summary.total_net_pay, summary.employee_count, summary.pending,
    ));
    out
}
