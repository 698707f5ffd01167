//! Record types for the workforce suite.
//!
//! Every collection the service manages is a flat list of one of these
//! records. Status fields are closed enums with a declared transition table;
//! mutations validate moves through [`StatusMachine::transition`] instead of
//! accepting arbitrary status writes.

use thiserror::Error;

pub mod announcement;
pub mod expense;
pub mod payroll;
pub mod project;
pub mod substitute;
pub mod task;
pub mod time_off;
pub mod timesheet;
pub mod user;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal status transition {from} -> {to}")]
pub struct TransitionError {
    pub from: &'static str,
    pub to: &'static str,
}

/// A status enum with an explicit transition table.
///
/// Self-transitions are always legal so that saving a record without touching
/// its status stays idempotent.
pub trait StatusMachine: Copy + PartialEq + Sized + 'static {
    fn as_str(self) -> &'static str;

    /// States this one may move to, excluding itself.
    fn successors(self) -> &'static [Self];

    fn can_become(self, next: Self) -> bool {
        self == next || self.successors().contains(&next)
    }

    fn transition(self, next: Self) -> Result<Self, TransitionError> {
        if self.can_become(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }
}
