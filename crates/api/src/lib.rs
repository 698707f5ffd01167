pub mod auth;
pub mod report;
pub mod schedule;
pub mod schema;
pub mod state;
pub mod summary;
