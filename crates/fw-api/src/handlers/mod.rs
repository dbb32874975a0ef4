//! Request handlers, grouped by concern

pub mod accounts;
pub mod assignments;
pub mod dashboard;
pub mod notifications;
pub mod roster;
