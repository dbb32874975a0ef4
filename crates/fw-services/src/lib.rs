//! # fw-services
//!
//! Business logic for FemWell RS: the assignment graph manager, the
//! notification and dashboard aggregators, and account lifecycle.
//!
//! Services are stateless facades over the [`store::RecordStore`] port;
//! every read is a fresh computation, and the next call observes prior
//! mutations immediately. Two store implementations exist: the
//! PostgreSQL-backed [`pg::PgRecordStore`] and the in-memory
//! [`memory::MemoryRecordStore`] for development/testing.

pub mod accounts;
pub mod assignments;
pub mod dashboard;
pub mod error;
pub mod memory;
pub mod notifications;
pub mod pg;
pub mod roster;
pub mod store;

pub use accounts::AccountService;
pub use assignments::{AssignedFeminine, AssignmentService, FeminineOption};
pub use dashboard::{DashboardService, DashboardSummary, MonthBucket, PieBucket};
pub use error::{ServiceError, ServiceResult};
pub use memory::MemoryRecordStore;
pub use notifications::{
    NotificationService, PeriodNotification, Scope, SeenAcknowledgement, SignupNotification,
};
pub use pg::PgRecordStore;
pub use roster::{
    AccountOverview, CalendarEntry, FeminineOverview, HealthWorkerOverview, RosterService,
};
pub use store::RecordStore;
