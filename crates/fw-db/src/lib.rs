//! # fw-db
//!
//! Record Store for FemWell RS.
//!
//! This crate provides PostgreSQL access using SQLx:
//!
//! - Connection pool management
//! - Repositories for users, period entries, and assignment links
//! - The cascading user delete (periods + links + row, one transaction)
//!
//! ## Example
//!
//! ```ignore
//! use fw_db::{Database, DatabaseConfig, UserRepository};
//!
//! let config = DatabaseConfig::from_env();
//! let db = Database::connect(&config).await?;
//!
//! let users = UserRepository::new(db.pool().clone());
//! let user = users.find_by_id(1).await?;
//! ```

pub mod assignments;
pub mod periods;
pub mod pool;
pub mod repository;
pub mod users;

pub use assignments::{AssignedFeminineRow, AssignmentRepository, UnassignedFeminineRow};
pub use periods::{
    LatestPeriodRow, MonthCountRow, PeriodRepository, PeriodRow, UnseenPeriodRow,
};
pub use pool::{Database, DatabaseConfig};
pub use repository::{RepositoryError, RepositoryResult};
pub use users::{UserRepository, UserRow};
