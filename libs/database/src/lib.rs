//! PostgreSQL connectivity for the user management service.
//!
//! - [`postgres::PostgresConfig`] loads pool settings from the environment
//! - [`postgres::connect_with_retry`] opens a SeaORM pool with exponential backoff
//! - [`postgres::run_migrations`] applies any `MigratorTrait` implementation
//! - [`postgres::check_health`] runs `SELECT 1` for readiness checks
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "user_management_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
