//! `db` crate — persistence layer for Jobly jobs.
//!
//! Provides a connection pool, typed row structs, and repository functions
//! for the `jobs` table (joined to `companies`).  No HTTP concerns live here.

pub mod error;
pub mod pool;
pub mod repository;
pub mod models;
pub mod sql;

pub use pool::{DbConfig, DbPool};
pub use error::DbError;
pub use models::{Company, Job, JobDetail, JobFilter, JobListing, JobPatch, NewJob};
