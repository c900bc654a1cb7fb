//! Row structs and inputs for the `jobs` and `companies` tables.
//!
//! These are *persistence* models: they serialise with camelCase field names
//! and carry `equity` as a `Decimal`, which serde writes as a string.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::DbError;

// ---------------------------------------------------------------------------
// companies
// ---------------------------------------------------------------------------

/// A company, as embedded in a single-job lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

// ---------------------------------------------------------------------------
// jobs
// ---------------------------------------------------------------------------

/// A persisted job row, as returned by create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// A job in a listing, annotated with the owning company's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
    pub company_name: String,
}

/// A single job with its company nested under `company`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company: Company,
}

/// Flat shape of the `jobs JOIN companies` row behind [`JobDetail`].
#[derive(Debug, FromRow)]
pub(crate) struct JobDetailRow {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl From<JobDetailRow> for JobDetail {
    fn from(row: JobDetailRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            salary: row.salary,
            equity: row.equity,
            company: Company {
                handle: row.handle,
                name: row.name,
                description: row.description,
                num_employees: row.num_employees,
                logo_url: row.logo_url,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// inputs
// ---------------------------------------------------------------------------

/// Data for a new job. The company handle is checked by the store's foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl NewJob {
    pub fn validate(&self) -> Result<(), DbError> {
        check_title(&self.title)?;
        check_salary(self.salary)?;
        check_equity(self.equity)
    }
}

/// Fields to change on an existing job. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
}

impl JobPatch {
    pub fn validate(&self) -> Result<(), DbError> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        check_salary(self.salary)?;
        check_equity(self.equity)
    }
}

/// Optional criteria for listing jobs; all present criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    /// Only jobs offering a non-zero equity.
    #[serde(default)]
    pub has_equity: bool,
}

fn check_title(title: &str) -> Result<(), DbError> {
    if title.trim().is_empty() {
        return Err(DbError::BadRequest("title must not be empty".into()));
    }
    Ok(())
}

fn check_salary(salary: Option<i32>) -> Result<(), DbError> {
    match salary {
        Some(s) if s < 0 => Err(DbError::BadRequest(format!(
            "salary must be non-negative, got {s}"
        ))),
        _ => Ok(()),
    }
}

fn check_equity(equity: Option<Decimal>) -> Result<(), DbError> {
    match equity {
        Some(e) if e < Decimal::ZERO || e > Decimal::ONE => Err(DbError::BadRequest(format!(
            "equity must be between 0 and 1, got {e}"
        ))),
        _ => Ok(()),
    }
}
