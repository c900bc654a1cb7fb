//! Job CRUD operations.
//!
//! Listings and single lookups join `companies` on `company_handle`; a missing
//! id surfaces as `DbError::NotFound("No job: {id}")`.

use sqlx::{PgExecutor, Postgres, QueryBuilder};
use tracing::{debug, info, instrument};

use crate::{
    models::{Job, JobDetail, JobDetailRow, JobFilter, JobListing, JobPatch, NewJob},
    sql::SetClause,
    DbError,
};

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

fn no_job(id: i32) -> DbError {
    DbError::NotFound(format!("No job: {id}"))
}

/// Insert a new job and return it with its generated id.
///
/// The company handle is not looked up first; an unknown handle is rejected
/// by the foreign key and surfaces as `DbError::Sqlx`.
#[instrument(skip(executor))]
pub async fn create_job<'e, E>(executor: E, new_job: &NewJob) -> Result<Job, DbError>
where
    E: PgExecutor<'e>,
{
    new_job.validate()?;

    let job = sqlx::query_as::<_, Job>(
        r#"
        INSERT INTO jobs (title, salary, equity, company_handle)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, salary, equity, company_handle
        "#,
    )
    .bind(new_job.title.as_str())
    .bind(new_job.salary)
    .bind(new_job.equity)
    .bind(new_job.company_handle.as_str())
    .fetch_one(executor)
    .await?;

    info!(job_id = job.id, "created job");
    Ok(job)
}

/// Return every job matching `filter`, in insertion (id) order, each with its
/// company's name.
#[instrument(skip(executor))]
pub async fn list_jobs<'e, E>(executor: E, filter: &JobFilter) -> Result<Vec<JobListing>, DbError>
where
    E: PgExecutor<'e>,
{
    let mut query = list_query(filter);
    let rows = query
        .build_query_as::<JobListing>()
        .fetch_all(executor)
        .await?;

    debug!(count = rows.len(), "listed jobs");
    Ok(rows)
}

fn list_query(filter: &JobFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        "SELECT j.id, j.title, j.salary, j.equity, j.company_handle, c.name AS company_name \
         FROM jobs j JOIN companies c ON c.handle = j.company_handle",
    );

    let mut glue = " WHERE ";
    if let Some(title) = &filter.title {
        query
            .push(glue)
            .push("j.title ILIKE ")
            .push_bind(format!("%{}%", escape_like(title)))
            .push(" ESCAPE '\\'");
        glue = " AND ";
    }
    if let Some(min_salary) = filter.min_salary {
        query.push(glue).push("j.salary >= ").push_bind(min_salary);
        glue = " AND ";
    }
    if filter.has_equity {
        query.push(glue).push("j.equity > 0");
    }

    query.push(" ORDER BY j.id");
    query
}

/// Escape `LIKE` wildcards so `needle` matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Fetch a single job with its company nested.
#[instrument(skip(executor))]
pub async fn get_job<'e, E>(executor: E, id: i32) -> Result<JobDetail, DbError>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, JobDetailRow>(
        r#"
        SELECT j.id, j.title, j.salary, j.equity,
               c.handle, c.name, c.description, c.num_employees, c.logo_url
        FROM jobs j
        JOIN companies c ON c.handle = j.company_handle
        WHERE j.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| no_job(id))?;

    Ok(row.into())
}

/// Apply `patch` to job `id` and return the updated row.
///
/// An empty patch is rejected with `DbError::BadRequest` before the store is
/// touched, so it wins over a missing id.
#[instrument(skip(executor))]
pub async fn update_job<'e, E>(executor: E, id: i32, patch: &JobPatch) -> Result<Job, DbError>
where
    E: PgExecutor<'e>,
{
    let mut set = SetClause::new("jobs");
    set.set_opt("title", patch.title.clone())
        .set_opt("salary", patch.salary)
        .set_opt("equity", patch.equity);
    let mut query = set.finish("id", id, JOB_COLUMNS)?;
    patch.validate()?;

    let job = query
        .build_query_as::<Job>()
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| no_job(id))?;

    info!(job_id = job.id, "updated job");
    Ok(job)
}

/// Permanently delete a job by id.
///
/// Returns `DbError::NotFound` if no row was deleted, so repeating a removal fails.
#[instrument(skip(executor))]
pub async fn remove_job<'e, E>(executor: E, id: i32) -> Result<(), DbError>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(no_job(id));
    }

    info!(job_id = id, "removed job");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_BASE: &str = "SELECT j.id, j.title, j.salary, j.equity, j.company_handle, \
        c.name AS company_name FROM jobs j JOIN companies c ON c.handle = j.company_handle";

    #[test]
    fn default_filter_lists_everything_in_id_order() {
        let query = list_query(&JobFilter::default());
        assert_eq!(query.sql(), format!("{LIST_BASE} ORDER BY j.id"));
    }

    #[test]
    fn filters_are_and_combined() {
        let filter = JobFilter {
            title: Some("eng".into()),
            min_salary: Some(1002),
            has_equity: true,
        };
        let query = list_query(&filter);
        assert_eq!(
            query.sql(),
            format!(
                "{LIST_BASE} WHERE j.title ILIKE $1 ESCAPE '\\' AND j.salary >= $2 \
                 AND j.equity > 0 ORDER BY j.id"
            )
        );
    }

    #[test]
    fn equity_only_filter_binds_nothing() {
        let filter = JobFilter { has_equity: true, ..Default::default() };
        let query = list_query(&filter);
        assert_eq!(query.sql(), format!("{LIST_BASE} WHERE j.equity > 0 ORDER BY j.id"));
    }

    #[test]
    fn like_wildcards_in_title_are_escaped() {
        assert_eq!(escape_like("job"), "job");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
    }
}
