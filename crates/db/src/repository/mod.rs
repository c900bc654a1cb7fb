//! Repository functions — one function per database operation.
//!
//! Every function takes a `PgExecutor` (a `&DbPool`, a connection, or an open
//! transaction) and returns a `Result<T, DbError>`.  No HTTP concerns here.

pub mod jobs;
