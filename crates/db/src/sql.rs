//! Helpers for building parameterised SQL statements.

use sqlx::{Encode, Postgres, QueryBuilder, Type};

use crate::DbError;

/// Builds `UPDATE <table> SET col = $1, col = $2 … WHERE key = $n RETURNING …`
/// from only the columns a caller actually wants to change.
///
/// Column and table names are trusted identifiers; every value is bound.
pub struct SetClause<'args> {
    builder: QueryBuilder<'args, Postgres>,
    columns: usize,
}

impl<'args> SetClause<'args> {
    pub fn new(table: &'static str) -> Self {
        Self {
            builder: QueryBuilder::new(format!("UPDATE {table} SET ")),
            columns: 0,
        }
    }

    /// Append `column = $n` bound to `value`.
    pub fn set<T>(&mut self, column: &'static str, value: T) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if self.columns > 0 {
            self.builder.push(", ");
        }
        self.builder.push(column).push(" = ").push_bind(value);
        self.columns += 1;
        self
    }

    /// Like [`SetClause::set`], skipping `None`.
    pub fn set_opt<T>(&mut self, column: &'static str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.set(column, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns == 0
    }

    /// Close the statement with its `WHERE` and `RETURNING` parts.
    ///
    /// Returns `DbError::BadRequest` if no column was set.
    pub fn finish<K>(
        mut self,
        key_column: &'static str,
        key: K,
        returning: &'static str,
    ) -> Result<QueryBuilder<'args, Postgres>, DbError>
    where
        K: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if self.is_empty() {
            return Err(DbError::BadRequest("No data".into()));
        }
        self.builder
            .push(" WHERE ")
            .push(key_column)
            .push(" = ")
            .push_bind(key)
            .push(" RETURNING ")
            .push(returning);
        Ok(self.builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_placeholders_in_column_order() {
        let mut set = SetClause::new("jobs");
        set.set("title", "new job".to_string()).set("salary", 9999_i32);
        let qb = set.finish("id", 1_i32, "id, title").unwrap();
        assert_eq!(
            qb.sql(),
            "UPDATE jobs SET title = $1, salary = $2 WHERE id = $3 RETURNING id, title"
        );
    }

    #[test]
    fn skips_absent_optional_values() {
        let mut set = SetClause::new("jobs");
        set.set_opt("title", None::<String>).set_opt("salary", Some(10_i32));
        let qb = set.finish("id", 4_i32, "id").unwrap();
        assert_eq!(qb.sql(), "UPDATE jobs SET salary = $1 WHERE id = $2 RETURNING id");
    }

    #[test]
    fn empty_clause_is_a_bad_request() {
        let set = SetClause::new("jobs");
        assert!(set.is_empty());
        match set.finish("id", 1_i32, "id") {
            Err(DbError::BadRequest(msg)) => assert_eq!(msg, "No data"),
            Err(other) => panic!("expected BadRequest, got {other:?}"),
            Ok(qb) => panic!("expected BadRequest, built {:?}", qb.sql()),
        }
    }
}
