//! Shared Diesel error mapping for the user and address repositories.
//!
//! Both repositories expose the same `Connection`/`Query` split, so the
//! mapping takes the two constructors instead of a concrete error type.

use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure onto a repository connection error.
pub(super) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    debug!(error = %error, "database pool checkout failed");
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => connection(message),
    }
}

/// Map Diesel errors onto query or connection constructors.
///
/// Driver detail is logged at debug level and never copied into the
/// returned error.
pub(super) fn map_basic_diesel_error<E, Q, C>(
    error: diesel::result::Error,
    query: Q,
    connection: C,
) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection error"),
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced row does not exist")
        }
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    //! Mapping coverage using plain strings as the target error type.
    use super::*;
    use diesel::result::Error as DieselError;
    use rstest::rstest;

    fn as_query(message: &'static str) -> String {
        format!("query: {message}")
    }

    fn as_connection(message: &'static str) -> String {
        format!("connection: {message}")
    }

    #[rstest]
    #[case(DieselError::NotFound, "query: record not found")]
    #[case(DieselError::BrokenTransactionManager, "connection: database connection error")]
    #[case(DieselError::RollbackTransaction, "query: database error")]
    fn diesel_errors_map_to_categories(#[case] error: DieselError, #[case] expected: &str) {
        let mapped = map_basic_diesel_error(error, as_query, as_connection);
        assert_eq!(mapped, expected);
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), |message| {
            format!("connection: {message}")
        });
        assert_eq!(mapped, "connection: timed out");
    }
}
