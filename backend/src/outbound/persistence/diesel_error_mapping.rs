//! Shared Diesel error classification for the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Coarse classification of a Diesel failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// A unique or primary key constraint rejected the write.
    UniqueViolation,
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation,
    /// The connection dropped mid-operation.
    Connection,
    /// Anything else.
    Query,
}

impl DieselFailure {
    /// Human-readable cause, safe to surface in logs.
    pub(crate) fn describe(self) -> &'static str {
        match self {
            Self::UniqueViolation => "unique constraint violated",
            Self::ForeignKeyViolation => "foreign key constraint violated",
            Self::Connection => "database connection error",
            Self::Query => "database error",
        }
    }
}

/// Classify and log a Diesel error.
pub(crate) fn classify_diesel_error(error: &DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DieselFailure::UniqueViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            DieselFailure::ForeignKeyViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection
        }
        _ => DieselFailure::Query,
    }
}

/// Message carried by a pool failure.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct FakeInfo(&'static str);

    impl diesel::result::DatabaseErrorInformation for FakeInfo {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(FakeInfo("boom")))
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::UniqueViolation), DieselFailure::UniqueViolation)]
    #[case(
        database_error(DatabaseErrorKind::ForeignKeyViolation),
        DieselFailure::ForeignKeyViolation
    )]
    #[case(database_error(DatabaseErrorKind::ClosedConnection), DieselFailure::Connection)]
    #[case(database_error(DatabaseErrorKind::SerializationFailure), DieselFailure::Query)]
    #[case(DieselError::NotFound, DieselFailure::Query)]
    fn classifies_diesel_errors(#[case] error: DieselError, #[case] expected: DieselFailure) {
        assert_eq!(classify_diesel_error(&error), expected);
    }

    #[rstest]
    fn pool_message_is_unwrapped() {
        assert_eq!(pool_error_message(PoolError::checkout("timed out")), "timed out");
    }
}
