use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Every way a recipe store operation can fail.
///
/// Callers branch on the variant; the message carries the driver's detail for
/// logs and is never sent to HTTP clients verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Unable to connect to the database: {0}")]
    Connection(String),

    #[error("Action would violate data integrity: {0}")]
    Integrity(String),

    #[error("Invalid syntax: {0}")]
    Syntax(String),

    #[error("Recipe {0} not found")]
    NotFound(i32),

    #[error("Failed to map recipe row: {0}")]
    Mapping(String),

    #[error("Database error: {0}")]
    Query(String),
}

impl From<diesel::r2d2::PoolError> for StoreError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        StoreError::Connection(err.to_string())
    }
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation
                    | DatabaseErrorKind::ForeignKeyViolation
                    | DatabaseErrorKind::NotNullViolation
                    | DatabaseErrorKind::CheckViolation => StoreError::Integrity(message),
                    DatabaseErrorKind::ClosedConnection
                    | DatabaseErrorKind::UnableToSendCommand => StoreError::Connection(message),
                    _ if is_grammar_error(&message) => StoreError::Syntax(message),
                    _ => StoreError::Query(message),
                }
            }
            DieselError::QueryBuilderError(e) => StoreError::Syntax(e.to_string()),
            DieselError::DeserializationError(e) => StoreError::Mapping(e.to_string()),
            DieselError::BrokenTransactionManager => {
                StoreError::Connection("transaction manager is broken".to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

/// Objects whose absence Postgres reports under SQLSTATE class 42 (a bad
/// statement), as opposed to e.g. `prepared statement "x" does not exist`.
const UNDEFINED_OBJECT_PREFIXES: &[&str] =
    &["relation ", "column ", "function ", "type ", "schema ", "operator "];

/// Postgres reports grammar problems with these phrasings; diesel does not
/// surface the SQLSTATE itself.
fn is_grammar_error(message: &str) -> bool {
    if message.starts_with("syntax error") {
        return true;
    }

    message.contains("does not exist")
        && UNDEFINED_OBJECT_PREFIXES
            .iter()
            .any(|prefix| message.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::DatabaseErrorInformation;

    struct Info(&'static str);

    impl DatabaseErrorInformation for Info {
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

    fn db_error(kind: DatabaseErrorKind, message: &'static str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info(message)))
    }

    #[test]
    fn test_foreign_key_violation_is_integrity() {
        let err = StoreError::from(db_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "insert or update on table \"recipes\" violates foreign key constraint",
        ));
        assert!(matches!(err, StoreError::Integrity(_)));
    }

    #[test]
    fn test_closed_connection_is_connection() {
        let err = StoreError::from(db_error(
            DatabaseErrorKind::ClosedConnection,
            "server closed the connection unexpectedly",
        ));
        assert!(matches!(err, StoreError::Connection(_)));
    }

    #[test]
    fn test_grammar_errors_are_syntax() {
        let err = StoreError::from(db_error(
            DatabaseErrorKind::Unknown,
            "syntax error at or near \"FORM\"",
        ));
        assert!(matches!(err, StoreError::Syntax(_)));

        let err = StoreError::from(db_error(
            DatabaseErrorKind::Unknown,
            "column \"recipe_img\" does not exist",
        ));
        assert!(matches!(err, StoreError::Syntax(_)));
    }

    #[test]
    fn test_missing_non_schema_objects_are_query() {
        let err = StoreError::from(db_error(
            DatabaseErrorKind::Unknown,
            "prepared statement \"__diesel_stmt_3\" does not exist",
        ));
        assert!(matches!(err, StoreError::Query(_)), "got {err:?}");

        let err = StoreError::from(db_error(
            DatabaseErrorKind::Unknown,
            "function lower_case(text) does not exist",
        ));
        assert!(matches!(err, StoreError::Syntax(_)), "got {err:?}");
    }

    #[test]
    fn test_other_database_errors_are_query() {
        let err = StoreError::from(db_error(
            DatabaseErrorKind::SerializationFailure,
            "could not serialize access",
        ));
        assert_eq!(
            err,
            StoreError::Query("could not serialize access".to_string())
        );
    }

    #[test]
    fn test_not_found_is_not_translated_to_not_found_kind() {
        // Absence on reads is an Option, never an error kind.
        let err = StoreError::from(DieselError::NotFound);
        assert!(matches!(err, StoreError::Query(_)));
    }
}
