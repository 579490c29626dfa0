use sea_orm::{DbErr, RuntimeErr};
use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not Found")]
    NotFound,

    #[error("Unique constraint violated: {0}")]
    UniqueConstraintViolation(String),

    #[error("Range constraint violated on {field}: {detail}")]
    RangeConstraintViolation { field: String, detail: String },

    #[error("Not null constraint violated: {0}")]
    NotNullViolation(String),

    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Schema conflict: {0}")]
    SchemaConflict(String),

    #[error("Password hashing failed: {0}")]
    Password(String),

    #[error("ORM error: {0}")]
    OrmError(DbErr),
}

impl StoreError {
    pub fn range(field: impl Into<String>, detail: impl Into<String>) -> Self {
        StoreError::RangeConstraintViolation {
            field: field.into(),
            detail: detail.into(),
        }
    }

    /// Carries a validation failure out of an `ActiveModelBehavior` hook,
    /// which can only return `DbErr`. `From<DbErr>` turns it back.
    pub fn into_db_err(self) -> DbErr {
        match self {
            StoreError::OrmError(err) => err,
            other => DbErr::Custom(other.to_string()),
        }
    }
}

const RANGE_PREFIX: &str = "Range constraint violated on ";

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::Migration(message) => return StoreError::SchemaConflict(message.clone()),
            DbErr::Custom(message) => {
                if let Some((field, detail)) = message
                    .strip_prefix(RANGE_PREFIX)
                    .and_then(|rest| rest.split_once(": "))
                {
                    return StoreError::range(field, detail);
                }
            }
            _ => {}
        }

        let (kind, message) = match database_error(&err) {
            Some(found) => found,
            None => return StoreError::OrmError(err),
        };

        match kind {
            ErrorKind::UniqueViolation => StoreError::UniqueConstraintViolation(message),
            ErrorKind::NotNullViolation => StoreError::NotNullViolation(message),
            ErrorKind::ForeignKeyViolation => StoreError::ForeignKeyViolation(message),
            // CHECK constraints in this schema are all range checks.
            ErrorKind::CheckViolation => StoreError::RangeConstraintViolation {
                field: checked_field(&message),
                detail: message,
            },
            _ => StoreError::OrmError(err),
        }
    }
}

/// Digs the driver-level database error out of a sea-orm error.
fn database_error(err: &DbErr) -> Option<(ErrorKind, String)> {
    let runtime = match err {
        DbErr::Exec(runtime) | DbErr::Query(runtime) | DbErr::Conn(runtime) => runtime,
        _ => return None,
    };
    match runtime {
        RuntimeErr::SqlxError(sqlx::Error::Database(db_err)) => {
            Some((db_err.kind(), db_err.message().to_owned()))
        }
        _ => None,
    }
}

// SQLite reports "CHECK constraint failed: <expr>"; Postgres names the constraint.
fn checked_field(message: &str) -> String {
    message
        .rsplit(':')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

pub type StoreResult<T> = Result<T, StoreError>;
