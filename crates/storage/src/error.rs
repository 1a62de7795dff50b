//! Typed error enum for the schema initializer.
//!
//! Only two failure modes are classified — insufficient privilege and a
//! server without pgvector. Everything else passes through as the driver's
//! native error, wrapped but not translated.

use thiserror::Error;

/// SQLSTATE: insufficient_privilege.
const SQLSTATE_INSUFFICIENT_PRIVILEGE: &str = "42501";

/// SQLSTATE: feature_not_supported. Raised by newer PostgreSQL versions
/// when `CREATE EXTENSION vector` finds no such extension.
const SQLSTATE_FEATURE_NOT_SUPPORTED: &str = "0A000";

/// SQLSTATE: undefined_file. Raised by older PostgreSQL versions when the
/// extension control file for pgvector is not installed.
const SQLSTATE_UNDEFINED_FILE: &str = "58P01";

/// Initializer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum InitError {
    /// Role lacks the privilege to create the extension or table.
    #[error("insufficient privilege: {0}")]
    Privilege(String),

    /// Server does not support the pgvector extension.
    #[error("vector extension unavailable: {0}")]
    UnsupportedFeature(String),

    /// Any other SQL / connection failure, verbatim from the driver.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl InitError {
    /// Classify a SQLSTATE code into one of the fatal taxonomy variants.
    /// Returns `None` for codes that should pass through unclassified.
    pub(crate) fn from_sqlstate(code: &str, message: &str) -> Option<Self> {
        match code {
            SQLSTATE_INSUFFICIENT_PRIVILEGE => Some(Self::Privilege(message.to_owned())),
            SQLSTATE_FEATURE_NOT_SUPPORTED | SQLSTATE_UNDEFINED_FILE => {
                Some(Self::UnsupportedFeature(message.to_owned()))
            },
            _ => None,
        }
    }

    /// Whether this error is a privilege failure.
    pub fn is_privilege(&self) -> bool {
        matches!(self, Self::Privilege(_))
    }

    /// Whether this error means the server lacks pgvector.
    pub fn is_unsupported_feature(&self) -> bool {
        matches!(self, Self::UnsupportedFeature(_))
    }
}

/// Custom `From<sqlx::Error>` — NOT blanket `#[from]`.
///
/// - SQLSTATE 42501 → `Privilege`
/// - SQLSTATE 0A000 / 58P01 → `UnsupportedFeature`
/// - Everything else → `Database`
impl From<sqlx::Error> for InitError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(code) = db_err.code() {
                if let Some(classified) = Self::from_sqlstate(code.as_ref(), db_err.message()) {
                    return classified;
                }
            }
        }
        Self::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privilege_sqlstate_classified() {
        let err = InitError::from_sqlstate("42501", "permission denied to create extension")
            .expect("42501 must classify");
        assert!(err.is_privilege());
        assert!(!err.is_unsupported_feature());
    }

    #[test]
    fn missing_extension_sqlstates_classified() {
        for code in ["0A000", "58P01"] {
            let err = InitError::from_sqlstate(code, "extension \"vector\" is not available")
                .expect("missing-extension code must classify");
            assert!(err.is_unsupported_feature(), "code {code}");
        }
    }

    #[test]
    fn unrelated_sqlstate_passes_through() {
        assert!(InitError::from_sqlstate("23505", "duplicate key").is_none());
        assert!(InitError::from_sqlstate("42P01", "relation does not exist").is_none());
    }

    #[test]
    fn non_database_errors_wrap_verbatim() {
        let err: InitError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, InitError::Database(sqlx::Error::PoolTimedOut)));
    }
}
