// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Check-in portal database connector and connection handling

use diesel::r2d2::ConnectionManager;
use diesel::result::Error;
use diesel::{r2d2, PgConnection};

mod db;

pub use db::Db;

/// Pooled connection alias
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

/// Result type using [`DatabaseError`] as a default Error
pub type Result<T, E = DatabaseError> = std::result::Result<T, E>;

/// Error types for the database abstraction
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Database Error: `{0}`")]
    Custom(String),
    #[error("Diesel Error: `{0}`")]
    DieselError(diesel::result::Error),
    #[error("A requested resource could not be found")]
    NotFound,
    // The R2D2 error mapping is only possible when using r2d2 directly as a dependency, hence the
    // generic R2D2 error handling. See https://github.com/diesel-rs/diesel/issues/2336
    #[error("The connection pool returned an Error: `{0}`")]
    R2D2Error(String),
}

impl DatabaseError {
    /// Returns true if the database could not be reached at all
    pub fn is_connection_error(&self) -> bool {
        match self {
            DatabaseError::R2D2Error(_) => true,
            DatabaseError::DieselError(Error::DatabaseError(
                diesel::result::DatabaseErrorKind::ClosedConnection
                | diesel::result::DatabaseErrorKind::UnableToSendCommand,
                _,
            )) => true,
            _ => false,
        }
    }
}

pub trait OptionalExt<T, E> {
    fn optional(self) -> Result<Option<T>, E>;
}

impl<T> OptionalExt<T, DatabaseError> for Result<T, DatabaseError> {
    fn optional(self) -> Result<Option<T>, DatabaseError> {
        match self {
            Ok(t) => Ok(Some(t)),
            Err(DatabaseError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl From<diesel::result::Error> for DatabaseError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            Error::NotFound => Self::NotFound,
            err => DatabaseError::DieselError(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn not_found_is_optional() {
        let result: Result<u32> = Err(diesel::result::Error::NotFound.into());

        assert!(matches!(result.optional(), Ok(None)));
    }

    #[test]
    fn pool_errors_are_connection_errors() {
        assert!(DatabaseError::R2D2Error("timed out".into()).is_connection_error());
        assert!(!DatabaseError::NotFound.is_connection_error());
        assert!(!DatabaseError::Custom("bad".into()).is_connection_error());
    }
}
