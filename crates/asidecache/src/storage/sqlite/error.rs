//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `FetchError` from
//! `asidecache_core::storage`.

use asidecache_core::storage::FetchError;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
pub fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Maps a rusqlite error to a FetchError.
///
/// # Error Mapping
///
/// - Cannot open the database file → `FetchError::ConnectionFailed`
/// - Column type or conversion failures → `FetchError::InvalidData`
/// - All other errors → `FetchError::QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error) -> FetchError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            FetchError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => FetchError::InvalidData(err.to_string()),

        _ => FetchError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a FetchError.
///
/// This is the main entry point for error mapping in async code.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error) -> FetchError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err),
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            FetchError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => FetchError::QueryFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cannot_open_maps_to_connection_failed() {
        let sqlite_err = rusqlite::ffi::Error {
            code: rusqlite::ErrorCode::CannotOpen,
            extended_code: rusqlite::ffi::SQLITE_CANTOPEN,
        };
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, None));

        assert!(matches!(
            map_tokio_rusqlite_error(err),
            FetchError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_invalid_column_type_maps_to_invalid_data() {
        let rusqlite_err = rusqlite::Error::InvalidColumnType(
            1,
            "name".to_string(),
            rusqlite::types::Type::Integer,
        );
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite_err);

        assert!(matches!(
            map_tokio_rusqlite_error(err),
            FetchError::InvalidData(_)
        ));
    }

    #[test]
    fn test_connection_closed_maps_to_connection_failed() {
        assert!(matches!(
            map_tokio_rusqlite_error(tokio_rusqlite::Error::ConnectionClosed),
            FetchError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_other_error_maps_to_query_failed() {
        let err = tokio_rusqlite::Error::Other(Box::new(std::io::Error::other("test error")));

        assert!(matches!(
            map_tokio_rusqlite_error(err),
            FetchError::QueryFailed(_)
        ));
    }
}
