//! Redis error mapping to CacheError.

use asidecache_core::cache::CacheError;

/// Maps Redis errors to CacheError.
pub fn map_redis_error(err: redis::RedisError) -> CacheError {
    if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
        CacheError::ConnectionFailed(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}

/// Maps errors from a `MULTI`/`EXEC` pipeline. Any non-connection failure
/// fails the whole batch.
pub fn map_pipeline_error(err: redis::RedisError) -> CacheError {
    match map_redis_error(err) {
        CacheError::OperationFailed(msg) => CacheError::PipelineFailed(msg),
        other => other,
    }
}
