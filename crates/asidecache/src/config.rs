use std::{env, str::FromStr, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache TTL in seconds, 0 disables expiry (default: 300)
    pub cache_ttl_seconds: u64,
    /// Maximum number of keys in the memory store (default: 10,000)
    pub cache_max_entries: usize,
    /// Path to SQLite database file (default: "asidecache.db")
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    pub redis_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 300)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries, must be positive (default: 10,000)
    /// - `SQLITE_PATH` - SQLite database path (default: "asidecache.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    pub fn from_env() -> Self {
        Self {
            cache_ttl_seconds: parsed_var("CACHE_TTL_SECONDS").unwrap_or(300),
            cache_max_entries: parsed_var::<usize>("CACHE_MAX_ENTRIES")
                .filter(|&n| n > 0)
                .unwrap_or(10_000),
            sqlite_path: string_var("SQLITE_PATH", "asidecache.db"),
            redis_url: string_var("REDIS_URL", "redis://localhost:6379"),
        }
    }

    /// Replaces the database path, e.g. from a command-line flag.
    pub fn with_sqlite_path(mut self, path: Option<String>) -> Self {
        if let Some(path) = path {
            self.sqlite_path = path;
        }
        self
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

/// Reads and parses `name`. Unset or unparsable values yield `None`.
fn parsed_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn string_var(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            cache_ttl_seconds: 600,
            cache_max_entries: 50,
            sqlite_path: "test.db".to_string(),
            redis_url: "redis://cache:6379".to_string(),
        }
    }

    #[test]
    fn test_cache_ttl_conversion() {
        assert_eq!(sample().cache_ttl(), Duration::from_secs(600));
    }

    #[test]
    fn test_sqlite_path_override() {
        let kept = sample().with_sqlite_path(None);
        let replaced = sample().with_sqlite_path(Some("other.db".to_string()));

        assert_eq!(kept.sqlite_path, "test.db");
        assert_eq!(replaced.sqlite_path, "other.db");
    }

    // Both cases live in one test because they share process environment.
    #[test]
    fn test_env_values() {
        env::remove_var("CACHE_TTL_SECONDS");
        env::remove_var("CACHE_MAX_ENTRIES");
        env::remove_var("SQLITE_PATH");
        env::remove_var("REDIS_URL");

        let config = Config::from_env();

        assert_eq!(config.cache_ttl_seconds, 300);
        assert_eq!(config.cache_max_entries, 10_000);
        assert_eq!(config.sqlite_path, "asidecache.db");
        assert_eq!(config.redis_url, "redis://localhost:6379");

        env::set_var("CACHE_TTL_SECONDS", " 45 ");
        env::set_var("CACHE_MAX_ENTRIES", "0");

        let config = Config::from_env();

        assert_eq!(config.cache_ttl(), Duration::from_secs(45));
        assert_eq!(config.cache_max_entries, 10_000);

        env::remove_var("CACHE_TTL_SECONDS");
        env::remove_var("CACHE_MAX_ENTRIES");
    }
}
