//! Connection-related data models.
//!
//! This module defines the backend type detected from a connection string and the
//! descriptor assembled from the `DB_*` environment variables.

use url::Url;

/// Supported database types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseType {
    PostgreSQL,
    /// File-backed; used for local runs and the test suite
    SQLite,
}

impl DatabaseType {
    /// Parse database type from a connection string.
    pub fn from_connection_string(connection_string: &str) -> Option<Self> {
        let lower = connection_string.to_lowercase();
        if lower.starts_with("postgres://") || lower.starts_with("postgresql://") {
            Some(Self::PostgreSQL)
        } else if lower.starts_with("sqlite://") || lower.starts_with("sqlite:") {
            Some(Self::SQLite)
        } else {
            None
        }
    }

    /// Get the display name for this database type.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PostgreSQL => "PostgreSQL",
            Self::SQLite => "SQLite",
        }
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Host, port, database name and credentials of the PostgreSQL server.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    /// Contains sensitive data - never log
    pub password: String,
}

impl ConnectionDescriptor {
    /// Build a `postgres://` URL with percent-encoded credentials.
    pub fn connection_string(&self) -> Result<String, String> {
        self.to_url(&self.password).map(|url| url.to_string())
    }

    /// Get a display-safe version of the connection string (password masked).
    pub fn masked_connection_string(&self) -> String {
        self.to_url("****")
            .map(|url| url.to_string())
            .unwrap_or_else(|_| format!("postgres://{}:****@{}", self.user, self.host))
    }

    fn to_url(&self, password: &str) -> Result<Url, String> {
        let mut url = Url::parse(&format!("postgres://{}:{}/", self.host, self.port))
            .map_err(|e| format!("Invalid database host '{}': {e}", self.host))?;

        url.set_username(&self.user)
            .map_err(|_| format!("Invalid database user '{}'", self.user))?;
        url.set_password(Some(password))
            .map_err(|_| "Invalid database password".to_string())?;
        url.path_segments_mut()
            .map_err(|_| "Connection URL cannot carry a database name".to_string())?
            .pop_if_empty()
            .push(&self.database);

        Ok(url)
    }
}

impl std::fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"****")
            .finish()
    }
}
