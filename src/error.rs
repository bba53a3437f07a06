use std::path::PathBuf;

/// Error types for sqlx-query-object
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The resolved SQL file does not exist
    #[error(
        "SQL file not found at folder ({}) for {} (query `{query}`)",
        .root.display(),
        .path.display()
    )]
    MissingSqlSource {
        /// Name of the query type that was being invoked
        query: String,
        /// Configured SQL root directory
        root: PathBuf,
        /// File that was attempted
        path: PathBuf,
    },

    /// The SQL file exists but could not be read
    #[error("Failed to read SQL file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error during SQL template parsing
    #[error("Failed to parse SQL template: {0}")]
    Parse(#[from] regex::Error),

    /// Placeholder was referenced in the template but has no value in the params
    #[error("Missing value for placeholder ':{0}'")]
    UnboundPlaceholder(String),

    /// A positional `?` placeholder was found in a named template
    #[error("Positional placeholder '?' at byte {offset} cannot be mixed with named parameters")]
    PositionalPlaceholder { offset: usize },

    /// Error from SQLx database operations
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Error {
    /// Returns `true` when the SQL source could not be found.
    pub fn is_missing_source(&self) -> bool {
        matches!(self, Error::MissingSqlSource { .. })
    }

    /// Returns `true` for failures raised while merging params into the template.
    pub fn is_sanitization(&self) -> bool {
        matches!(
            self,
            Error::Parse(_) | Error::UnboundPlaceholder(_) | Error::PositionalPlaceholder { .. }
        )
    }
}

/// Result type alias for sqlx-query-object operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_message_names_root_and_file() {
        let err = Error::MissingSqlSource {
            query: "WithoutSqlFile".into(),
            root: PathBuf::from("app/queries/sql"),
            path: PathBuf::from("app/queries/sql/without_sql_file.sql"),
        };
        let message = err.to_string();
        assert!(message.contains("(app/queries/sql)"));
        assert!(message.contains("without_sql_file.sql"));
        assert!(message.contains("WithoutSqlFile"));
        assert!(err.is_missing_source());
        assert!(!err.is_sanitization());
    }

    #[test]
    fn test_sanitization_classification() {
        assert!(Error::UnboundPlaceholder("id".into()).is_sanitization());
        assert!(Error::PositionalPlaceholder { offset: 3 }.is_sanitization());
        assert!(!Error::Database(sqlx::Error::RowNotFound).is_sanitization());
    }
}
