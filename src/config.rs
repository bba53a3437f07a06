use std::path::{Path, PathBuf};

/// SQL root used when nothing else is configured, relative to the application root.
pub const DEFAULT_SQL_ROOT: &str = "app/queries/sql";

/// Environment variable that overrides the SQL root in [`Config::from_env`].
pub const SQL_ROOT_ENV: &str = "QUERY_OBJECT_SQL_ROOT";

/// Settings shared by every query invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    sql_root: PathBuf,
}

impl Config {
    pub fn new(sql_root: impl Into<PathBuf>) -> Self {
        Self {
            sql_root: sql_root.into(),
        }
    }

    /// Uses `<app_root>/app/queries/sql` as the SQL root.
    pub fn for_app(app_root: impl AsRef<Path>) -> Self {
        Self::new(app_root.as_ref().join(DEFAULT_SQL_ROOT))
    }

    /// Reads the SQL root from `QUERY_OBJECT_SQL_ROOT`, falling back to the default.
    pub fn from_env() -> Self {
        match std::env::var_os(SQL_ROOT_ENV) {
            Some(root) if !root.is_empty() => Self::new(root),
            _ => Self::default(),
        }
    }

    /// Directory convention-resolved SQL files are looked up in.
    pub fn sql_root(&self) -> &Path {
        &self.sql_root
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_SQL_ROOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root() {
        assert_eq!(Config::default().sql_root(), Path::new("app/queries/sql"));
    }

    #[test]
    fn test_for_app() {
        let config = Config::for_app("/srv/blog");
        assert_eq!(config.sql_root(), Path::new("/srv/blog/app/queries/sql"));
    }

    #[test]
    fn test_from_env() {
        std::env::set_var(SQL_ROOT_ENV, "/etc/queries");
        assert_eq!(Config::from_env().sql_root(), Path::new("/etc/queries"));

        std::env::set_var(SQL_ROOT_ENV, "");
        assert_eq!(Config::from_env(), Config::default());

        std::env::remove_var(SQL_ROOT_ENV);
        assert_eq!(Config::from_env(), Config::default());
    }
}
