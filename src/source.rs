//! Resolution of the SQL file a query reads its template from.
//!
//! Priority, highest first:
//!
//! 1. a `sql_file` passed to the query at construction or call time
//! 2. the query type's `SQL_FILE` constant
//! 3. `<sql root>/<underscored query name>.sql`

use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Where a resolved SQL path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOrigin {
    Override,
    Constant,
    Convention,
}

impl SourceOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceOrigin::Override => "override",
            SourceOrigin::Constant => "constant",
            SourceOrigin::Convention => "convention",
        }
    }
}

/// The SQL file selected for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlSource {
    query: String,
    root: PathBuf,
    path: PathBuf,
    origin: SourceOrigin,
}

impl SqlSource {
    /// Picks the SQL file for `query`.
    ///
    /// Failing to build the conventional file name (an invalid name pattern)
    /// is reported as [`Error::Parse`]; no filesystem access happens here.
    pub fn resolve(
        query: &str,
        root: &Path,
        sql_file: Option<&Path>,
        constant: Option<&str>,
    ) -> Result<Self> {
        let (path, origin) = match (sql_file, constant) {
            (Some(path), _) => (path.to_path_buf(), SourceOrigin::Override),
            (None, Some(path)) => (PathBuf::from(path), SourceOrigin::Constant),
            (None, None) => (
                root.join(format!("{}.sql", underscore(query)?)),
                SourceOrigin::Convention,
            ),
        };
        Ok(Self {
            query: query.to_owned(),
            root: root.to_path_buf(),
            path,
            origin,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn origin(&self) -> SourceOrigin {
        self.origin
    }

    /// Reads the SQL template.
    ///
    /// # Errors
    ///
    /// [`Error::MissingSqlSource`] when the file does not exist, [`Error::Io`]
    /// for any other read failure.
    pub fn read(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => Error::MissingSqlSource {
                query: self.query.clone(),
                root: self.root.clone(),
                path: self.path.clone(),
            },
            _ => Error::Io {
                path: self.path.clone(),
                source,
            },
        })
    }
}

/// Converts a type name to its lowercase, underscore-separated file stem.
///
/// Module separators become directories, so `Admin::Reports` maps to
/// `admin/reports`.
///
/// ```
/// use sqlx_query_object::source::underscore;
///
/// assert_eq!(underscore("WithoutSqlFile")?, "without_sql_file");
/// assert_eq!(underscore("HTMLParser")?, "html_parser");
/// assert_eq!(underscore("Admin::Reports")?, "admin/reports");
/// # Ok::<(), sqlx_query_object::Error>(())
/// ```
pub fn underscore(name: &str) -> Result<String> {
    let acronym = Regex::new(r"([A-Z\d]+)([A-Z][a-z])")?;
    let word = Regex::new(r"([a-z\d])([A-Z])")?;

    let name = name.replace("::", "/");
    let name = acronym.replace_all(&name, "${1}_${2}");
    let name = word.replace_all(&name, "${1}_${2}");
    Ok(name.replace('-', "_").to_lowercase())
}
