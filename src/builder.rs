use regex::Regex;
use std::fmt;

use crate::value::{BindValue, Params, Value};
use crate::{Error, Result};

/// Quoted literals, quoted identifiers and comments are matched first so that
/// anything inside them is copied through untouched.
const TOKENS: &str = concat!(
    r"'(?:[^']|'')*'",
    r#"|"(?:[^"]|"")*""#,
    r"|--[^\n]*",
    r"|/\*(?s:.)*?\*/",
    r"|(?P<prefix>[:\\]?):(?P<name>[A-Za-z]\w*)",
    r"|(?P<positional>\?)",
);

/// A sanitized SQL statement: positional placeholders plus their bind values.
///
/// Parameter values never appear in [`Statement::sql`]; they travel
/// separately in [`Statement::binds`] and are handed to the driver as bound
/// arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    binds: Vec<BindValue>,
}

impl Statement {
    /// SQL text with `?` placeholders.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Values for the placeholders, in order.
    pub fn binds(&self) -> &[BindValue] {
        &self.binds
    }

    /// Splits the statement into its SQL text and bind values.
    pub fn into_parts(self) -> (String, Vec<BindValue>) {
        (self.sql, self.binds)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Merges named parameters into a SQL template.
///
/// Every `:name` placeholder becomes a positional `?` and its value is
/// appended to the bind list. Lists expand to one placeholder per element
/// (`IN (:ids)` becomes `IN (?, ?, ?)`), and an empty list renders `NULL`.
/// `::type` casts and escaped `\:name` sequences are left as SQL text.
///
/// # Errors
///
/// - [`Error::UnboundPlaceholder`] if a placeholder has no value in `params`
/// - [`Error::PositionalPlaceholder`] if the template contains a bare `?`
/// - [`Error::Parse`] if the placeholder pattern cannot be compiled
///
/// # Examples
///
/// ```
/// use sqlx_query_object::builder::sanitize;
/// use sqlx_query_object::{params, BindValue};
///
/// let statement = sanitize(
///     "SELECT * FROM posts WHERE title = :title AND id IN (:ids)",
///     &params! { "title" => "Test", "ids" => vec![1, 2] },
/// )?;
/// assert_eq!(statement.sql(), "SELECT * FROM posts WHERE title = ? AND id IN (?, ?)");
/// assert_eq!(statement.binds()[0], BindValue::Text("Test".into()));
/// # Ok::<(), sqlx_query_object::Error>(())
/// ```
pub fn sanitize(template: &str, params: &Params) -> Result<Statement> {
    let regex = Regex::new(TOKENS)?;
    let mut sql = String::with_capacity(template.len());
    let mut binds = Vec::new();
    let mut last = 0;

    for caps in regex.captures_iter(template) {
        let Some(token) = caps.get(0) else { continue };
        sql.push_str(&template[last..token.start()]);
        last = token.end();

        if let Some(name) = caps.name("name") {
            match caps.name("prefix").map(|m| m.as_str()) {
                Some(":") => sql.push_str(token.as_str()),
                Some("\\") => sql.push_str(&token.as_str()[1..]),
                _ => {
                    let value = params
                        .get(name.as_str())
                        .ok_or_else(|| Error::UnboundPlaceholder(name.as_str().to_owned()))?;
                    push_value(&mut sql, &mut binds, value);
                }
            }
        } else if caps.name("positional").is_some() {
            return Err(Error::PositionalPlaceholder {
                offset: token.start(),
            });
        } else {
            sql.push_str(token.as_str());
        }
    }
    sql.push_str(&template[last..]);

    Ok(Statement { sql, binds })
}

fn push_value(sql: &mut String, binds: &mut Vec<BindValue>, value: &Value) {
    let bind = match value {
        Value::Null => BindValue::Null,
        Value::Bool(v) => BindValue::Bool(*v),
        Value::Int(v) => BindValue::Int(*v),
        Value::Float(v) => BindValue::Float(*v),
        Value::Text(v) => BindValue::Text(v.clone()),
        Value::List(items) if items.is_empty() => {
            sql.push_str("NULL");
            return;
        }
        Value::List(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                if let Value::List(_) = item {
                    sql.push('(');
                    push_value(sql, binds, item);
                    sql.push(')');
                } else {
                    push_value(sql, binds, item);
                }
            }
            return;
        }
    };
    sql.push('?');
    binds.push(bind);
}
