//! SQLite tools: execute a statement, inspect a database.
//!
//! Relative database paths resolve against the configured base directory.
//! A missing database file is a handler error; these tools never create the
//! file implicitly.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use serde_json::json;

use crate::tools::{ParamSchema, Tool, ToolArgs, ToolContext, ToolSchema};

const DEFAULT_DATABASE: &str = "data.db";
const MAX_ROWS: usize = 1000;

fn resolve_db_path(ctx: &ToolContext, raw: &str) -> PathBuf {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        path
    } else {
        ctx.config.base_dir.join(path)
    }
}

fn open_existing(path: &Path, flags: OpenFlags) -> Result<Connection> {
    if !path.exists() {
        bail!("database file not found: {}", path.display());
    }
    Connection::open_with_flags(path, flags | OpenFlags::SQLITE_OPEN_NO_MUTEX)
        .with_context(|| format!("opening database: {}", path.display()))
}

/// Convert JSON parameter values to SQLite values.
fn bind_values(params: &[serde_json::Value]) -> Vec<rusqlite::types::Value> {
    params
        .iter()
        .map(|v| match v {
            serde_json::Value::Null => rusqlite::types::Value::Null,
            serde_json::Value::Bool(b) => rusqlite::types::Value::Integer(*b as i64),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    rusqlite::types::Value::Integer(i)
                } else {
                    rusqlite::types::Value::Real(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => rusqlite::types::Value::Text(s.clone()),
            // Arrays/objects bind as their JSON text.
            other => rusqlite::types::Value::Text(other.to_string()),
        })
        .collect()
}

/// True for statements that return rows.
fn returns_rows(query: &str) -> bool {
    let first = query
        .trim_start()
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_uppercase();
    matches!(first.as_str(), "SELECT" | "PRAGMA" | "EXPLAIN" | "WITH")
}

fn format_cell(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<blob {} bytes>", b.len()),
    }
}

/// sqlite_execute: run one SQL statement and format the result.
pub struct SqliteExecute;

#[async_trait]
impl Tool for SqliteExecute {
    fn name(&self) -> &str {
        "sqlite_execute"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("sqlite_execute", "Execute a SQLite statement and return results")
            .param(ParamSchema::optional(
                "database",
                "string",
                json!(DEFAULT_DATABASE),
                "Path to the SQLite database file (relative to the base directory)",
            ))
            .param(ParamSchema::required("query", "string", "SQL to execute"))
            .param(ParamSchema::optional(
                "params",
                "array",
                json!(null),
                "Positional parameters for ?-placeholders",
            ))
            .param(ParamSchema::optional(
                "fetch_results",
                "bool",
                json!(true),
                "Fetch and return rows (set false for writes)",
            ))
    }

    async fn execute(&self, args: ToolArgs, ctx: &ToolContext) -> Result<String> {
        let database = args
            .get_string("database")
            .unwrap_or_else(|| DEFAULT_DATABASE.into());
        let query = args.get_string("query").context("query is required")?;
        let bind = bind_values(args.get_array("params").map(Vec::as_slice).unwrap_or(&[]));
        let fetch_results = args.get_bool("fetch_results").unwrap_or(true);

        let path = resolve_db_path(ctx, &database);
        let conn = open_existing(&path, OpenFlags::SQLITE_OPEN_READ_WRITE)?;

        if fetch_results && returns_rows(&query) {
            let mut stmt = conn
                .prepare(&query)
                .with_context(|| format!("preparing query against {}", path.display()))?;
            let columns: Vec<String> =
                stmt.column_names().iter().map(|c| c.to_string()).collect();

            let mut rows = stmt
                .query(params_from_iter(bind))
                .with_context(|| format!("executing query against {}", path.display()))?;

            let mut formatted: Vec<String> = Vec::new();
            let mut truncated = false;
            while let Some(row) = rows.next().context("reading result row")? {
                if formatted.len() == MAX_ROWS {
                    truncated = true;
                    break;
                }
                let cells: Vec<String> = (0..columns.len())
                    .map(|i| row.get_ref(i).map(format_cell))
                    .collect::<Result<_, _>>()
                    .context("reading result row")?;
                formatted.push(cells.join(" | "));
            }

            if formatted.is_empty() {
                return Ok(format!(
                    "Query executed successfully. No rows returned.\nDatabase: {}",
                    path.display()
                ));
            }

            let header = columns.join(" | ");
            let mut lines = vec![
                format!("Database: {}", path.display()),
                format!("Rows returned: {}", formatted.len()),
                String::new(),
                header.clone(),
                "-".repeat(header.len()),
            ];
            lines.extend(formatted);
            if truncated {
                lines.push(String::new());
                lines.push(format!(
                    "Note: results limited to {MAX_ROWS} rows. Use LIMIT/OFFSET for pagination."
                ));
            }
            Ok(lines.join("\n"))
        } else {
            let affected = conn
                .execute(&query, params_from_iter(bind))
                .with_context(|| format!("executing statement against {}", path.display()))?;

            let mut lines = vec![
                "Query executed successfully.".to_string(),
                format!("Database: {}", path.display()),
                format!("Rows affected: {affected}"),
            ];
            if query.trim_start().to_ascii_uppercase().starts_with("INSERT") {
                lines.push(format!("Last inserted row ID: {}", conn.last_insert_rowid()));
            }
            Ok(lines.join("\n"))
        }
    }
}

/// sqlite_info: tables, columns, row counts, and indexes.
pub struct SqliteInfo;

#[async_trait]
impl Tool for SqliteInfo {
    fn name(&self) -> &str {
        "sqlite_info"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("sqlite_info", "Describe a SQLite database's structure").param(
            ParamSchema::optional(
                "database",
                "string",
                json!(DEFAULT_DATABASE),
                "Path to the SQLite database file (relative to the base directory)",
            ),
        )
    }

    async fn execute(&self, args: ToolArgs, ctx: &ToolContext) -> Result<String> {
        let database = args
            .get_string("database")
            .unwrap_or_else(|| DEFAULT_DATABASE.into());
        let path = resolve_db_path(ctx, &database);
        let conn = open_existing(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

        let size_kb = std::fs::metadata(&path)
            .map(|m| m.len() as f64 / 1024.0)
            .unwrap_or(0.0);

        let mut lines = vec![
            format!("Database: {}", path.display()),
            format!("File size: {size_kb:.2} KB"),
            String::new(),
        ];

        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .context("listing tables")?;
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .context("listing tables")?
            .collect::<Result<_, _>>()
            .context("listing tables")?;

        if tables.is_empty() {
            lines.push("No tables found in database.".to_string());
            return Ok(lines.join("\n"));
        }

        lines.push(format!("Tables ({}):", tables.len()));
        lines.push("=".repeat(50));

        for table in &tables {
            lines.push(String::new());
            lines.push(format!("Table: {table}"));
            lines.push("-".repeat(7 + table.len()));

            lines.push("Columns:".to_string());
            let mut info = conn
                .prepare(&format!("PRAGMA table_info(\"{table}\")"))
                .with_context(|| format!("describing table {table}"))?;
            let mut rows = info
                .query([])
                .with_context(|| format!("describing table {table}"))?;
            while let Some(row) = rows.next().context("reading column info")? {
                let name: String = row.get(1).context("column name")?;
                let col_type: String = row.get(2).context("column type")?;
                let notnull: bool = row.get(3).context("column notnull")?;
                let default: Option<String> = row.get(4).context("column default")?;
                let pk: bool = row.get::<_, i64>(5).map(|v| v != 0).context("column pk")?;

                let mut line = format!("  {name}: {col_type}");
                if pk {
                    line.push_str(" (PK)");
                }
                if notnull {
                    line.push_str(" NOT NULL");
                }
                if let Some(default) = default {
                    line.push_str(&format!(" DEFAULT {default}"));
                }
                lines.push(line);
            }

            let count: i64 = conn
                .query_row(&format!("SELECT COUNT(*) FROM \"{table}\""), [], |row| {
                    row.get(0)
                })
                .with_context(|| format!("counting rows in {table}"))?;
            lines.push(format!("Rows: {count}"));

            let mut idx = conn
                .prepare(&format!("PRAGMA index_list(\"{table}\")"))
                .with_context(|| format!("listing indexes on {table}"))?;
            let indexes: Vec<(String, bool)> = idx
                .query_map([], |row| {
                    Ok((row.get::<_, String>(1)?, row.get::<_, i64>(2)? != 0))
                })
                .with_context(|| format!("listing indexes on {table}"))?
                .collect::<Result<_, _>>()
                .with_context(|| format!("listing indexes on {table}"))?;
            if !indexes.is_empty() {
                lines.push("Indexes:".to_string());
                for (name, unique) in indexes {
                    let kind = if unique { "UNIQUE" } else { "NON-UNIQUE" };
                    lines.push(format!("  {name} ({kind})"));
                }
            }
        }

        Ok(lines.join("\n"))
    }
}
