//! Direct SQLite record access for one registry entity.
//!
//! Every operation opens its own connection, runs its statement(s) and
//! drops the connection before returning. There is no pool and no
//! transaction held across requests; existence checks and mutations are
//! separate round trips, with SQLite's own locking guarding the file.

use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::error::Result;
use crate::schema::EntitySchema;

/// Record store accessor for a single entity table.
pub struct Store {
    path: PathBuf,
    schema: &'static EntitySchema,
}

impl Store {
    /// Create an accessor for the database file at `path`.
    ///
    /// Nothing is touched on disk until [`Store::init`] or an operation
    /// runs.
    pub fn open(path: impl Into<PathBuf>, schema: &'static EntitySchema) -> Self {
        Self { path: path.into(), schema }
    }

    /// Schema this store was opened with.
    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Ensure the storage directory and table exist. Idempotent; no
    /// migration logic for tables created with another shape.
    pub fn init(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = self.connect()?;
        conn.execute(&self.schema.create_table_sql(), [])?;
        Ok(())
    }

    /// List all records in store order.
    pub fn list(&self) -> Result<Vec<Value>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM {}",
            self.select_list(),
            self.schema.table
        ))?;

        let records = stmt
            .query_map([], |row| self.record_from_row(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Get a record by id.
    pub fn get(&self, id: i64) -> Result<Option<Value>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM {} WHERE id = ?1",
            self.select_list(),
            self.schema.table
        ))?;

        Ok(stmt
            .query_row(params![id], |row| self.record_from_row(row))
            .optional()?)
    }

    /// Check whether a record with this id exists.
    pub fn exists(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let found = conn
            .query_row(
                &format!("SELECT id FROM {} WHERE id = ?1", self.schema.table),
                params![id],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Insert a row (values in schema field order) and return the
    /// store-assigned id.
    pub fn insert(&self, row: &[Option<String>]) -> Result<i64> {
        let conn = self.connect()?;
        let columns: Vec<&str> = self.schema.fields.iter().map(|f| f.name).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();

        conn.execute(
            &format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.schema.table,
                columns.join(", "),
                placeholders.join(", ")
            ),
            params_from_iter(row.iter()),
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Apply a partial update to one record.
    ///
    /// Column names in the patch come from the schema's static allow-list;
    /// values are always bound parameters, never interpolated.
    pub fn update(&self, id: i64, patch: &[(&'static str, Option<String>)]) -> Result<()> {
        let conn = self.connect()?;
        let assignments: Vec<String> = patch
            .iter()
            .enumerate()
            .map(|(i, (name, _))| format!("{} = ?{}", name, i + 1))
            .collect();

        let mut values: Vec<SqlValue> = patch
            .iter()
            .map(|(_, value)| match value {
                Some(text) => SqlValue::Text(text.clone()),
                None => SqlValue::Null,
            })
            .collect();
        values.push(SqlValue::Integer(id));

        conn.execute(
            &format!(
                "UPDATE {} SET {} WHERE id = ?{}",
                self.schema.table,
                assignments.join(", "),
                patch.len() + 1
            ),
            params_from_iter(values),
        )?;

        Ok(())
    }

    /// Delete the record with this id.
    pub fn delete(&self, id: i64) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", self.schema.table),
            params![id],
        )?;
        Ok(())
    }

    fn select_list(&self) -> String {
        let mut columns = vec!["id"];
        columns.extend(self.schema.fields.iter().map(|f| f.name));
        columns.join(", ")
    }

    fn record_from_row(&self, row: &rusqlite::Row) -> rusqlite::Result<Value> {
        let mut record = Map::new();
        record.insert("id".to_string(), Value::from(row.get::<_, i64>(0)?));
        for (index, field) in self.schema.fields.iter().enumerate() {
            let value: Option<String> = row.get(index + 1)?;
            record.insert(
                field.name.to_string(),
                value.map_or(Value::Null, Value::String),
            );
        }
        Ok(Value::Object(record))
    }
}
