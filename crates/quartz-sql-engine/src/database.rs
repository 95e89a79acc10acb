//! The named-table catalog and the plan dispatcher.

use std::collections::HashMap;

use quartz_sql_core::{ColumnDef, ColumnType, Plan, SelectQuery};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::row::Row;
use crate::table::Table;
use crate::value::Value;

/// The catalog of named tables, mutated exclusively by [`Database::execute`].
///
/// Every mutation happens as the last step of a successful statement, so
/// a failed statement leaves the catalog exactly as it found it.
#[derive(Debug, Default)]
pub struct Database {
    tables: HashMap<String, Table>,
}

impl Database {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the tables currently in the catalog (unordered).
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Executes one plan. PRINT and SELECT produce a table, the other
    /// statements produce nothing.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] naming the failing table, column, or
    /// value; the catalog is unchanged on error.
    pub fn execute(&mut self, plan: Plan) -> Result<Option<Table>> {
        match plan {
            Plan::CreateTable { table, columns } => {
                self.create_table(&table, &columns)?;
                Ok(None)
            }
            Plan::CreateTableAs { table, query } => {
                self.create_table_as(&table, &query)?;
                Ok(None)
            }
            Plan::DropTable { table } => {
                self.drop_table(&table)?;
                Ok(None)
            }
            Plan::PrintTable { table } => Ok(Some(self.print_table(&table)?)),
            Plan::InsertInto { table, values } => {
                self.insert_into(&table, &values)?;
                Ok(None)
            }
            Plan::Select(query) => Ok(Some(self.select(&query)?)),
        }
    }

    fn create_table(&mut self, name: &str, columns: &[ColumnDef]) -> Result<()> {
        if self.tables.contains_key(name) {
            return Err(EngineError::DuplicateTable(String::from(name)));
        }

        let mut column_names: Vec<String> = Vec::with_capacity(columns.len());
        let mut column_types: Vec<ColumnType> = Vec::with_capacity(columns.len());
        for def in columns {
            if column_names.contains(&def.name) {
                return Err(EngineError::DuplicateColumn(def.name.clone()));
            }
            column_names.push(def.name.clone());
            column_types.push(def.column_type);
        }

        debug!("created table {name} with {} columns", columns.len());
        self.tables
            .insert(String::from(name), Table::new(column_names, column_types));
        Ok(())
    }

    fn create_table_as(&mut self, name: &str, query: &SelectQuery) -> Result<()> {
        if self.tables.contains_key(name) {
            return Err(EngineError::DuplicateTable(String::from(name)));
        }
        let result = self.select(query)?;
        debug!("created table {name} from a select over {:?}", query.tables);
        self.tables.insert(String::from(name), result);
        Ok(())
    }

    fn drop_table(&mut self, name: &str) -> Result<()> {
        if self.tables.remove(name).is_none() {
            return Err(EngineError::UnknownTable(String::from(name)));
        }
        debug!("dropped table {name}");
        Ok(())
    }

    fn print_table(&self, name: &str) -> Result<Table> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::UnknownTable(String::from(name)))
    }

    fn insert_into(&mut self, name: &str, values: &[String]) -> Result<()> {
        let table = self
            .tables
            .get_mut(name)
            .ok_or_else(|| EngineError::UnknownTable(String::from(name)))?;

        let column_types: Vec<ColumnType> = table.column_types().to_vec();
        if values.len() > column_types.len() {
            return Err(EngineError::TooManyValues);
        }
        if values.len() < column_types.len() {
            return Err(EngineError::TooFewValues);
        }

        let mut parsed = Vec::with_capacity(values.len());
        for (position, (lexeme, column_type)) in values.iter().zip(column_types).enumerate() {
            let value =
                Value::parse(lexeme, column_type).ok_or(EngineError::ValueType {
                    position,
                    expected: column_type,
                })?;
            parsed.push(value);
        }

        debug!("inserted a row into {name}");
        table.insert_row(Row::new(parsed));
        Ok(())
    }

    /// Runs a SELECT: resolve the scope, expand `*`, bind the requested
    /// names, join, filter, project, and restore the requested order.
    fn select(&self, query: &SelectQuery) -> Result<Table> {
        let mut scope: Vec<&Table> = Vec::with_capacity(query.tables.len());
        for name in &query.tables {
            let table = self
                .tables
                .get(name)
                .ok_or_else(|| EngineError::UnknownTable(name.clone()))?;
            scope.push(table);
        }

        // An empty columns list is `*`: every scoped column, in order.
        let requested: Vec<String> = if query.columns.is_empty() {
            scope
                .iter()
                .flat_map(|table| table.column_names().iter().cloned())
                .collect()
        } else {
            query.columns.clone()
        };

        // Each requested name binds to the first scoped table providing
        // it; its requested position drives the final reorder.
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(requested.len());
        for (position, name) in requested.iter().enumerate() {
            if positions.contains_key(name) {
                return Err(EngineError::DuplicateQueryColumn(name.clone()));
            }
            if !scope.iter().any(|table| table.index_of(name).is_some()) {
                return Err(EngineError::UnknownColumn(name.clone()));
            }
            positions.insert(name.clone(), position);
        }

        let product = Table::cartesian_product(&scope);
        let filtered = product.filter(&query.condition)?;

        // Extraction leaves the columns in ascending join order; the
        // reorder puts them back into the requested order.
        let extracted = filtered.extract_columns_by_name(&requested)?;
        let order = extracted
            .column_names()
            .iter()
            .map(|name| {
                positions
                    .get(name)
                    .copied()
                    .ok_or_else(|| EngineError::UnknownColumn(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        extracted.reorder_columns(&order)
    }
}
