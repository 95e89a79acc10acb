//! Tables: a typed header plus an ordered row buffer.

use std::collections::HashMap;
use std::fmt;

use quartz_sql_core::{ColumnType, ConditionItem};

use crate::error::{EngineError, Result};
use crate::eval;
use crate::row::Row;

/// An in-memory table.
///
/// The header is a pair of equal-length vectors plus a derived
/// name-to-index map. Every row has the header's arity and every value's
/// tag matches its column type; both invariants are enforced by the
/// operations that build rows, so the accessors can stay infallible.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    column_names: Vec<String>,
    column_types: Vec<ColumnType>,
    name_to_index: HashMap<String, usize>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table with the given header.
    ///
    /// When a name repeats (possible in a raw join of tables that share
    /// column names) the map keeps the first occurrence, matching how
    /// SELECT binds a requested name to the first table providing it.
    #[must_use]
    pub fn new(column_names: Vec<String>, column_types: Vec<ColumnType>) -> Self {
        let mut name_to_index = HashMap::with_capacity(column_names.len());
        for (index, name) in column_names.iter().enumerate() {
            name_to_index.entry(name.clone()).or_insert(index);
        }
        Self {
            column_names,
            column_types,
            name_to_index,
            rows: Vec::new(),
        }
    }

    /// Column names, in order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Column types, in order.
    #[must_use]
    pub fn column_types(&self) -> &[ColumnType] {
        &self.column_types
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    /// The rows, in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Resolves a column name to its index.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Appends a row. The caller is responsible for arity and types;
    /// inside the engine every row comes from value parsing or from
    /// another table's rows.
    pub fn insert_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// The header line of the wire format: `name1 type1,name2 type2,…`.
    #[must_use]
    pub fn header_string(&self) -> String {
        self.column_names
            .iter()
            .zip(&self.column_types)
            .map(|(name, column_type)| format!("{name} {column_type}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Builds the cartesian product of the given tables.
    ///
    /// Columns are concatenated in table order; rows are emitted in
    /// lexicographic order with the first table outermost, so the product
    /// of row counts and the sum of column counts are preserved.
    #[must_use]
    pub fn cartesian_product(tables: &[&Self]) -> Self {
        let column_names = tables
            .iter()
            .flat_map(|table| table.column_names.iter().cloned())
            .collect();
        let column_types = tables
            .iter()
            .flat_map(|table| table.column_types.iter().copied())
            .collect();
        let mut product = Self::new(column_names, column_types);

        let mut combos = vec![Row::new(Vec::new())];
        for table in tables {
            let mut next = Vec::with_capacity(combos.len() * table.rows.len());
            for prefix in &combos {
                for row in &table.rows {
                    next.push(Row::concat([prefix, row]));
                }
            }
            combos = next;
        }
        for row in combos {
            product.insert_row(row);
        }
        product
    }

    /// Keeps exactly the columns whose indices appear in `indices`,
    /// in ascending index order (a positional bitmap filter; requested
    /// order does not matter here).
    #[must_use]
    pub fn extract_columns_by_index(&self, indices: &[usize]) -> Self {
        let keep: Vec<bool> = (0..self.column_count())
            .map(|i| indices.contains(&i))
            .collect();

        let column_names = compress(&self.column_names, &keep);
        let column_types = compress(&self.column_types, &keep);
        let mut extracted = Self::new(column_names, column_types);
        for row in &self.rows {
            extracted.insert_row(Row::new(compress(row.values(), &keep)));
        }
        extracted
    }

    /// Resolves each name through the name-to-index map, then defers to
    /// [`Table::extract_columns_by_index`].
    ///
    /// # Errors
    ///
    /// Fails on a name this table does not have.
    pub fn extract_columns_by_name(&self, names: &[String]) -> Result<Self> {
        let indices = names
            .iter()
            .map(|name| {
                self.index_of(name)
                    .ok_or_else(|| EngineError::UnknownColumn(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.extract_columns_by_index(&indices))
    }

    /// Moves column `i` to position `order[i]`, for the header and every
    /// row alike.
    ///
    /// # Errors
    ///
    /// Fails unless `order` is a permutation of `0..column_count`.
    pub fn reorder_columns(&self, order: &[usize]) -> Result<Self> {
        if order.len() != self.column_count() {
            return Err(EngineError::ReorderLength {
                expected: self.column_count(),
                got: order.len(),
            });
        }
        let mut seen = vec![false; order.len()];
        for &position in order {
            if position >= order.len() || seen[position] {
                return Err(EngineError::ReorderIndex(position));
            }
            seen[position] = true;
        }

        let column_names = reorder(&self.column_names, order);
        let column_types = reorder(&self.column_types, order);
        let mut reordered = Self::new(column_names, column_types);
        for row in &self.rows {
            reordered.insert_row(Row::new(reorder(row.values(), order)));
        }
        Ok(reordered)
    }

    /// Keeps the rows for which the postfix condition evaluates to true,
    /// in input order. An empty condition keeps everything.
    ///
    /// # Errors
    ///
    /// Fails when a condition term cannot be bound against this table or
    /// when evaluation fails (type mismatch, stack shape, non-boolean
    /// result).
    pub fn filter(&self, condition: &[ConditionItem]) -> Result<Self> {
        if condition.is_empty() {
            return Ok(self.clone());
        }

        let bound = eval::bind(self, condition)?;
        let mut filtered = Self::new(self.column_names.clone(), self.column_types.clone());
        for row in &self.rows {
            if eval::verify(row, &bound)? {
                filtered.insert_row(row.clone());
            }
        }
        Ok(filtered)
    }
}

/// Keeps `items[i]` where `keep[i]` holds.
fn compress<T: Clone>(items: &[T], keep: &[bool]) -> Vec<T> {
    items
        .iter()
        .zip(keep)
        .filter_map(|(item, &kept)| kept.then(|| item.clone()))
        .collect()
}

/// Applies a validated permutation: the output at `order[i]` is `items[i]`.
fn reorder<T: Clone>(items: &[T], order: &[usize]) -> Vec<T> {
    let mut out = items.to_vec();
    for (i, &target) in order.iter().enumerate() {
        out[target] = items[i].clone();
    }
    out
}

impl fmt::Display for Table {
    /// The wire format: the header line, then one line per row, with no
    /// trailing newline. A table without rows is just its header.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header_string())?;
        for row in &self.rows {
            write!(f, "\n{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn two_column() -> Table {
        let mut table = Table::new(
            vec![String::from("c1"), String::from("c2")],
            vec![ColumnType::Int, ColumnType::Int],
        );
        table.insert_row(Row::new(vec![Value::Int(1), Value::Int(2)]));
        table.insert_row(Row::new(vec![Value::Int(3), Value::Int(4)]));
        table
    }

    #[test]
    fn test_header_and_display() {
        let table = two_column();
        assert_eq!(table.header_string(), "c1 int,c2 int");
        assert_eq!(table.to_string(), "c1 int,c2 int\n1,2\n3,4");
    }

    #[test]
    fn test_empty_table_prints_header_only() {
        let table = Table::new(vec![String::from("c")], vec![ColumnType::Float]);
        assert_eq!(table.to_string(), "c float");
    }

    #[test]
    fn test_cartesian_product_counts() {
        let left = two_column();
        let mut right = Table::new(vec![String::from("c3")], vec![ColumnType::Int]);
        right.insert_row(Row::new(vec![Value::Int(10)]));
        right.insert_row(Row::new(vec![Value::Int(20)]));

        let product = Table::cartesian_product(&[&left, &right]);
        assert_eq!(product.column_count(), left.column_count() + right.column_count());
        assert_eq!(product.rows().len(), left.rows().len() * right.rows().len());
        assert_eq!(
            product.to_string(),
            "c1 int,c2 int,c3 int\n1,2,10\n1,2,20\n3,4,10\n3,4,20"
        );
    }

    #[test]
    fn test_cartesian_product_with_empty_side_has_no_rows() {
        let left = two_column();
        let right = Table::new(vec![String::from("c3")], vec![ColumnType::Int]);
        let product = Table::cartesian_product(&[&left, &right]);
        assert_eq!(product.column_count(), 3);
        assert!(product.rows().is_empty());
    }

    #[test]
    fn test_extract_by_index_is_ascending() {
        let table = two_column();
        // Indices arrive in descending order; extraction still keeps the
        // table's own column order.
        let extracted = table.extract_columns_by_index(&[1, 0]);
        assert_eq!(extracted.to_string(), "c1 int,c2 int\n1,2\n3,4");

        let second_only = table.extract_columns_by_index(&[1]);
        assert_eq!(second_only.to_string(), "c2 int\n2\n4");
    }

    #[test]
    fn test_extract_is_idempotent_on_projected_table() {
        let table = two_column();
        let once = table.extract_columns_by_index(&[0]);
        let twice = once.extract_columns_by_index(&[0]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_extract_by_name_resolves_through_the_map() {
        let table = two_column();
        let extracted = table
            .extract_columns_by_name(&[String::from("c2")])
            .expect("extraction should succeed");
        assert_eq!(extracted.to_string(), "c2 int\n2\n4");

        let error = table
            .extract_columns_by_name(&[String::from("nope")])
            .unwrap_err();
        assert_eq!(error, EngineError::UnknownColumn(String::from("nope")));
    }

    #[test]
    fn test_reorder_swaps_header_and_rows() {
        let table = two_column();
        let swapped = table.reorder_columns(&[1, 0]).expect("reorder should succeed");
        assert_eq!(swapped.to_string(), "c2 int,c1 int\n2,1\n4,3");
    }

    #[test]
    fn test_reorder_round_trips_through_inverse() {
        let mut table = Table::new(
            vec![String::from("a"), String::from("b"), String::from("c")],
            vec![ColumnType::Int, ColumnType::Int, ColumnType::Int],
        );
        table.insert_row(Row::new(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));

        let order = [2, 0, 1];
        let mut inverse = [0_usize; 3];
        for (i, &target) in order.iter().enumerate() {
            inverse[target] = i;
        }

        let there = table.reorder_columns(&order).expect("reorder should succeed");
        let back = there.reorder_columns(&inverse).expect("reorder should succeed");
        assert_eq!(back, table);
    }

    #[test]
    fn test_reorder_rejects_bad_orders() {
        let table = two_column();
        assert_eq!(
            table.reorder_columns(&[0]),
            Err(EngineError::ReorderLength { expected: 2, got: 1 })
        );
        assert_eq!(
            table.reorder_columns(&[0, 0]),
            Err(EngineError::ReorderIndex(0))
        );
        assert_eq!(
            table.reorder_columns(&[0, 2]),
            Err(EngineError::ReorderIndex(2))
        );
    }

    #[test]
    fn test_join_with_shared_names_keeps_first_occurrence() {
        let left = two_column();
        let mut right = Table::new(vec![String::from("c1")], vec![ColumnType::Int]);
        right.insert_row(Row::new(vec![Value::Int(9)]));

        let product = Table::cartesian_product(&[&left, &right]);
        assert_eq!(product.index_of("c1"), Some(0));
    }
}
