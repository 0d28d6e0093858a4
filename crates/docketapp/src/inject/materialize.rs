//! Table materialization: flat business records in, table rows out.
//!
//! Records are keyed by column `identifier`; rows are keyed by column `_id`.
//! Columns without an identifier cannot receive values, and record keys that
//! match no column are dropped. Every row gets a fresh id, so materializing
//! the same records twice never yields the same row ids.

use crate::ids::new_id;
use crate::model::{Cells, Record, TableColumn, TableRow};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Materialized {
    pub rows: Vec<TableRow>,
    /// Row ids in input record order.
    pub row_order: Vec<String>,
}

pub fn materialize(records: &[Record], columns: &[TableColumn]) -> Materialized {
    // Later columns win when two share an identifier
    let column_ids: HashMap<&str, &str> = columns
        .iter()
        .filter_map(|c| c.identifier.as_deref().map(|ident| (ident, c.id.as_str())))
        .collect();

    let rows: Vec<TableRow> = records
        .iter()
        .map(|record| {
            let cells: Cells = record
                .iter()
                .filter_map(|(key, value)| {
                    column_ids
                        .get(key.as_str())
                        .map(|column_id| (column_id.to_string(), value.clone()))
                })
                .collect();
            TableRow::new(new_id(), cells)
        })
        .collect();

    let row_order = rows.iter().map(|row| row.id.clone()).collect();
    Materialized { rows, row_order }
}
