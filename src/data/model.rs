use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Row – one record of the imported file
// ---------------------------------------------------------------------------

/// A single row of the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Synthetic 1-based identifier in source order.
    pub id: usize,
    /// Raw cell text, positionally aligned with [`Table::headers`].
    /// May be shorter than the header when the source record was short.
    pub cells: Vec<String>,
}

// ---------------------------------------------------------------------------
// Table – the complete imported file
// ---------------------------------------------------------------------------

/// The parsed file: an ordered header plus ordered rows.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column names taken from the first record of the source.
    pub headers: Vec<String>,
    /// All data rows, in source order.
    pub rows: Vec<Row>,
    /// header name → position of its last occurrence.
    index: HashMap<String, usize>,
}

impl Table {
    /// Build a table from a header and raw records; ids are assigned in order.
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        let mut index = HashMap::with_capacity(headers.len());
        for (pos, name) in headers.iter().enumerate() {
            index.insert(name.clone(), pos);
        }
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(i, cells)| Row { id: i + 1, cells })
            .collect();
        Table {
            headers,
            rows,
            index,
        }
    }

    /// Position of `column` in the header, if present.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    /// Iterate the raw values of one column, one entry per row. `None` marks
    /// an unknown column or a row too short to have the cell.
    pub fn column_cells<'a>(&'a self, column: &str) -> impl Iterator<Item = Option<&'a str>> + 'a {
        let pos = self.column_index(column);
        self.rows
            .iter()
            .map(move |row| pos.and_then(|p| row.cells.get(p)).map(String::as_str))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ids_follow_source_order() {
        let table = Table::new(
            strings(&["a", "b"]),
            vec![strings(&["1", "2"]), strings(&["3", "4"])],
        );
        let ids: Vec<usize> = table.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn short_rows_have_missing_cells() {
        let table = Table::new(strings(&["a", "b"]), vec![strings(&["1"])]);
        assert_eq!(table.column_cells("a").collect::<Vec<_>>(), vec![Some("1")]);
        assert_eq!(table.column_cells("b").collect::<Vec<_>>(), vec![None]);
        assert_eq!(table.column_cells("zzz").collect::<Vec<_>>(), vec![None]);
    }

    #[test]
    fn duplicate_headers_resolve_to_last() {
        let table = Table::new(strings(&["x", "y", "x"]), vec![strings(&["1", "5", "2"])]);
        assert_eq!(table.column_index("x"), Some(2));
        let cells: Vec<_> = table.column_cells("x").collect();
        assert_eq!(cells, vec![Some("2")]);
    }
}
