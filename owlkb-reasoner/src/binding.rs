//! Variables, binding rows and binding tables
//!
//! A binding table is the relational result of antecedent evaluation: a fixed
//! list of variable columns and an ordered list of rows. Each row holds one
//! slot per column; a slot is either the canonical string of an RDF term or
//! `None` for "unbound". Rows are not deduplicated.
//!
//! Tables combine with a natural join: shared columns are equi-joined on
//! their string values, tables without shared columns form a Cartesian
//! product. The unit table (zero columns, one row) is the identity of the
//! join and stands for a vacuously true antecedent.

use hashbrown::HashMap;
use std::fmt;
use std::sync::Arc;

/// A named placeholder such as `?X`.
///
/// Identity is the name string; the leading `?` is added when missing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(Arc<str>);

impl Variable {
    pub fn new(name: &str) -> Self {
        if name.starts_with('?') {
            Variable(Arc::from(name))
        } else {
            Variable(Arc::from(format!("?{}", name)))
        }
    }

    /// Name including the leading `?`
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Variable::new(name)
    }
}

/// One row of a binding table, positionally aligned with the table's columns
pub type BindingRow = Vec<Option<Arc<str>>>;

/// Ordered rows over a fixed variable schema
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingTable {
    columns: Vec<Variable>,
    rows: Vec<BindingRow>,
}

impl BindingTable {
    /// Create an empty table with the given columns (duplicates collapse)
    pub fn new(columns: impl IntoIterator<Item = Variable>) -> Self {
        let mut cols: Vec<Variable> = Vec::new();
        for col in columns {
            if !cols.contains(&col) {
                cols.push(col);
            }
        }
        Self {
            columns: cols,
            rows: Vec::new(),
        }
    }

    /// Zero columns, exactly one row
    pub fn unit() -> Self {
        Self {
            columns: Vec::new(),
            rows: vec![Vec::new()],
        }
    }

    pub fn columns(&self) -> &[Variable] {
        &self.columns
    }

    pub fn column_index(&self, var: &Variable) -> Option<usize> {
        self.columns.iter().position(|c| c == var)
    }

    pub fn has_column(&self, var: &Variable) -> bool {
        self.column_index(var).is_some()
    }

    /// Append a row. Short rows are padded with unbound slots and long rows
    /// truncated, so every row always has exactly one slot per column.
    pub fn push_row(&mut self, mut row: BindingRow) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[BindingRow] {
        &self.rows
    }

    /// Value bound to `var` in row `row`
    pub fn value(&self, row: usize, var: &Variable) -> Option<&str> {
        let col = self.column_index(var)?;
        self.rows.get(row)?.get(col)?.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep only the rows for which `keep` returns true. Columns are untouched.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&BindingRow) -> bool,
    {
        self.rows.retain(keep);
    }

    /// Natural join with another table.
    ///
    /// Output columns are this table's columns followed by the other table's
    /// columns that are not shared. Output rows are ordered by this table's
    /// rows, then by the other table's rows. Unbound slots never join.
    pub fn join(self, other: BindingTable) -> BindingTable {
        let shared: Vec<(usize, usize)> = self
            .columns
            .iter()
            .enumerate()
            .filter_map(|(li, col)| other.column_index(col).map(|ri| (li, ri)))
            .collect();
        let extra: Vec<usize> = (0..other.columns.len())
            .filter(|ri| !shared.iter().any(|(_, r)| r == ri))
            .collect();

        let mut columns = self.columns.clone();
        columns.extend(extra.iter().map(|&ri| other.columns[ri].clone()));
        let mut result = BindingTable {
            columns,
            rows: Vec::new(),
        };

        if shared.is_empty() {
            for left in &self.rows {
                for right in &other.rows {
                    result.rows.push(combine(left, right, &extra));
                }
            }
            return result;
        }

        // Hash the right side on its shared-column values
        let mut index: HashMap<Vec<&str>, Vec<usize>> = HashMap::new();
        for (i, right) in other.rows.iter().enumerate() {
            if let Some(key) = join_key(right, shared.iter().map(|(_, r)| *r)) {
                index.entry(key).or_default().push(i);
            }
        }

        for left in &self.rows {
            let Some(key) = join_key(left, shared.iter().map(|(l, _)| *l)) else {
                continue;
            };
            if let Some(matches) = index.get(&key) {
                for &i in matches {
                    result.rows.push(combine(left, &other.rows[i], &extra));
                }
            }
        }
        result
    }

    /// Join a sequence of tables left to right, starting from the unit table
    pub fn join_all<I>(tables: I) -> BindingTable
    where
        I: IntoIterator<Item = BindingTable>,
    {
        tables
            .into_iter()
            .fold(BindingTable::unit(), |acc, table| acc.join(table))
    }
}

fn join_key(row: &BindingRow, cols: impl Iterator<Item = usize>) -> Option<Vec<&str>> {
    cols.map(|c| row[c].as_deref()).collect()
}

fn combine(left: &BindingRow, right: &BindingRow, extra: &[usize]) -> BindingRow {
    let mut row = Vec::with_capacity(left.len() + extra.len());
    row.extend(left.iter().cloned());
    row.extend(extra.iter().map(|&ri| right[ri].clone()));
    row
}
