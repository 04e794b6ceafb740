//! Row records: ordered column/value pairs with comparison, projection,
//! and SQL statement rendering

use crate::error::{Result, TablediffError};
use crate::value::Value;
use indexmap::IndexMap;

/// One fetched row: an insertion-ordered mapping of column name to value.
///
/// Records are built once when a row is fetched and never mutated
/// afterwards. Column names within a record are unique (the map enforces
/// it); their order is the fetch order of the originating scan.
#[derive(Debug, Clone, Default)]
pub struct Record {
    values: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Build a record from ordered column/value pairs. Test and fixture
    /// convenience; scans push columns one by one instead.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut record = Self::new();
        for (column, value) in pairs {
            record.push(column, value);
        }
        record
    }

    /// Append a column. A repeated column name overwrites the earlier
    /// value and keeps the original position.
    pub fn push(&mut self, column: impl Into<String>, value: Value) {
        self.values.insert(column.into(), value);
    }

    /// Column names in fetch order.
    pub fn attributes(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Look up a column value. An absent column reads as NULL, which lets
    /// projections tolerate a subset that legitimately omits columns.
    pub fn value(&self, column: &str) -> Value {
        self.values.get(column).cloned().unwrap_or(Value::Null)
    }

    /// Names from `attributes` whose values differ between the two
    /// records, in the given order.
    pub fn compare(&self, other: &Record, attributes: &[String]) -> Result<Vec<String>> {
        let mut diff = Vec::new();
        for column in attributes {
            if !self.value(column).equals(&other.value(column))? {
                diff.push(column.clone());
            }
        }
        Ok(diff)
    }

    pub fn equals(&self, other: &Record, attributes: &[String]) -> Result<bool> {
        Ok(self.compare(other, attributes)?.is_empty())
    }

    /// Compare every column of two records that are asserted to share an
    /// identical column set.
    ///
    /// A differing column set means the two sides were fetched with
    /// incompatible schemas, which is a fatal schema mismatch rather than
    /// a comparison result.
    pub fn compare_all(&self, other: &Record) -> Result<Vec<String>> {
        if self.values.len() != other.values.len() {
            return Err(TablediffError::schema_mismatch(
                "record attributes differ in length",
            ));
        }
        for column in self.values.keys() {
            if !other.values.contains_key(column) {
                return Err(TablediffError::schema_mismatch(format!(
                    "column `{}` missing from right record",
                    column
                )));
            }
        }
        for column in other.values.keys() {
            if !self.values.contains_key(column) {
                return Err(TablediffError::schema_mismatch(format!(
                    "column `{}` missing from left record",
                    column
                )));
            }
        }

        self.compare(other, &self.attributes())
    }

    /// Order two records by a primary-key tuple.
    ///
    /// Every key component of `self` must be independently strictly
    /// before the corresponding component of `other`; once one component
    /// is not-before, the rest are not examined. This is deliberately not
    /// lexicographic tuple order: rows with a tied key prefix are
    /// unordered in both directions, which the merge-join resolves (or
    /// reports) separately.
    pub fn is_before(&self, other: &Record, primary_keys: &[String]) -> Result<bool> {
        for column in primary_keys {
            if !self.value(column).is_before(&other.value(column))? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Project onto the key columns followed by the given attributes,
    /// copying values from `self`.
    pub fn subset(&self, primary_keys: &[String], attributes: &[String]) -> Record {
        let mut projected = Record::new();
        for column in primary_keys.iter().chain(attributes) {
            projected.push(column.clone(), self.value(column));
        }
        projected
    }

    /// Render the row as a parenthesized value tuple.
    pub fn render(&self) -> String {
        let values: Vec<String> = self.values.values().map(Value::render).collect();
        format!("({})", values.join(", "))
    }

    /// Full-row `INSERT` over all attributes in order.
    pub fn insert_statement(&self, table: &str) -> String {
        let columns: Vec<String> = self.values.keys().map(|c| quote_ident(c)).collect();
        let values: Vec<String> = self.values.values().map(Value::render).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(table),
            columns.join(", "),
            values.join(", ")
        )
    }

    /// `UPDATE` with a SET list over `attributes` and a WHERE clause over
    /// the key tuple.
    pub fn update_statement(
        &self,
        table: &str,
        primary_keys: &[String],
        attributes: &[String],
    ) -> String {
        format!(
            "UPDATE {} SET {} WHERE {}",
            quote_ident(table),
            self.assignments(attributes, ", "),
            self.assignments(primary_keys, " AND ")
        )
    }

    /// `DELETE` keyed by the primary-key tuple.
    pub fn delete_statement(&self, table: &str, primary_keys: &[String]) -> String {
        format!(
            "DELETE FROM {} WHERE {}",
            quote_ident(table),
            self.assignments(primary_keys, " AND ")
        )
    }

    fn assignments(&self, columns: &[String], separator: &str) -> String {
        let pairs: Vec<String> = columns
            .iter()
            .map(|c| format!("{} = {}", quote_ident(c), self.value(c).render()))
            .collect();
        pairs.join(separator)
    }
}

/// Backtick-quote an identifier so reserved words survive in the
/// generated script.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name)
}
