//! Named database connections and key-ordered table scans

use crate::config::ConnectionProperties;
use crate::diff::RecordSource;
use crate::error::{Result, TablediffError};
use crate::record::Record;
use crate::value::Value;
use duckdb::types::ValueRef;

/// A named connection to one side of the comparison.
pub struct Connection {
    name: String,
    conn: duckdb::Connection,
}

impl Connection {
    /// Open the database a connection name resolves to.
    pub fn open(name: impl Into<String>, props: &ConnectionProperties) -> Result<Self> {
        let name = name.into();
        let conn = duckdb::Connection::open(&props.path)?;
        log::debug!("opened connection `{}` at {}", name, props.path.display());
        Ok(Self { name, conn })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names of a table in definition order.
    pub fn column_names(&self, table: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(&format!("DESCRIBE {}", quote_scan_ident(table)))?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row?);
        }
        Ok(columns)
    }

    /// Prepare the full-table scan ordered ascending over the key tuple.
    ///
    /// The resulting statement backs a [`TableScan`]; the ascending order
    /// is the precondition the diff engine relies on.
    pub fn prepare_scan(&self, table: &str, primary_keys: &[String]) -> Result<duckdb::Statement<'_>> {
        let order_by: Vec<String> = primary_keys
            .iter()
            .map(|k| format!("{} ASC", quote_scan_ident(k)))
            .collect();
        let sql = format!(
            "SELECT * FROM {} ORDER BY {}",
            quote_scan_ident(table),
            order_by.join(", ")
        );
        log::debug!("[{}] {}", self.name, sql);
        Ok(self.conn.prepare(&sql)?)
    }
}

/// A lazy cursor over one prepared scan, yielding one [`Record`] per row.
///
/// Owns the result set for the duration of one diff invocation; dropping
/// it releases the cursor on every exit path.
pub struct TableScan<'stmt> {
    columns: Vec<String>,
    rows: duckdb::Rows<'stmt>,
}

impl<'stmt> TableScan<'stmt> {
    /// `columns` must be the column-name sequence of the statement that
    /// produced `rows`, in select order.
    pub fn new(columns: Vec<String>, rows: duckdb::Rows<'stmt>) -> Self {
        Self { columns, rows }
    }
}

impl RecordSource for TableScan<'_> {
    fn next_record(&mut self) -> Result<Option<Record>> {
        let row = match self.rows.next()? {
            Some(row) => row,
            None => return Ok(None),
        };

        let mut record = Record::new();
        for (i, column) in self.columns.iter().enumerate() {
            record.push(column.clone(), cell_value(column, row.get_ref(i)?)?);
        }
        Ok(Some(record))
    }
}

/// Map one fetched cell into a scalar [`Value`].
///
/// The data model is scalar-only: NULL, integer widths, floats, and
/// text/blob bytes. Anything else in the scanned table is a fatal input
/// error rather than a silently mangled value.
fn cell_value(column: &str, cell: ValueRef<'_>) -> Result<Value> {
    let value = match cell {
        ValueRef::Null => Value::Null,
        ValueRef::Boolean(b) => Value::Integer(i64::from(b)),
        ValueRef::TinyInt(i) => Value::Integer(i64::from(i)),
        ValueRef::SmallInt(i) => Value::Integer(i64::from(i)),
        ValueRef::Int(i) => Value::Integer(i64::from(i)),
        ValueRef::BigInt(i) => Value::Integer(i),
        ValueRef::UTinyInt(i) => Value::Integer(i64::from(i)),
        ValueRef::USmallInt(i) => Value::Integer(i64::from(i)),
        ValueRef::UInt(i) => Value::Integer(i64::from(i)),
        ValueRef::UBigInt(i) => Value::Integer(i64::try_from(i).map_err(|_| {
            TablediffError::invalid_input(format!(
                "value in column `{}` is out of range for a 64-bit integer",
                column
            ))
        })?),
        ValueRef::HugeInt(i) => Value::Integer(i64::try_from(i).map_err(|_| {
            TablediffError::invalid_input(format!(
                "value in column `{}` is out of range for a 64-bit integer",
                column
            ))
        })?),
        ValueRef::Float(f) => Value::Float(f64::from(f)),
        ValueRef::Double(f) => Value::Float(f),
        ValueRef::Text(s) => Value::Text(s.to_vec()),
        ValueRef::Blob(b) => Value::Text(b.to_vec()),
        _ => {
            return Err(TablediffError::invalid_input(format!(
                "unsupported column type in column `{}`: only integer, float, and text scalars are comparable",
                column
            )))
        }
    };
    Ok(value)
}

/// Double-quote an identifier for queries sent to DuckDB. Distinct from
/// the backtick quoting used in the rendered patch script.
fn quote_scan_ident(name: &str) -> String {
    format!("\"{}\"", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn test_connection(temp_dir: &TempDir) -> Connection {
        let props = ConnectionProperties {
            path: temp_dir.path().join("test.duckdb"),
        };
        Connection::open("test", &props).unwrap()
    }

    #[test]
    fn test_cell_value_mapping() {
        assert_eq!(cell_value("c", ValueRef::Null).unwrap(), Value::Null);
        assert_eq!(
            cell_value("c", ValueRef::Int(7)).unwrap(),
            Value::Integer(7)
        );
        assert_eq!(
            cell_value("c", ValueRef::BigInt(-9)).unwrap(),
            Value::Integer(-9)
        );
        assert_eq!(
            cell_value("c", ValueRef::Double(1.5)).unwrap(),
            Value::Float(1.5)
        );
        assert_eq!(
            cell_value("c", ValueRef::Text(b"hi")).unwrap(),
            Value::Text(b"hi".to_vec())
        );
    }

    #[test]
    fn test_cell_value_out_of_range_integer() {
        let err = cell_value("c", ValueRef::UBigInt(u64::MAX)).unwrap_err();
        assert!(matches!(err, TablediffError::InvalidInput { .. }));
    }

    #[test]
    fn test_column_names_and_ordered_scan() {
        let temp_dir = TempDir::new().unwrap();
        let conn = test_connection(&temp_dir);
        conn.conn
            .execute_batch(
                "CREATE TABLE users (id BIGINT, name VARCHAR);
                 INSERT INTO users VALUES (2, 'bob'), (1, 'alice'), (3, NULL);",
            )
            .unwrap();

        assert_eq!(conn.column_names("users").unwrap(), keys(&["id", "name"]));

        let primary_keys = keys(&["id"]);
        let mut stmt = conn.prepare_scan("users", &primary_keys).unwrap();
        let mut scan = TableScan::new(keys(&["id", "name"]), stmt.query([]).unwrap());

        let first = scan.next_record().unwrap().unwrap();
        assert_eq!(first.value("id"), Value::Integer(1));
        assert_eq!(first.value("name"), Value::Text(b"alice".to_vec()));

        let second = scan.next_record().unwrap().unwrap();
        assert_eq!(second.value("id"), Value::Integer(2));

        let third = scan.next_record().unwrap().unwrap();
        assert_eq!(third.value("name"), Value::Null);

        assert!(scan.next_record().unwrap().is_none());
    }
}
