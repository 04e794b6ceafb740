//! Patch accumulation and SQL script rendering

use crate::record::Record;
use std::io::{self, Write};

/// One kind of reconciliation statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOp {
    Insert,
    Update,
    Delete,
}

/// The set of statement kinds enabled for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchOps {
    insert: bool,
    update: bool,
    delete: bool,
}

impl PatchOps {
    /// Parse a selection string where each character enables one op:
    /// `i`nsert, `u`pdate, `d`elete.
    pub fn parse(s: &str) -> Result<Self, String> {
        let mut ops = Self::default();
        for c in s.chars() {
            match c {
                'i' => ops.insert = true,
                'u' => ops.update = true,
                'd' => ops.delete = true,
                _ => {
                    return Err(format!(
                        "Invalid patch option: '{}'. Use characters 'i', 'u', 'd'",
                        c
                    ))
                }
            }
        }
        Ok(ops)
    }

    pub fn all() -> Self {
        Self {
            insert: true,
            update: true,
            delete: true,
        }
    }

    pub fn contains(&self, op: PatchOp) -> bool {
        match op {
            PatchOp::Insert => self.insert,
            PatchOp::Update => self.update,
            PatchOp::Delete => self.delete,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.insert || self.update || self.delete)
    }
}

/// The accumulated row-level operations that reconcile the left table
/// into the right one.
///
/// Populated incrementally by the diff engine, then rendered. Within each
/// list, accumulation order equals key-ascending order because rows are
/// consumed from ordered scans.
#[derive(Debug)]
pub struct Patch {
    table: String,
    primary_keys: Vec<String>,
    options: PatchOps,

    to_insert: Vec<Record>,
    to_update: Vec<Record>,
    to_delete: Vec<Record>,
}

impl Patch {
    pub fn new(table: impl Into<String>, primary_keys: Vec<String>, options: PatchOps) -> Self {
        Self {
            table: table.into(),
            primary_keys,
            options,
            to_insert: Vec::new(),
            to_update: Vec::new(),
            to_delete: Vec::new(),
        }
    }

    /// Full right-side row missing on the left.
    pub fn add_insert(&mut self, record: Record) {
        self.to_insert.push(record);
    }

    /// Right-side row projected to key columns plus changed columns.
    pub fn add_update(&mut self, projected: Record) {
        self.to_update.push(projected);
    }

    /// Full left-side row missing on the right.
    pub fn add_delete(&mut self, record: Record) {
        self.to_delete.push(record);
    }

    pub fn to_insert(&self) -> &[Record] {
        &self.to_insert
    }

    pub fn to_update(&self) -> &[Record] {
        &self.to_update
    }

    pub fn to_delete(&self) -> &[Record] {
        &self.to_delete
    }

    pub fn is_empty(&self) -> bool {
        self.to_insert.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }

    /// Render the enabled sections as a SQL script.
    ///
    /// Sections run in insert, update, delete order; each enabled section
    /// is terminated by one blank line. Deleted rows carry a trailing
    /// comment echoing the full row for auditability.
    pub fn write(&self, w: &mut dyn Write) -> io::Result<()> {
        if self.options.contains(PatchOp::Insert) {
            for record in &self.to_insert {
                writeln!(w, "{};", record.insert_statement(&self.table))?;
            }
            writeln!(w)?;
        }

        if self.options.contains(PatchOp::Update) {
            for record in &self.to_update {
                let set_columns: Vec<String> = record
                    .attributes()
                    .into_iter()
                    .filter(|c| !self.primary_keys.contains(c))
                    .collect();
                writeln!(
                    w,
                    "{};",
                    record.update_statement(&self.table, &self.primary_keys, &set_columns)
                )?;
            }
            writeln!(w)?;
        }

        if self.options.contains(PatchOp::Delete) {
            for record in &self.to_delete {
                writeln!(
                    w,
                    "{}; -- {}",
                    record.delete_statement(&self.table, &self.primary_keys),
                    record.render()
                )?;
            }
            writeln!(w)?;
        }

        Ok(())
    }
}
