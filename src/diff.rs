//! Merge-join diff engine over two key-ordered record streams

use crate::error::{Result, TablediffError};
use crate::patch::{Patch, PatchOps};
use crate::record::Record;
use std::io::Write;

/// A lazy, pre-ordered stream of records.
///
/// Implementations must yield rows ascending over the full primary-key
/// tuple (`ORDER BY k1 ASC, k2 ASC, ...`); the engine relies on that
/// ordering and does not verify it.
pub trait RecordSource {
    fn next_record(&mut self) -> Result<Option<Record>>;
}

/// How two matched-position rows are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareStrategy {
    /// Match rows by key tuple only; non-key differences are ignored.
    Keys,
    /// Also compare every column and classify in-place changes as updates.
    All,
}

impl CompareStrategy {
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "keys" => Ok(Self::Keys),
            "all" => Ok(Self::All),
            _ => Err(format!(
                "Invalid compare strategy: {}. Use 'keys' or 'all'",
                s
            )),
        }
    }
}

/// One table comparison: two ordered scans walked in lock-step.
///
/// The engine owns no connection state; it pulls rows on demand from the
/// injected sources, writes the human-readable trace to `output`, and
/// accumulates classifications into the returned [`Patch`]. A run either
/// completes fully or aborts on the first error; no partial patch is
/// usable.
pub struct Diff<'a> {
    left: &'a mut dyn RecordSource,
    right: &'a mut dyn RecordSource,
    left_name: &'a str,
    right_name: &'a str,
    table: &'a str,
    primary_keys: &'a [String],
    strategy: CompareStrategy,
    output: &'a mut dyn Write,
}

impl<'a> Diff<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        left: &'a mut dyn RecordSource,
        right: &'a mut dyn RecordSource,
        left_name: &'a str,
        right_name: &'a str,
        table: &'a str,
        primary_keys: &'a [String],
        strategy: CompareStrategy,
        output: &'a mut dyn Write,
    ) -> Self {
        Self {
            left,
            right,
            left_name,
            right_name,
            table,
            primary_keys,
            strategy,
            output,
        }
    }

    /// Run the merge-join to completion and return the accumulated patch.
    pub fn compare(&mut self, patch_options: PatchOps) -> Result<Patch> {
        let mut patch = Patch::new(self.table, self.primary_keys.to_vec(), patch_options);

        writeln!(self.output, "--- {}", self.left_name)?;
        writeln!(self.output, "+++ {}", self.right_name)?;
        writeln!(self.output)?;

        // Cursor slots hold the row in hand on each side; an exhausted
        // side drains to None once its row is consumed.
        let mut current_left: Option<Record> = None;
        let mut current_right: Option<Record> = None;
        let mut advance_left = true;
        let mut advance_right = true;
        let mut left_exhausted = false;
        let mut right_exhausted = false;
        let mut header_written = false;

        loop {
            if advance_left {
                current_left = if left_exhausted {
                    None
                } else {
                    self.left.next_record()?
                };
                left_exhausted = current_left.is_none();
                advance_left = false;
            }
            if advance_right {
                current_right = if right_exhausted {
                    None
                } else {
                    self.right.next_record()?
                };
                right_exhausted = current_right.is_none();
                advance_right = false;
            }

            if !header_written {
                if let Some(record) = current_left.as_ref().or(current_right.as_ref()) {
                    writeln!(self.output, "=== ({})", record.attributes().join(", "))?;
                    header_written = true;
                }
            }

            match (&current_left, &current_right) {
                (None, None) => break,
                (Some(left), None) => {
                    writeln!(self.output, "--- {}", left.render())?;
                    patch.add_delete(left.clone());
                    advance_left = true;
                }
                (None, Some(right)) => {
                    writeln!(self.output, "+++ {}", right.render())?;
                    patch.add_insert(right.clone());
                    advance_right = true;
                }
                (Some(left), Some(right)) => match self.strategy {
                    CompareStrategy::Keys => {
                        if left.equals(right, self.primary_keys)? {
                            advance_left = true;
                            advance_right = true;
                        } else if right.is_before(left, self.primary_keys)? {
                            writeln!(self.output, "+++ {}", right.render())?;
                            patch.add_insert(right.clone());
                            advance_right = true;
                        } else if left.is_before(right, self.primary_keys)? {
                            writeln!(self.output, "--- {}", left.render())?;
                            patch.add_delete(left.clone());
                            advance_left = true;
                        } else {
                            return Err(unorderable(left, right));
                        }
                    }
                    CompareStrategy::All => {
                        let changed = left.compare_all(right)?;
                        if changed.is_empty() {
                            advance_left = true;
                            advance_right = true;
                        } else if !left.equals(right, self.primary_keys)? {
                            if right.is_before(left, self.primary_keys)? {
                                writeln!(self.output, "+++ {}", right.render())?;
                                patch.add_insert(right.clone());
                                advance_right = true;
                            } else if left.is_before(right, self.primary_keys)? {
                                writeln!(self.output, "--- {}", left.render())?;
                                patch.add_delete(left.clone());
                                advance_left = true;
                            } else {
                                return Err(unorderable(left, right));
                            }
                        } else {
                            writeln!(self.output, ">>> {}", right.render())?;
                            patch.add_update(right.subset(self.primary_keys, &changed));
                            advance_left = true;
                            advance_right = true;
                        }
                    }
                },
            }
        }

        log::debug!(
            "compared `{}`: {} to insert, {} to update, {} to delete",
            self.table,
            patch.to_insert().len(),
            patch.to_update().len(),
            patch.to_delete().len()
        );

        Ok(patch)
    }
}

/// The non-lexicographic key predicate left two in-hand rows unordered in
/// both directions (tied key prefix). The merge-join cannot make progress
/// without mis-classifying one of them.
fn unorderable(left: &Record, right: &Record) -> TablediffError {
    TablediffError::key_order_conflict(format!(
        "rows {} and {} tie on part of the key tuple and cannot be ordered",
        left.render(),
        right.render()
    ))
}
