//! Wiring from parsed arguments to one comparison run

use crate::cli::Cli;
use crate::config::Config;
use crate::connection::{Connection, TableScan};
use crate::diff::{CompareStrategy, Diff};
use crate::error::{Result, TablediffError};
use crate::patch::PatchOps;
use std::fs::File;
use std::io;

/// Run one table comparison: trace to stdout, optional patch script to
/// `<left>.<right>.patch.sql`.
pub fn execute(cli: &Cli) -> Result<()> {
    let strategy =
        CompareStrategy::parse(&cli.strategy).map_err(TablediffError::invalid_input)?;
    let patch_options = match cli.patch.as_deref() {
        Some(s) => PatchOps::parse(s).map_err(TablediffError::invalid_input)?,
        None => PatchOps::default(),
    };
    let primary_keys = cli.primary_keys();
    if primary_keys.is_empty() {
        return Err(TablediffError::invalid_input(
            "at least one primary key column is required",
        ));
    }

    let config = Config::load(&cli.config)?;
    let left = Connection::open(&cli.left, config.connection(&cli.left)?)?;
    let right = Connection::open(&cli.right, config.connection(&cli.right)?)?;

    let left_columns = left.column_names(&cli.table)?;
    let right_columns = right.column_names(&cli.table)?;

    let mut left_stmt = left.prepare_scan(&cli.table, &primary_keys)?;
    let mut right_stmt = right.prepare_scan(&cli.table, &primary_keys)?;
    let mut left_scan = TableScan::new(left_columns, left_stmt.query([])?);
    let mut right_scan = TableScan::new(right_columns, right_stmt.query([])?);

    let stdout = io::stdout();
    let mut output = stdout.lock();

    let patch = Diff::new(
        &mut left_scan,
        &mut right_scan,
        left.name(),
        right.name(),
        &cli.table,
        &primary_keys,
        strategy,
        &mut output,
    )
    .compare(patch_options)?;

    if !patch_options.is_empty() {
        let path = format!("{}.{}.patch.sql", cli.left, cli.right);
        let mut file = File::create(&path)?;
        patch.write(&mut file)?;
        log::info!("wrote patch script to {}", path);
    }

    Ok(())
}
