//! # tablediff
//!
//! Compares two versions of a relational table (e.g. staging vs
//! production) with a merge-join over two key-ordered scans, prints a
//! human-readable diff trace, and can generate a reviewable SQL script
//! that reconciles the left table into the right one.

pub mod cli;
pub mod commands;
pub mod config;
pub mod connection;
pub mod diff;
pub mod error;
pub mod patch;
pub mod record;
pub mod value;

pub use config::{Config, ConnectionProperties};
pub use connection::{Connection, TableScan};
pub use diff::{CompareStrategy, Diff, RecordSource};
pub use error::{Result, TablediffError};
pub use patch::{Patch, PatchOp, PatchOps};
pub use record::Record;
pub use value::Value;
