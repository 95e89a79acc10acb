//! # quartz-sql-engine
//!
//! The relational runtime of Quartz SQL: typed scalar values, rows,
//! tables with cartesian join / projection / reordering / condition
//! filtering, and the database dispatcher that executes the plans
//! produced by `quartz-sql-core`.
//!
//! ```
//! use quartz_sql_core::parse_query;
//! use quartz_sql_engine::Database;
//!
//! let mut db = Database::new();
//! db.execute(parse_query("create table t (c1 int)").unwrap()).unwrap();
//! db.execute(parse_query("insert into t values 7").unwrap()).unwrap();
//!
//! let table = db
//!     .execute(parse_query("select c1 from t").unwrap())
//!     .unwrap()
//!     .expect("a select produces a table");
//! assert_eq!(table.to_string(), "c1 int\n7");
//! ```
//!
//! Everything is synchronous and single-threaded; the database owns its
//! tables, tables own their rows, and rows own their values.

pub mod database;
pub mod error;
mod eval;
pub mod repl;
pub mod row;
pub mod table;
pub mod value;

pub use database::Database;
pub use error::{EngineError, Result};
pub use row::Row;
pub use table::Table;
pub use value::Value;
