#![allow(dead_code)]

use quartz_sql_core::parse_query;
use quartz_sql_engine::{Database, EngineError, Table};

/// A scripted database session for tests.
pub struct Session {
    db: Database,
}

impl Session {
    pub fn new() -> Self {
        Self {
            db: Database::new(),
        }
    }

    /// Creates a session and runs a setup script, one statement per line.
    pub fn with_setup(script: &[&str]) -> Self {
        let mut session = Self::new();
        for statement in script {
            session.exec(statement);
        }
        session
    }

    /// Runs a statement that must succeed; returns its table, if any.
    pub fn exec(&mut self, statement: &str) -> Option<Table> {
        let plan = parse_query(statement)
            .unwrap_or_else(|e| panic!("failed to parse: {statement}\nerror: {e}"));
        self.db
            .execute(plan)
            .unwrap_or_else(|e| panic!("failed to execute: {statement}\nerror: {e}"))
    }

    /// Runs a statement that must produce a table; returns its wire form.
    pub fn exec_str(&mut self, statement: &str) -> String {
        self.exec(statement)
            .unwrap_or_else(|| panic!("expected a table from: {statement}"))
            .to_string()
    }

    /// Runs a statement that must fail; returns the error.
    pub fn exec_err(&mut self, statement: &str) -> EngineError {
        let plan = match parse_query(statement) {
            Ok(plan) => plan,
            Err(error) => return EngineError::from(error),
        };
        self.db
            .execute(plan)
            .err()
            .unwrap_or_else(|| panic!("expected an error from: {statement}"))
    }
}
