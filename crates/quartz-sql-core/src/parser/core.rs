//! Recursive descent parser lowering token streams into query plans.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SyntaxError};
use crate::lexer::{Command, Keyword, Lexer, Operator, Separator, Token, TokenKind};
use crate::plan::{ColumnDef, ColumnType, Plan, SelectQuery};

use super::postfix::infix_to_postfix;

/// Table and column names: a letter followed by letters, digits, or
/// underscores. Reserved words never reach this check because they are
/// classified as non-literal tokens by the lexer.
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("name pattern is valid"));

/// Lexes and parses a single statement.
///
/// # Errors
///
/// Returns a [`SyntaxError`] from either stage.
pub fn parse_query(input: &str) -> Result<Plan> {
    let tokens = Lexer::new(input).tokenize()?;
    Parser::new(tokens).parse_statement()
}

/// A cursor over a token sequence, with one parsing method per statement.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a parser over an already-lexed token sequence.
    #[must_use]
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses one complete statement.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] describing the first rule violation.
    pub fn parse_statement(&mut self) -> Result<Plan> {
        let command = match self.tokens.get(self.pos) {
            None => return Err(SyntaxError::EmptyQuery),
            Some(token) => match &token.kind {
                TokenKind::Command(command) => *command,
                other => {
                    return Err(SyntaxError::ExpectedCommand {
                        found: other.to_string(),
                    })
                }
            },
        };
        self.pos += 1;

        match command {
            Command::Create => self.parse_create(),
            Command::Drop => self.parse_drop(),
            Command::Insert => self.parse_insert(),
            Command::Print => self.parse_print(),
            Command::Select => self.parse_select_body().map(Plan::Select),
            Command::Load | Command::Store => Err(SyntaxError::UnsupportedCommand(command)),
        }
    }

    // ===================================================================
    // Statement rules
    // ===================================================================

    fn parse_create(&mut self) -> Result<Plan> {
        const STMT: &str = "CREATE TABLE";

        self.expect_keyword(STMT, Keyword::Table)?;
        let table = self.expect_name(STMT, "a table name")?;

        if self.check_keyword(Keyword::As) {
            self.pos += 1;
            self.expect_command(STMT, Command::Select)?;
            let query = self.parse_select_body()?;
            return Ok(Plan::CreateTableAs { table, query });
        }

        self.expect_separator(STMT, Separator::LeftParen, "'(' before the column list")?;

        let mut columns = Vec::new();
        let mut entry = 1_usize;
        loop {
            let name = self.expect_name(STMT, &format!("a column name for entry {entry}"))?;
            let column_type = self.expect_type(STMT, entry)?;
            columns.push(ColumnDef::new(name, column_type));

            let expected = format!("',' or ')' after column entry {entry}");
            match self.tokens.get(self.pos) {
                None => {
                    return Err(SyntaxError::UnexpectedEnd {
                        statement: STMT,
                        expected,
                    })
                }
                Some(token) if token.is_separator(Separator::RightParen) => {
                    self.pos += 1;
                    break;
                }
                Some(token) if token.is_separator(Separator::Comma) => {
                    self.pos += 1;
                    entry += 1;
                }
                Some(token) => {
                    return Err(SyntaxError::Expected {
                        statement: STMT,
                        expected,
                        found: token.kind.to_string(),
                    })
                }
            }
        }

        self.ensure_done(STMT)?;
        Ok(Plan::CreateTable { table, columns })
    }

    fn parse_drop(&mut self) -> Result<Plan> {
        const STMT: &str = "DROP";

        let table = self.expect_name(STMT, "a table name")?;
        self.ensure_done(STMT)?;
        Ok(Plan::DropTable { table })
    }

    fn parse_print(&mut self) -> Result<Plan> {
        const STMT: &str = "PRINT";

        let table = self.expect_name(STMT, "a table name")?;
        self.ensure_done(STMT)?;
        Ok(Plan::PrintTable { table })
    }

    fn parse_insert(&mut self) -> Result<Plan> {
        const STMT: &str = "INSERT INTO";

        self.expect_keyword(STMT, Keyword::Into)?;
        let table = self.expect_name(STMT, "a table name")?;
        self.expect_keyword(STMT, Keyword::Values)?;

        let mut values = Vec::new();
        let mut entry = 1_usize;
        loop {
            let expected = format!("value entry number {entry}");
            match self.tokens.get(self.pos) {
                None => {
                    return Err(SyntaxError::UnexpectedEnd {
                        statement: STMT,
                        expected,
                    })
                }
                Some(token) => match &token.kind {
                    TokenKind::Literal(text) => {
                        values.push(text.clone());
                        self.pos += 1;
                    }
                    other => {
                        return Err(SyntaxError::Expected {
                            statement: STMT,
                            expected,
                            found: other.to_string(),
                        })
                    }
                },
            }

            if self.is_done() {
                return Ok(Plan::InsertInto { table, values });
            }
            self.expect_separator(
                STMT,
                Separator::Comma,
                &format!("',' after value entry number {entry}"),
            )?;
            entry += 1;
        }
    }

    /// Parses everything after the `select` command word; shared with
    /// `create table … as select …`.
    fn parse_select_body(&mut self) -> Result<SelectQuery> {
        const STMT: &str = "SELECT";

        if self.is_done() {
            return Err(SyntaxError::UnexpectedEnd {
                statement: STMT,
                expected: String::from("a column list or '*'"),
            });
        }

        // An empty columns list stands for `*`.
        let mut columns = Vec::new();
        if self.check_operator(Operator::Star) {
            self.pos += 1;
        } else {
            let mut entry = 1_usize;
            loop {
                let name = self.expect_name(STMT, &format!("column name number {entry}"))?;
                columns.push(name);
                if !self.check_separator(Separator::Comma) {
                    break;
                }
                self.pos += 1;
                entry += 1;
            }
        }

        self.expect_keyword(STMT, Keyword::From)?;

        let mut tables = Vec::new();
        let mut entry = 1_usize;
        loop {
            let name = self.expect_name(STMT, &format!("table name number {entry}"))?;
            tables.push(name);
            if !self.check_separator(Separator::Comma) {
                break;
            }
            self.pos += 1;
            entry += 1;
        }

        if self.is_done() {
            return Ok(SelectQuery {
                columns,
                tables,
                condition: Vec::new(),
            });
        }

        self.expect_keyword(STMT, Keyword::Where)?;
        let condition = infix_to_postfix(&self.tokens[self.pos..])?;
        self.pos = self.tokens.len();

        Ok(SelectQuery {
            columns,
            tables,
            condition,
        })
    }

    // ===================================================================
    // Cursor helpers
    // ===================================================================

    fn is_done(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.tokens
            .get(self.pos)
            .is_some_and(|token| token.is_keyword(keyword))
    }

    fn check_separator(&self, separator: Separator) -> bool {
        self.tokens
            .get(self.pos)
            .is_some_and(|token| token.is_separator(separator))
    }

    fn check_operator(&self, operator: Operator) -> bool {
        self.tokens
            .get(self.pos)
            .is_some_and(|token| token.kind == TokenKind::Operator(operator))
    }

    fn expect_keyword(&mut self, statement: &'static str, keyword: Keyword) -> Result<()> {
        match self.tokens.get(self.pos) {
            None => Err(SyntaxError::UnexpectedEnd {
                statement,
                expected: format!("'{keyword}'"),
            }),
            Some(token) if token.is_keyword(keyword) => {
                self.pos += 1;
                Ok(())
            }
            Some(token) => Err(SyntaxError::Expected {
                statement,
                expected: format!("'{keyword}'"),
                found: token.kind.to_string(),
            }),
        }
    }

    fn expect_command(&mut self, statement: &'static str, command: Command) -> Result<()> {
        match self.tokens.get(self.pos) {
            None => Err(SyntaxError::UnexpectedEnd {
                statement,
                expected: format!("'{command}'"),
            }),
            Some(token) if token.kind == TokenKind::Command(command) => {
                self.pos += 1;
                Ok(())
            }
            Some(token) => Err(SyntaxError::Expected {
                statement,
                expected: format!("'{command}'"),
                found: token.kind.to_string(),
            }),
        }
    }

    fn expect_separator(
        &mut self,
        statement: &'static str,
        separator: Separator,
        expected: &str,
    ) -> Result<()> {
        match self.tokens.get(self.pos) {
            None => Err(SyntaxError::UnexpectedEnd {
                statement,
                expected: expected.to_string(),
            }),
            Some(token) if token.is_separator(separator) => {
                self.pos += 1;
                Ok(())
            }
            Some(token) => Err(SyntaxError::Expected {
                statement,
                expected: expected.to_string(),
                found: token.kind.to_string(),
            }),
        }
    }

    /// Expects a literal token that is a well-formed table or column name.
    fn expect_name(&mut self, statement: &'static str, expected: &str) -> Result<String> {
        match self.tokens.get(self.pos) {
            None => Err(SyntaxError::UnexpectedEnd {
                statement,
                expected: expected.to_string(),
            }),
            Some(token) => match &token.kind {
                TokenKind::Literal(text) => {
                    if NAME_RE.is_match(text) {
                        let name = text.clone();
                        self.pos += 1;
                        Ok(name)
                    } else {
                        Err(SyntaxError::InvalidIdentifier {
                            statement,
                            name: text.clone(),
                        })
                    }
                }
                TokenKind::Command(_) | TokenKind::Keyword(_) | TokenKind::Type(_) => {
                    Err(SyntaxError::ReservedName {
                        statement,
                        found: token.kind.to_string(),
                    })
                }
                other => Err(SyntaxError::Expected {
                    statement,
                    expected: expected.to_string(),
                    found: other.to_string(),
                }),
            },
        }
    }

    fn expect_type(&mut self, statement: &'static str, entry: usize) -> Result<ColumnType> {
        match self.tokens.get(self.pos) {
            None => Err(SyntaxError::UnexpectedEnd {
                statement,
                expected: format!("a column type for entry {entry}"),
            }),
            Some(token) => match &token.kind {
                TokenKind::Type(column_type) => {
                    let column_type = *column_type;
                    self.pos += 1;
                    Ok(column_type)
                }
                other => Err(SyntaxError::Expected {
                    statement,
                    expected: format!("a column type for entry {entry}"),
                    found: other.to_string(),
                }),
            },
        }
    }

    fn ensure_done(&self, statement: &'static str) -> Result<()> {
        match self.tokens.get(self.pos) {
            None => Ok(()),
            Some(token) => Err(SyntaxError::TrailingTokens {
                statement,
                found: token.kind.to_string(),
            }),
        }
    }
}
