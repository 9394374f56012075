//! Customer/account repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable persistence APIs over `customers` and `accounts` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `create_pair` and `delete_pair` cover both rows in one immediate
//!   transaction; a partial customer-without-account state is never visible.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::account::Account;
use crate::model::customer::{Customer, CustomerId};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const CUSTOMER_SELECT_SQL: &str = "SELECT
    customer_id,
    name,
    email,
    mobile_number,
    created_at,
    updated_at
FROM customers";

const ACCOUNT_SELECT_SQL: &str = "SELECT
    account_number,
    customer_id,
    account_type,
    branch_address,
    created_at,
    updated_at
FROM accounts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for customer/account persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Another customer already holds this mobile number.
    MobileNumberTaken(String),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "account repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "account repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "account repository requires column `{column}` in table `{table}`"
            ),
            Self::MobileNumberTaken(mobile_number) => write!(
                f,
                "mobile number '{mobile_number}' is already registered to another customer"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted account data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for customer/account persistence.
pub trait AccountRepository {
    /// Loads one customer by the external mobile-number key.
    fn find_customer_by_mobile(&self, mobile_number: &str) -> RepoResult<Option<Customer>>;
    /// Loads one customer by its stable internal ID.
    fn find_customer_by_id(&self, customer_id: CustomerId) -> RepoResult<Option<Customer>>;
    /// Loads the account owned by one customer.
    fn find_account_by_customer(&self, customer_id: CustomerId) -> RepoResult<Option<Account>>;
    /// Loads one account by its number.
    fn find_account_by_number(&self, account_number: &str) -> RepoResult<Option<Account>>;
    /// Checks whether an account number is already in use.
    fn account_number_exists(&self, account_number: &str) -> RepoResult<bool>;
    /// Checks whether a mobile number is already registered.
    fn mobile_number_exists(&self, mobile_number: &str) -> RepoResult<bool>;
    /// Inserts a customer and its account atomically.
    ///
    /// Returns `MobileNumberTaken` when the mobile-number unique index
    /// rejects the customer row.
    fn create_pair(&self, customer: &Customer, account: &Account) -> RepoResult<()>;
    /// Updates customer and account fields atomically.
    ///
    /// Returns `true` when both rows were matched and written; `false` when
    /// the write applied to zero rows and cannot be confirmed.
    fn update_pair(&self, customer: &Customer, account: &Account) -> RepoResult<bool>;
    /// Deletes the account and customer atomically, keyed by customer id.
    ///
    /// Returns `true` when the customer row was removed.
    fn delete_pair(&self, customer_id: CustomerId) -> RepoResult<bool>;
}

/// SQLite-backed customer/account repository.
pub struct SqliteAccountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn find_customer_by_mobile(&self, mobile_number: &str) -> RepoResult<Option<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE mobile_number = ?1;"))?;
        let mut rows = stmt.query([mobile_number])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_customer_row(row)?));
        }
        Ok(None)
    }

    fn find_customer_by_id(&self, customer_id: CustomerId) -> RepoResult<Option<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE customer_id = ?1;"))?;
        let mut rows = stmt.query([customer_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_customer_row(row)?));
        }
        Ok(None)
    }

    fn find_account_by_customer(&self, customer_id: CustomerId) -> RepoResult<Option<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} WHERE customer_id = ?1;"))?;
        let mut rows = stmt.query([customer_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_account_row(row)?));
        }
        Ok(None)
    }

    fn find_account_by_number(&self, account_number: &str) -> RepoResult<Option<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} WHERE account_number = ?1;"))?;
        let mut rows = stmt.query([account_number])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_account_row(row)?));
        }
        Ok(None)
    }

    fn account_number_exists(&self, account_number: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM accounts WHERE account_number = ?1
            );",
            [account_number],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn mobile_number_exists(&self, mobile_number: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM customers WHERE mobile_number = ?1
            );",
            [mobile_number],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn create_pair(&self, customer: &Customer, account: &Account) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO customers (
                customer_id,
                name,
                email,
                mobile_number
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                customer.customer_id.to_string(),
                customer.name.as_str(),
                customer.email.as_str(),
                customer.mobile_number.as_str(),
            ],
        )
        .map_err(|err| map_customer_write_error(err, &customer.mobile_number))?;

        tx.execute(
            "INSERT INTO accounts (
                account_number,
                customer_id,
                account_type,
                branch_address
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                account.account_number.as_str(),
                account.customer_id.to_string(),
                account.account_type.as_str(),
                account.branch_address.as_str(),
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn update_pair(&self, customer: &Customer, account: &Account) -> RepoResult<bool> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let account_rows = tx.execute(
            "UPDATE accounts
             SET
                account_type = ?2,
                branch_address = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE account_number = ?1;",
            params![
                account.account_number.as_str(),
                account.account_type.as_str(),
                account.branch_address.as_str(),
            ],
        )?;

        let customer_rows = tx.execute(
            "UPDATE customers
             SET
                name = ?2,
                email = ?3,
                mobile_number = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE customer_id = ?1;",
            params![
                customer.customer_id.to_string(),
                customer.name.as_str(),
                customer.email.as_str(),
                customer.mobile_number.as_str(),
            ],
        )
        .map_err(|err| map_customer_write_error(err, &customer.mobile_number))?;

        tx.commit()?;
        Ok(account_rows == 1 && customer_rows == 1)
    }

    fn delete_pair(&self, customer_id: CustomerId) -> RepoResult<bool> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        // Account first: its customer_id column references customers.
        tx.execute(
            "DELETE FROM accounts WHERE customer_id = ?1;",
            [customer_id.to_string()],
        )?;
        let customer_rows = tx.execute(
            "DELETE FROM customers WHERE customer_id = ?1;",
            [customer_id.to_string()],
        )?;

        tx.commit()?;
        Ok(customer_rows == 1)
    }
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    let id_text: String = row.get("customer_id")?;
    let customer_id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{id_text}` in customers.customer_id"
        ))
    })?;

    Ok(Customer {
        customer_id,
        name: row.get("name")?,
        email: row.get("email")?,
        mobile_number: row.get("mobile_number")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn parse_account_row(row: &Row<'_>) -> RepoResult<Account> {
    let id_text: String = row.get("customer_id")?;
    let customer_id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{id_text}` in accounts.customer_id"
        ))
    })?;

    Ok(Account {
        account_number: row.get("account_number")?,
        customer_id,
        account_type: row.get("account_type")?,
        branch_address: row.get("branch_address")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn map_customer_write_error(err: rusqlite::Error, mobile_number: &str) -> RepoError {
    if is_unique_violation(&err, "customers.mobile_number") {
        return RepoError::MobileNumberTaken(mobile_number.to_string());
    }
    err.into()
}

fn is_unique_violation(err: &rusqlite::Error, column: &str) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, Some(message)) => {
            failure.code == rusqlite::ErrorCode::ConstraintViolation && message.contains(column)
        }
        _ => false,
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "customers")? {
        return Err(RepoError::MissingRequiredTable("customers"));
    }
    for column in [
        "customer_id",
        "name",
        "email",
        "mobile_number",
        "created_at",
        "updated_at",
    ] {
        if !table_has_column(conn, "customers", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "customers",
                column,
            });
        }
    }

    if !table_exists(conn, "accounts")? {
        return Err(RepoError::MissingRequiredTable("accounts"));
    }
    for column in [
        "account_number",
        "customer_id",
        "account_type",
        "branch_address",
        "created_at",
        "updated_at",
    ] {
        if !table_has_column(conn, "accounts", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "accounts",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
