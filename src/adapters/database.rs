use crate::domain::model::{Guest, InsertReport};
use crate::domain::ports::GuestStore;
use crate::utils::error::{LoaderError, Result};
use crate::utils::validation::redact_url;
use sqlx::any::{install_default_drivers, AnyStatement};
use sqlx::{AnyConnection, Connection, Executor, Statement};

/// Opens a single connection for `url`. Any of the compiled-in drivers
/// (MySQL/MariaDB, SQLite) is picked by URL scheme.
pub async fn connect(url: &str) -> Result<AnyConnection> {
    install_default_drivers();

    let redacted = redact_url(url);
    tracing::debug!("Connecting to {}", redacted);

    AnyConnection::connect(url)
        .await
        .map_err(|source| LoaderError::ConnectionError {
            url: redacted,
            source,
        })
}

pub async fn close(conn: AnyConnection) -> Result<()> {
    conn.close().await?;
    tracing::debug!("Connection closed");
    Ok(())
}

/// An `INSERT` of (first name, last name, email) prepared on the server.
pub struct InsertStatement {
    sql: String,
    statement: AnyStatement<'static>,
}

impl InsertStatement {
    pub fn build_sql(table: &str, columns: &[String]) -> String {
        let placeholders = vec!["?"; columns.len()].join(", ");
        format!(
            "INSERT INTO {}({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders
        )
    }

    pub async fn prepare(
        conn: &mut AnyConnection,
        table: &str,
        columns: &[String],
    ) -> Result<Self> {
        let sql = Self::build_sql(table, columns);
        tracing::debug!("Preparing: {}", sql);

        let prepared = (&mut *conn)
            .prepare(sql.as_str())
            .await
            .map(|statement| Statement::to_owned(&statement));

        match prepared {
            Ok(statement) => Ok(Self { sql, statement }),
            Err(source) => Err(LoaderError::PrepareError { sql, source }),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Binds the guest's three fields in order and executes. `row` is the
    /// 1-based position used in error reports.
    pub async fn execute(
        &self,
        conn: &mut AnyConnection,
        row: usize,
        guest: &Guest,
    ) -> Result<u64> {
        let [first_name, last_name, email] = guest.as_params();

        let result = self
            .statement
            .query()
            .bind(first_name)
            .bind(last_name)
            .bind(email)
            .execute(&mut *conn)
            .await
            .map_err(|source| LoaderError::ExecuteError { row, source })?;

        tracing::debug!(
            "Inserted row {} ({} {}), {} affected",
            row,
            first_name,
            last_name,
            result.rows_affected()
        );
        Ok(result.rows_affected())
    }

    /// Releases the statement handle. The driver's cached server-side
    /// statement goes away with the connection.
    pub fn close(self) {
        let Self { sql, statement } = self;
        drop(statement);
        tracing::debug!("Statement handle released: {}", sql);
    }
}

/// Prepares once and executes for every guest. Stops at the first failed row.
pub async fn insert_batch(
    conn: &mut AnyConnection,
    table: &str,
    columns: &[String],
    guests: &[Guest],
) -> Result<(String, u64)> {
    let statement = InsertStatement::prepare(conn, table, columns).await?;

    let mut rows_inserted = 0;
    for (index, guest) in guests.iter().enumerate() {
        rows_inserted += statement.execute(conn, index + 1, guest).await?;
    }

    let sql = statement.sql().to_string();
    statement.close();
    Ok((sql, rows_inserted))
}

/// Runs [`insert_batch`], optionally inside one transaction that is only
/// committed when every row went in.
pub async fn insert_guests(
    conn: &mut AnyConnection,
    table: &str,
    columns: &[String],
    guests: &[Guest],
    transactional: bool,
) -> Result<(String, u64)> {
    if !transactional {
        return insert_batch(conn, table, columns, guests).await;
    }

    let mut tx = conn.begin().await?;
    match insert_batch(&mut tx, table, columns, guests).await {
        Ok(outcome) => {
            tx.commit().await?;
            tracing::debug!("Transaction committed");
            Ok(outcome)
        }
        Err(e) => {
            // the failed row is the error worth reporting, even if rollback fails too
            match tx.rollback().await {
                Ok(()) => tracing::warn!("Transaction rolled back after: {}", e),
                Err(rollback) => tracing::error!("Rollback failed after {}: {}", e, rollback),
            }
            Err(e)
        }
    }
}

/// [`GuestStore`] backed by a sqlx connection opened per run.
#[derive(Debug, Clone)]
pub struct SqlxStore {
    url: String,
}

impl SqlxStore {
    pub fn new(url: String) -> Self {
        Self { url }
    }
}

impl GuestStore for SqlxStore {
    async fn insert_guests(
        &self,
        table: &str,
        columns: &[String],
        guests: &[Guest],
        transactional: bool,
    ) -> Result<InsertReport> {
        let mut conn = connect(&self.url).await?;
        tracing::info!("Connected to {}", redact_url(&self.url));

        let outcome = insert_guests(&mut conn, table, columns, guests, transactional).await;
        let closed = close(conn).await;

        let (statement, rows_inserted) = outcome?;
        closed?;

        Ok(InsertReport {
            table: table.to_string(),
            statement,
            rows_inserted,
            guests: guests.to_vec(),
        })
    }
}
