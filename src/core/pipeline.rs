use crate::adapters::database::InsertStatement;
use crate::core::{ConfigProvider, Guest, GuestBatch, GuestStore, InsertReport, Pipeline};
use crate::utils::error::Result;
use crate::utils::validation::{redact_url, validate_columns, validate_guest, validate_identifier};

pub struct GuestPipeline<S: GuestStore, C: ConfigProvider> {
    store: S,
    config: C,
}

impl<S: GuestStore, C: ConfigProvider> GuestPipeline<S, C> {
    pub fn new(store: S, config: C) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Describes what a run would do: target, statement, mode and every row.
    /// Goes through extract and transform but never touches the store.
    pub async fn dry_run(&self) -> Result<Vec<String>> {
        let url = self.config.database_url()?;
        let table = self.config.table();
        let columns = self.config.columns();
        validate_identifier("insert.table", table)?;
        validate_columns("insert.columns", &columns)?;

        let guests = self.transform(self.extract().await?).await?;

        let mode = if self.config.transactional() {
            "single transaction"
        } else {
            "autocommit"
        };

        let mut lines = vec![
            "Dry run, nothing will be inserted".to_string(),
            format!("Database:  {}", redact_url(&url)),
            format!("Statement: {}", InsertStatement::build_sql(table, &columns)),
            format!("Mode:      {}", mode),
        ];
        for (index, guest) in guests.iter().enumerate() {
            lines.push(format!(
                "Row {}:     ({}, {}, {})",
                index + 1,
                guest.first_name,
                guest.last_name,
                guest.email
            ));
        }
        Ok(lines)
    }
}

#[async_trait::async_trait]
impl<S: GuestStore, C: ConfigProvider> Pipeline for GuestPipeline<S, C> {
    async fn extract(&self) -> Result<GuestBatch> {
        let configured = self.config.guests();
        if configured.is_empty() {
            tracing::debug!("No guests configured, using the built-in records");
            return Ok(Guest::defaults());
        }
        Ok(configured.to_vec())
    }

    async fn transform(&self, guests: GuestBatch) -> Result<GuestBatch> {
        let guests: GuestBatch = guests.iter().map(Guest::trimmed).collect();
        for (index, guest) in guests.iter().enumerate() {
            validate_guest(index, guest)?;
        }
        Ok(guests)
    }

    async fn load(&self, guests: GuestBatch) -> Result<InsertReport> {
        let table = self.config.table();
        let columns = self.config.columns();

        // checked again here since the pipeline can be built without a validated config
        validate_identifier("insert.table", table)?;
        validate_columns("insert.columns", &columns)?;

        tracing::debug!("Loading {} guests into {}", guests.len(), table);
        self.store
            .insert_guests(table, &columns, &guests, self.config.transactional())
            .await
    }
}
