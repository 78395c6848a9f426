use crate::core::{InsertReport, Pipeline};
use crate::utils::error::Result;
use std::time::Instant;

pub struct InsertEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> InsertEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<InsertReport> {
        let started = Instant::now();
        tracing::info!("Starting guest insert");

        // Extract
        let guests = self.pipeline.extract().await?;
        tracing::info!("Collected {} guest records", guests.len());

        // Transform
        let guests = self.pipeline.transform(guests).await?;
        tracing::debug!("Validated {} guest records", guests.len());

        // Load
        let report = self.pipeline.load(guests).await?;
        tracing::info!(
            "Inserted {} rows into {} in {:?}",
            report.rows_inserted,
            report.table,
            started.elapsed()
        );

        Ok(report)
    }
}
