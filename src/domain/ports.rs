use crate::domain::model::{Guest, GuestBatch, InsertReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub const DEFAULT_TABLE: &str = "MYGuests";
pub const DEFAULT_COLUMNS: [&str; 3] = ["First_name", "Last_name", "Email"];

pub trait GuestStore: Send + Sync {
    /// Prepares one insert statement for `table(columns)` and executes it
    /// once per guest, in order.
    fn insert_guests(
        &self,
        table: &str,
        columns: &[String],
        guests: &[Guest],
        transactional: bool,
    ) -> impl std::future::Future<Output = Result<InsertReport>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Full connection URL, composed from its parts when needed. Fails when
    /// the parts cannot form a URL or none were given.
    fn database_url(&self) -> Result<String>;
    fn table(&self) -> &str;
    fn columns(&self) -> Vec<String>;
    fn guests(&self) -> &[Guest];
    fn transactional(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<GuestBatch>;
    async fn transform(&self, guests: GuestBatch) -> Result<GuestBatch>;
    async fn load(&self, guests: GuestBatch) -> Result<InsertReport>;
}
