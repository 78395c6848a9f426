pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{Guest, GuestBatch, InsertReport};
pub use crate::domain::ports::{ConfigProvider, GuestStore, Pipeline};
pub use crate::utils::error::Result;
